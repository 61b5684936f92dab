//! Callbacks invoked by the virtual terminal parser.
//!
//! The [`Parser`](crate::parser::Parser) walks through a byte stream and
//! translates it into higher level terminal actions. Those actions are handed
//! over to an [`Actor`] implementation that is responsible for mutating the
//! terminal model, updating UI state, logging, or whatever else the embedding
//! application needs. The trait methods mirror the action set defined by the
//! ECMA-48 escape sequence state machine and DEC/xterm conventions.
//! Implementations should be prepared to receive any sequence of calls that
//! is valid according to the virtual terminal protocol, and should avoid
//! performing additional parsing themselves.
use crate::csi::CsiParam;

/// Consumer-facing interface for terminal actions emitted by the parser.
///
/// Each method corresponds to a particular class of escape sequence or
/// printable data encountered while decoding a stream of terminal bytes.
/// The semantics follow ECMA-48 where possible, with a few well-established
/// extensions.
///
/// ## Terminology
/// An intermediate is a character in the range 0x20-0x2f that occurs before
/// the final character in an escape sequence.
///
/// `ignored_excess_intermediates` is set when there were more than two
/// intermediate characters; no standard defines any codes with more than
/// two. Intermediates after the second set this flag and are discarded.
///
/// Omitted numeric parameters are reported as zero, the default value for
/// that parameter per ECMA-48.
pub trait Actor {
    /// Emits a single printable Unicode code point.
    fn print(&mut self, c: char);

    /// Executes an immediate single-byte control function.
    ///
    /// This covers C0/C1 control characters that are *not* part of a longer
    /// sequence (e.g. `BEL`, `BS`, `CR`, `LF`, `IND`, `NEL`, `HTS`).
    fn execute(&mut self, byte: u8);

    /// Signals the start of a Device Control String (DCS).
    fn hook(
        &mut self,
        byte: u8,
        params: &[i64],
        intermediates: &[u8],
        ignored_excess_intermediates: bool,
    );

    /// Passes a byte as part of a device control string to the handler
    /// chosen in [`hook`](Actor::hook).
    fn put(&mut self, byte: u8);

    /// Marks the end of the current device control string.
    fn unhook(&mut self);

    /// Dispatches a standard escape sequence (`ESC <intermediates> <final>`).
    fn esc_dispatch(
        &mut self,
        params: &[i64],
        intermediates: &[u8],
        ignored_excess_intermediates: bool,
        byte: u8,
    );

    /// Dispatches a Control Sequence Introducer escape. Intermediate bytes
    /// that precede the first numeric parameter (such as `?` for DEC
    /// private modes) have already been folded into `params` as
    /// [`CsiParam::P`] entries.
    fn csi_dispatch(
        &mut self,
        params: &[CsiParam],
        parameters_truncated: bool,
        byte: u8,
    );

    /// Dispatches an Operating System Command, pre-split on `;` into raw
    /// parameter slices.
    fn osc_dispatch(&mut self, params: &[&[u8]]);
}
