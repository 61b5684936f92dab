//! Bitflags describing active terminal modes.

use bitflags::bitflags;

bitflags! {
    /// Boolean terminal modes, mirroring the DEC/ANSI mode set this core
    /// tracks. Mouse reporting modes are recorded but never acted on here —
    /// forwarding mouse events is a host concern.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modes: u32 {
        const NONE              = 0;
        /// DECOM: cursor addressing relative to the scroll region.
        const ORIGIN            = 1 << 0;
        /// DECAWM: autowrap at the right margin. On by default.
        const AUTOWRAP          = 1 << 1;
        /// DECLRMM: left/right margins are settable and enforced.
        const LEFT_RIGHT_MARGIN = 1 << 2;
        /// DECCM: cursor visibility.
        const CURSOR_VISIBLE    = 1 << 3;
        /// IRM: insert mode (SM/RM 4).
        const INSERT            = 1 << 4;
        /// Bracketed paste (mode 2004).
        const BRACKETED_PASTE   = 1 << 5;
        /// Whether the alternate screen is currently active.
        const ALT_SCREEN        = 1 << 6;
        const MOUSE_CLICK       = 1 << 7;
        const MOUSE_MOTION      = 1 << 8;
        const MOUSE_DRAG        = 1 << 9;
        const MOUSE_SGR         = 1 << 10;
        const MOUSE_UTF8        = 1 << 11;
    }
}

impl Default for Modes {
    fn default() -> Self {
        Self::AUTOWRAP | Self::CURSOR_VISIBLE
    }
}
