//! Cursor position and the state DECSC/DECRC snapshot.

use crate::cell::Attrs;
use crate::color::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
    pub visible: bool,
    /// Right-edge latch: set once a printable lands at the last column with
    /// autowrap enabled. The next printable consumes it instead of the
    /// column it names.
    pub wrap_next: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            visible: true,
            wrap_next: false,
        }
    }
}

/// Snapshot taken by DECSC (`ESC 7`) and restored by DECRC (`ESC 8`).
///
/// Main and alternate screens each keep their own; `VTerm` holds one per
/// screen and never shares them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SavedCursor {
    pub x: usize,
    pub y: usize,
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attrs,
    pub origin_mode: bool,
}

impl SavedCursor {
    /// The snapshot DECRC reads when no DECSC has run yet: home position
    /// with origin mode cleared.
    pub fn home() -> Self {
        Self {
            x: 0,
            y: 0,
            fg: Color::Default,
            bg: Color::Default,
            attrs: Attrs::empty(),
            origin_mode: false,
        }
    }
}

impl Default for SavedCursor {
    fn default() -> Self {
        Self::home()
    }
}
