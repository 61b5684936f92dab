//! The styled character cell.

use bitflags::bitflags;

use crate::color::Color;

bitflags! {
    /// Text attributes settable through SGR.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attrs: u8 {
        const BOLD      = 1 << 0;
        const UNDERLINE = 1 << 1;
        const REVERSE   = 1 << 2;
        const BLINK     = 1 << 3;
        const DIM       = 1 << 4;
        const ITALIC    = 1 << 5;
    }
}

/// A single grid cell: a rune plus the style it was placed with.
///
/// `rune == '\0'` marks an unwritten cell. Overlay compositing in the render
/// pipeline treats those as transparent; an explicit space is a real cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub rune: char,
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attrs,
}

impl Default for Cell {
    fn default() -> Self {
        cell_default()
    }
}

/// The cell every grid position starts life as: a space with default colors
/// and no attributes.
pub fn cell_default() -> Cell {
    Cell {
        rune: ' ',
        fg: Color::Default,
        bg: Color::Default,
        attrs: Attrs::empty(),
    }
}

impl Cell {
    /// A cleared/unwritten cell, transparent to overlay compositing.
    pub fn blank() -> Cell {
        Cell {
            rune: '\0',
            ..cell_default()
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.rune == '\0'
    }
}
