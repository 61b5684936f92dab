//! The pipeline's base card: draws a [`VTerm`]'s grid and cursor.

use std::sync::{Arc, Mutex};

use term_core::{Attrs, VTerm};

use crate::buffer::Buffer;
use crate::card::Card;

/// Shared handle to a [`VTerm`] a driver context owns and mutates by feeding
/// bytes through a [`vte_core::Parser`]. Per the VTerm's single-threaded
/// design, only one context should be mutating it; a renderer on another
/// thread takes this lock only for the short critical section needed to
/// snapshot the grid.
pub type SharedVTerm = Arc<Mutex<VTerm>>;

/// The first card in a pipeline: produces a buffer from a [`VTerm`]'s
/// current grid, with the cursor cell overlaid by toggling
/// [`Attrs::REVERSE`] at read time rather than mutating the underlying
/// cell. This keeps saving/restoring regions lossless, since the true style
/// under the cursor is never touched.
pub struct VTermCard {
    term: SharedVTerm,
}

impl VTermCard {
    pub fn new(term: SharedVTerm) -> Self {
        Self { term }
    }
}

impl Card for VTermCard {
    fn render(&mut self, _input: Buffer) -> Buffer {
        let term = self.term.lock().expect("vterm lock poisoned");
        let mut buffer = Buffer::from_rows(term.grid());
        if term.cursor_visible() {
            let (x, y) = term.cursor();
            if x < buffer.width() && y < buffer.height() {
                let mut cell = buffer.cell(x, y);
                cell.attrs.toggle(Attrs::REVERSE);
                buffer.set_cell(x, y, cell);
            }
        }
        buffer
    }

    fn resize(&mut self, cols: usize, rows: usize) {
        self.term.lock().expect("vterm lock poisoned").resize(cols, rows);
    }

    fn label(&self) -> &'static str {
        "vterm"
    }
}
