//! Virtual terminal state machine: grid(s), cursor, margins, modes and SGR
//! state driven by a [`vte_core::Parser`] through the [`vte_core::Actor`]
//! trait.
//!
//! This crate has no I/O of its own. A host reads bytes off whatever source
//! it likes (a PTY, a test fixture, a recorded session) and feeds them to a
//! [`Parser`](vte_core::Parser) wired to a [`VTerm`]; the `VTerm` exposes the
//! resulting grid and cursor for a renderer to read.

pub mod cell;
pub mod color;
pub mod config;
pub mod cursor;
pub mod grid;
pub mod margins;
pub mod mode;
pub mod tabs;
pub mod vterm;

pub use cell::{cell_default, Attrs, Cell};
pub use color::{blend, hsv_to_rgb, Color};
pub use config::VTermConfig;
pub use cursor::{Cursor, SavedCursor};
pub use grid::{Grid, Line, ScrollbackHistory};
pub use margins::Margins;
pub use mode::Modes;
pub use tabs::TabStops;
pub use vterm::VTerm;
