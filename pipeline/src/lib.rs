//! Cell-buffer render pipeline: an ordered chain of [`Card`]s sharing a
//! [`ControlBus`] and a refresh channel, plus a reference set of effect
//! cards built on top of it.
//!
//! This crate has no knowledge of a display backend. A host builds a
//! [`Pipeline`], pushes a [`base::VTermCard`] wrapping its [`term_core::VTerm`]
//! followed by whatever effect cards it wants, then calls [`Pipeline::render`]
//! once per frame and blits the resulting [`Buffer`] itself.

pub mod base;
pub mod buffer;
pub mod card;
pub mod control_bus;
pub mod effects;
pub mod error;
pub mod key;
pub mod pipeline;
pub mod refresh;

pub use base::{SharedVTerm, VTermCard};
pub use buffer::Buffer;
pub use card::Card;
pub use control_bus::{ControlBus, ControlBusError};
pub use error::PipelineError;
pub use key::{KeyCode, KeyEvent, Modifiers};
pub use pipeline::Pipeline;
pub use refresh::{refresh_channel, RefreshListener, RefreshNotifier};
