//! Reference effect cards built on top of the [`Card`](crate::card::Card) trait.

mod fade;
mod flash;
mod rainbow;

pub use fade::{InactiveTintCard, InactiveTintHandle, SubjectId};
pub use flash::{FlashCard, FlashHandle};
pub use rainbow::{RainbowCard, RainbowHandle};
