//! The [`Card`] trait: one stage in a [`Pipeline`](crate::pipeline::Pipeline).

use crate::buffer::Buffer;
use crate::control_bus::ControlBus;
use crate::key::KeyEvent;
use crate::refresh::RefreshNotifier;

/// One stage of the render pipeline.
///
/// Default implementations are no-ops so a card only overrides the methods
/// it actually needs — the same shape as [`vte_core::Actor`], where a
/// consumer specializes a handful of methods out of a much larger trait.
pub trait Card: Send {
    /// Starts any background work (timers, animation tickers) the card
    /// needs. Called once when the pipeline starts; must not block.
    fn run(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }

    /// Cancels background work started by [`run`](Card::run). Must return
    /// promptly; the pipeline joins all card tasks before considering
    /// itself stopped.
    fn stop(&mut self) {}

    /// Notifies the card that the viewport changed size.
    fn resize(&mut self, _cols: usize, _rows: usize) {}

    /// The core transform: takes the prior card's buffer (or an empty one,
    /// for the first card) and returns a buffer of the same dimensions.
    fn render(&mut self, input: Buffer) -> Buffer;

    /// Offered every key event the pipeline's control function did not
    /// consume. Cards do not report consumption themselves — per-card
    /// consumption is the control function's job; every live card sees the
    /// event.
    fn handle_key(&mut self, _event: &KeyEvent) {}

    /// Gives the card a way to request a new frame asynchronously, e.g.
    /// after a timer-driven animation tick or an effect becoming active.
    fn set_refresh_notifier(&mut self, _sink: RefreshNotifier) {}

    /// Publishes this card's named triggers on the pipeline's control bus.
    /// Called once, during [`Pipeline::push_card`](crate::pipeline::Pipeline::push_card).
    fn register_controls(&mut self, _bus: &ControlBus) {}

    /// Short diagnostic name used in logs and [`PipelineError`](crate::error::PipelineError).
    fn label(&self) -> &'static str {
        "card"
    }
}
