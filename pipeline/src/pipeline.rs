//! The pipeline itself: an ordered chain of cards sharing a control bus.

use std::sync::{Arc, Mutex, RwLock};

use crate::buffer::Buffer;
use crate::card::Card;
use crate::control_bus::ControlBus;
use crate::error::PipelineError;
use crate::key::KeyEvent;
use crate::refresh::{refresh_channel, RefreshListener, RefreshNotifier};

type SharedCard = Arc<Mutex<Box<dyn Card>>>;
type ControlFn = Box<dyn Fn(&KeyEvent) -> bool + Send + Sync>;

/// An ordered chain of [`Card`]s plus the shared [`ControlBus`] and refresh
/// channel they publish to.
///
/// The card list is read-mostly: appends take a write lock, while `render`,
/// `resize`, `handle_key` and `run`/`stop` take a cloned snapshot of `Arc`
/// handles so the lock is never held while a card's methods run (a card's
/// `render` can be arbitrarily slow; holding the list lock across it would
/// block a concurrent `push_card`).
pub struct Pipeline {
    cards: RwLock<Vec<SharedCard>>,
    bus: Arc<ControlBus>,
    control_fn: Option<ControlFn>,
    notifier: RefreshNotifier,
    listener: RefreshListener,
}

impl Pipeline {
    pub fn new() -> Self {
        let (notifier, listener) = refresh_channel();
        Self {
            cards: RwLock::new(Vec::new()),
            bus: Arc::new(ControlBus::new()),
            control_fn: None,
            notifier,
            listener,
        }
    }

    /// Installs the optional control function consulted before every key is
    /// broadcast to cards; returning `true` marks the key consumed.
    pub fn with_control_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&KeyEvent) -> bool + Send + Sync + 'static,
    {
        self.control_fn = Some(Box::new(f));
        self
    }

    pub fn control_bus(&self) -> &Arc<ControlBus> {
        &self.bus
    }

    pub fn refresh_listener(&self) -> &RefreshListener {
        &self.listener
    }

    /// Appends a card to the end of the chain, wiring its refresh notifier
    /// and letting it publish any controls onto the shared bus.
    pub fn push_card(&self, mut card: Box<dyn Card>) {
        card.register_controls(&self.bus);
        card.set_refresh_notifier(self.notifier.clone());
        self.cards
            .write()
            .expect("pipeline card list lock poisoned")
            .push(Arc::new(Mutex::new(card)));
    }

    pub fn len(&self) -> usize {
        self.cards.read().expect("pipeline card list lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Vec<SharedCard> {
        self.cards.read().expect("pipeline card list lock poisoned").clone()
    }

    /// Starts every card's background work in order, stopping at (and
    /// reporting) the first failure rather than starting the rest.
    pub fn run(&self) -> Result<(), PipelineError> {
        for (index, card) in self.snapshot().into_iter().enumerate() {
            let mut card = card.lock().expect("card lock poisoned");
            let label = card.label().to_string();
            if let Err(source) = card.run() {
                return Err(PipelineError::CardStartFailed { index, label, source });
            }
        }
        Ok(())
    }

    /// Stops every card's background work and joins it; errors from
    /// individual cards are not surfaced here (`stop` is infallible per
    /// card).
    pub fn stop(&self) {
        for card in self.snapshot() {
            card.lock().expect("card lock poisoned").stop();
        }
    }

    pub fn resize(&self, cols: usize, rows: usize) {
        for card in self.snapshot() {
            card.lock().expect("card lock poisoned").resize(cols, rows);
        }
    }

    /// Runs one frame through the whole chain: card 0 receives an empty
    /// `width x height` buffer, every later card receives the prior card's
    /// output.
    pub fn render(&self, width: usize, height: usize) -> Buffer {
        let mut buffer = Buffer::empty(width, height);
        for card in self.snapshot() {
            buffer = card.lock().expect("card lock poisoned").render(buffer);
        }
        buffer
    }

    /// Routes a key event: the control function gets first refusal; if it
    /// doesn't consume the key, every card sees it in order.
    pub fn handle_key(&self, event: &KeyEvent) {
        if let Some(control_fn) = &self.control_fn {
            if control_fn(event) {
                return;
            }
        }
        for card in self.snapshot() {
            card.lock().expect("card lock poisoned").handle_key(event);
        }
    }

    /// True if a card requested a refresh since the last poll.
    pub fn poll_refresh(&self) -> bool {
        self.listener.poll()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
