//! Brief whole-buffer flash overlay, e.g. for a bell or an error chime.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use term_core::{blend, Color};

use crate::buffer::Buffer;
use crate::card::Card;
use crate::control_bus::ControlBus;
use crate::refresh::RefreshNotifier;

struct Shared {
    active: bool,
    started: Option<Instant>,
    refresh: Option<RefreshNotifier>,
}

/// Cheap handle a host keeps to trigger the flash directly, independent of
/// the control bus (which is also wired to the same state in
/// [`FlashCard::register_controls`]).
#[derive(Clone)]
pub struct FlashHandle {
    shared: Arc<Mutex<Shared>>,
}

impl FlashHandle {
    pub fn trigger(&self) {
        let mut shared = self.shared.lock().expect("flash state lock poisoned");
        shared.active = true;
        shared.started = Some(Instant::now());
        if let Some(refresh) = &shared.refresh {
            refresh.notify();
        }
    }
}

/// Blends every cell toward `color` for `duration` after being triggered.
pub struct FlashCard {
    shared: Arc<Mutex<Shared>>,
    color: Color,
    duration: Duration,
}

impl FlashCard {
    pub fn new(color: Color, duration: Duration) -> (Self, FlashHandle) {
        let shared = Arc::new(Mutex::new(Shared {
            active: false,
            started: None,
            refresh: None,
        }));
        let handle = FlashHandle { shared: shared.clone() };
        (Self { shared, color, duration }, handle)
    }
}

impl Card for FlashCard {
    fn render(&mut self, mut input: Buffer) -> Buffer {
        let active = {
            let mut shared = self.shared.lock().expect("flash state lock poisoned");
            if shared.active {
                let elapsed = shared.started.map(Instant::elapsed).unwrap_or(Duration::MAX);
                if elapsed >= self.duration {
                    shared.active = false;
                    shared.started = None;
                    if let Some(refresh) = &shared.refresh {
                        refresh.notify();
                    }
                }
            }
            shared.active
        };
        if !active {
            return input;
        }
        let color = self.color;
        input.for_each_cell_mut(|_, _, cell| {
            cell.fg = blend(cell.fg, color, 0.35, true);
            cell.bg = color;
        });
        input
    }

    fn set_refresh_notifier(&mut self, sink: RefreshNotifier) {
        self.shared.lock().expect("flash state lock poisoned").refresh = Some(sink);
    }

    fn register_controls(&mut self, bus: &ControlBus) {
        let shared = self.shared.clone();
        let _ = bus.register("effects.flash", "briefly flash the whole buffer", move |_payload| {
            let mut shared = shared.lock().expect("flash state lock poisoned");
            shared.active = true;
            shared.started = Some(Instant::now());
            if let Some(refresh) = &shared.refresh {
                refresh.notify();
            }
            Ok(())
        });
    }

    fn label(&self) -> &'static str {
        "flash"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use term_core::cell_default;

    #[test]
    fn idle_flash_returns_input_unchanged() {
        let (mut card, _handle) = FlashCard::new(Color::Rgb { r: 255, g: 0, b: 0 }, Duration::from_millis(100));
        let input = Buffer::empty(3, 2);
        let output = card.render(input.clone());
        assert_eq!(input, output);
    }

    #[test]
    fn triggered_flash_replaces_background() {
        let (mut card, handle) = FlashCard::new(Color::Rgb { r: 10, g: 20, b: 30 }, Duration::from_millis(500));
        handle.trigger();
        let mut input = Buffer::empty(1, 1);
        input.set_cell(0, 0, term_core::Cell { rune: 'x', ..cell_default() });
        let output = card.render(input);
        assert_eq!(output.cell(0, 0).bg, Color::Rgb { r: 10, g: 20, b: 30 });
    }

    #[test]
    fn flash_deactivates_after_duration_elapses() {
        let (mut card, handle) = FlashCard::new(Color::Rgb { r: 10, g: 20, b: 30 }, Duration::from_millis(1));
        handle.trigger();
        std::thread::sleep(Duration::from_millis(5));
        let output = card.render(Buffer::empty(1, 1));
        assert!(output.cell(0, 0).is_transparent());
    }

    #[test]
    fn bus_trigger_activates_same_state_as_handle() {
        let (mut card, _handle) = FlashCard::new(Color::Rgb { r: 1, g: 2, b: 3 }, Duration::from_millis(500));
        let bus = ControlBus::new();
        card.register_controls(&bus);
        bus.trigger("effects.flash", b"").unwrap();
        let output = card.render(Buffer::empty(1, 1));
        assert_eq!(output.cell(0, 0).bg, Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
