//! Animated hue-cycling tint applied to every styled (non-default) foreground.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use term_core::{blend, hsv_to_rgb, Color};

use crate::buffer::Buffer;
use crate::card::Card;
use crate::control_bus::ControlBus;
use crate::refresh::RefreshNotifier;

const TICK_INTERVAL: Duration = Duration::from_millis(50);

struct Shared {
    enabled: bool,
    phase: f32,
    last_tick: Option<Instant>,
    refresh: Option<RefreshNotifier>,
}

/// Cheap handle a host keeps to toggle the effect directly.
#[derive(Clone)]
pub struct RainbowHandle {
    shared: Arc<Mutex<Shared>>,
}

impl RainbowHandle {
    pub fn set_enabled(&self, enabled: bool) {
        let mut shared = self.shared.lock().expect("rainbow state lock poisoned");
        shared.enabled = enabled;
        if enabled {
            shared.last_tick = Some(Instant::now());
        }
        if let Some(refresh) = &shared.refresh {
            refresh.notify();
        }
    }
}

/// Cycles a hue across every non-default foreground, advancing phase by
/// `2π * speed_hz` per second of wall time. A background ticker requests a
/// refresh every [`TICK_INTERVAL`] while enabled so the animation keeps
/// moving even when nothing else drives a redraw.
pub struct RainbowCard {
    shared: Arc<Mutex<Shared>>,
    speed_hz: f32,
    mix: f32,
    stop_flag: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl RainbowCard {
    pub fn new(speed_hz: f32, mix: f32) -> (Self, RainbowHandle) {
        let shared = Arc::new(Mutex::new(Shared {
            enabled: false,
            phase: 0.0,
            last_tick: None,
            refresh: None,
        }));
        let handle = RainbowHandle { shared: shared.clone() };
        (
            Self {
                shared,
                speed_hz,
                mix: mix.clamp(0.0, 1.0),
                stop_flag: Arc::new(AtomicBool::new(false)),
                worker: None,
            },
            handle,
        )
    }
}

impl Card for RainbowCard {
    fn run(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.stop_flag.store(false, Ordering::SeqCst);
        let shared = self.shared.clone();
        let stop_flag = self.stop_flag.clone();
        self.worker = Some(std::thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                std::thread::sleep(TICK_INTERVAL);
                let shared = shared.lock().expect("rainbow state lock poisoned");
                if shared.enabled {
                    if let Some(refresh) = &shared.refresh {
                        refresh.notify();
                    }
                }
            }
        }));
        Ok(())
    }

    fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    fn render(&mut self, mut input: Buffer) -> Buffer {
        let phase = {
            let mut shared = self.shared.lock().expect("rainbow state lock poisoned");
            if !shared.enabled {
                return input;
            }
            let now = Instant::now();
            let dt = shared.last_tick.map(|t| now.duration_since(t)).unwrap_or(Duration::ZERO);
            shared.phase += std::f32::consts::TAU * self.speed_hz * dt.as_secs_f32();
            shared.last_tick = Some(now);
            shared.phase
        };
        let mix = self.mix;
        input.for_each_cell_mut(|x, y, cell| {
            if cell.fg == Color::Default {
                return;
            }
            let hue = phase + 0.12 * (x + y) as f32;
            let tint = hsv_to_rgb(hue, 1.0, 1.0);
            cell.fg = blend(cell.fg, tint, mix, true);
        });
        input
    }

    fn set_refresh_notifier(&mut self, sink: RefreshNotifier) {
        self.shared.lock().expect("rainbow state lock poisoned").refresh = Some(sink);
    }

    fn register_controls(&mut self, bus: &ControlBus) {
        let shared = self.shared.clone();
        let _ = bus.register("effects.rainbow", "toggle the hue-cycling foreground tint", move |payload| {
            let mut shared = shared.lock().expect("rainbow state lock poisoned");
            shared.enabled = payload.first() != Some(&0);
            if shared.enabled {
                shared.last_tick = Some(Instant::now());
            }
            if let Some(refresh) = &shared.refresh {
                refresh.notify();
            }
            Ok(())
        });
    }

    fn label(&self) -> &'static str {
        "rainbow"
    }
}

impl Drop for RainbowCard {
    fn drop(&mut self) {
        self.stop();
    }
}
