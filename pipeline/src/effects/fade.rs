//! Per-subject fade timeline, e.g. tinting an inactive pane toward a dim color.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use term_core::{blend, Color};

use crate::buffer::Buffer;
use crate::card::Card;
use crate::control_bus::ControlBus;
use crate::refresh::RefreshNotifier;

/// An opaque identifier for whatever a host considers "the subject", e.g. a
/// pane. The card itself never interprets it beyond map lookups.
pub type SubjectId = [u8; 16];

/// A smoothstep-eased interpolation from `start` to `target` over `duration`.
struct FadeTimeline {
    start: f32,
    target: f32,
    start_time: Instant,
    duration: Duration,
    animating: bool,
}

impl FadeTimeline {
    fn at_rest(value: f32) -> Self {
        Self {
            start: value,
            target: value,
            start_time: Instant::now(),
            duration: Duration::ZERO,
            animating: false,
        }
    }

    fn set_target(&mut self, target: f32, duration: Duration) {
        let current = self.value();
        self.start = current;
        self.target = target;
        self.start_time = Instant::now();
        self.duration = duration;
        self.animating = (target - current).abs() > f32::EPSILON && !duration.is_zero();
        if !self.animating {
            self.start = target;
        }
    }

    /// Current eased value; also advances `animating` to false once the
    /// timeline reaches its target.
    fn value(&mut self) -> f32 {
        if !self.animating {
            return self.target;
        }
        let elapsed = self.start_time.elapsed();
        if elapsed >= self.duration {
            self.animating = false;
            return self.target;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let eased = 3.0 * t * t - 2.0 * t * t * t;
        self.start + (self.target - self.start) * eased
    }
}

struct Shared {
    timelines: HashMap<SubjectId, FadeTimeline>,
    refresh: Option<RefreshNotifier>,
}

/// Cheap handle a host keeps to drive a subject's fade directly.
#[derive(Clone)]
pub struct InactiveTintHandle {
    shared: Arc<Mutex<Shared>>,
}

impl InactiveTintHandle {
    pub fn set_target(&self, subject: SubjectId, target: f32, duration: Duration) {
        let mut shared = self.shared.lock().expect("fade state lock poisoned");
        shared
            .timelines
            .entry(subject)
            .or_insert_with(|| FadeTimeline::at_rest(0.0))
            .set_target(target.clamp(0.0, 1.0), duration);
        if let Some(refresh) = &shared.refresh {
            refresh.notify();
        }
    }
}

/// Blends every cell toward `color` at an intensity that eases between 0
/// (fully active, no tint) and 1 (fully inactive) for `subject`. Idle
/// (intensity exactly 0) passes the buffer through untouched.
pub struct InactiveTintCard {
    subject: SubjectId,
    shared: Arc<Mutex<Shared>>,
    color: Color,
}

impl InactiveTintCard {
    pub fn new(subject: SubjectId, color: Color) -> (Self, InactiveTintHandle) {
        let shared = Arc::new(Mutex::new(Shared {
            timelines: HashMap::new(),
            refresh: None,
        }));
        let handle = InactiveTintHandle { shared: shared.clone() };
        (Self { subject, shared, color }, handle)
    }
}

impl Card for InactiveTintCard {
    fn render(&mut self, mut input: Buffer) -> Buffer {
        let (intensity, still_animating) = {
            let mut shared = self.shared.lock().expect("fade state lock poisoned");
            let timeline = shared.timelines.entry(self.subject).or_insert_with(|| FadeTimeline::at_rest(0.0));
            let intensity = timeline.value();
            (intensity, timeline.animating)
        };
        if still_animating {
            let shared = self.shared.lock().expect("fade state lock poisoned");
            if let Some(refresh) = &shared.refresh {
                refresh.notify();
            }
        }
        if intensity <= 0.0 {
            return input;
        }
        let color = self.color;
        input.for_each_cell_mut(|_, _, cell| {
            cell.fg = blend(cell.fg, color, intensity, true);
            cell.bg = blend(cell.bg, color, intensity, false);
        });
        input
    }

    fn set_refresh_notifier(&mut self, sink: RefreshNotifier) {
        self.shared.lock().expect("fade state lock poisoned").refresh = Some(sink);
    }

    fn register_controls(&mut self, bus: &ControlBus) {
        let shared = self.shared.clone();
        let subject = self.subject;
        let _ = bus.register("effects.inactive_tint", "fade the subject toward an inactive tint", move |payload| {
            let target = payload.first().map_or(1.0, |b| *b as f32 / 255.0);
            let duration_ms = payload
                .get(1..5)
                .and_then(|b| b.try_into().ok())
                .map(u32::from_be_bytes)
                .unwrap_or(200);
            let mut shared = shared.lock().expect("fade state lock poisoned");
            shared
                .timelines
                .entry(subject)
                .or_insert_with(|| FadeTimeline::at_rest(0.0))
                .set_target(target.clamp(0.0, 1.0), Duration::from_millis(duration_ms as u64));
            if let Some(refresh) = &shared.refresh {
                refresh.notify();
            }
            Ok(())
        });
    }

    fn label(&self) -> &'static str {
        "inactive_tint"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBJECT: SubjectId = [1; 16];

    #[test]
    fn idle_timeline_passes_buffer_through_unchanged() {
        let (mut card, _handle) = InactiveTintCard::new(SUBJECT, Color::Rgb { r: 0, g: 0, b: 0 });
        let input = Buffer::empty(2, 2);
        let output = card.render(input.clone());
        assert_eq!(input, output);
    }

    #[test]
    fn zero_duration_target_applies_immediately() {
        let (mut card, handle) = InactiveTintCard::new(SUBJECT, Color::Rgb { r: 50, g: 50, b: 50 });
        handle.set_target(SUBJECT, 1.0, Duration::ZERO);
        let output = card.render(Buffer::empty(1, 1));
        assert_eq!(output.cell(0, 0).bg, Color::Rgb { r: 50, g: 50, b: 50 });
    }

    #[test]
    fn animating_timeline_is_between_endpoints_mid_flight() {
        let (mut card, handle) = InactiveTintCard::new(SUBJECT, Color::Rgb { r: 100, g: 100, b: 100 });
        handle.set_target(SUBJECT, 1.0, Duration::from_millis(50));
        std::thread::sleep(Duration::from_millis(10));
        let output = card.render(Buffer::empty(1, 1));
        let cell = output.cell(0, 0);
        assert_ne!(cell.bg, Color::Default);
        assert_ne!(cell.bg, Color::Rgb { r: 100, g: 100, b: 100 });
    }

    #[test]
    fn different_subjects_have_independent_timelines() {
        let other: SubjectId = [2; 16];
        let (mut card, handle) = InactiveTintCard::new(SUBJECT, Color::Rgb { r: 9, g: 9, b: 9 });
        handle.set_target(other, 1.0, Duration::ZERO);
        // This card only renders its own subject, so it stays untouched.
        let input = Buffer::empty(1, 1);
        assert_eq!(card.render(input.clone()), input);
    }

    #[test]
    fn bus_trigger_parses_target_and_duration() {
        let (mut card, _handle) = InactiveTintCard::new(SUBJECT, Color::Rgb { r: 1, g: 1, b: 1 });
        let bus = ControlBus::new();
        card.register_controls(&bus);
        let mut payload = vec![255u8];
        payload.extend_from_slice(&0u32.to_be_bytes());
        bus.trigger("effects.inactive_tint", &payload).unwrap();
        let output = card.render(Buffer::empty(1, 1));
        assert_eq!(output.cell(0, 0).bg, Color::Rgb { r: 1, g: 1, b: 1 });
    }
}
