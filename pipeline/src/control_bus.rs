//! Named-trigger bus letting cards expose actions to a host.

use std::collections::BTreeMap;
use std::sync::RwLock;

/// Failure modes for [`ControlBus`] operations. Unlike the VTerm and parser,
/// which never fail (see the crate-level error taxonomy), the bus is a
/// thin, rarely-mutated registry and surfaces misuse as an `Err` the caller
/// decides how to log or report.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ControlBusError {
    #[error("control id must not be empty")]
    EmptyId,
    #[error("control id {0:?} is already registered")]
    Duplicate(String),
    #[error("control id {0:?} is not registered")]
    Unknown(String),
    #[error("handler for {0:?} failed: {1}")]
    HandlerFailed(String, String),
}

type Handler = Box<dyn Fn(&[u8]) -> Result<(), ControlBusError> + Send + Sync>;

struct Entry {
    description: String,
    handler: Handler,
}

/// A mapping from a string trigger id (e.g. `"effects.flash"`) to a handler.
///
/// Registration is rare and write-locked; [`trigger`](ControlBus::trigger)
/// and [`capabilities`](ControlBus::capabilities) take a read lock and do
/// not hold it across whatever side effects the handler itself performs
/// beyond returning.
#[derive(Default)]
pub struct ControlBus {
    entries: RwLock<BTreeMap<String, Entry>>,
}

impl ControlBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under `id`. Fails if `id` is empty or already
    /// registered; the first handler installed for an id is never replaced
    /// by a later, failed registration attempt.
    pub fn register<F>(&self, id: impl Into<String>, description: impl Into<String>, handler: F) -> Result<(), ControlBusError>
    where
        F: Fn(&[u8]) -> Result<(), ControlBusError> + Send + Sync + 'static,
    {
        let id = id.into();
        if id.is_empty() {
            return Err(ControlBusError::EmptyId);
        }
        let mut entries = self.entries.write().expect("control bus lock poisoned");
        if entries.contains_key(&id) {
            return Err(ControlBusError::Duplicate(id));
        }
        entries.insert(
            id,
            Entry {
                description: description.into(),
                handler: Box::new(handler),
            },
        );
        Ok(())
    }

    /// Removes a handler; idempotent, unlike [`register`](ControlBus::register).
    pub fn unregister(&self, id: &str) {
        self.entries.write().expect("control bus lock poisoned").remove(id);
    }

    /// Invokes the handler registered for `id` synchronously. Multiple
    /// `trigger` calls for the same id are processed in the order they are
    /// submitted by the caller, since the read lock never blocks a handler
    /// invocation mid-flight on another `trigger`.
    pub fn trigger(&self, id: &str, payload: &[u8]) -> Result<(), ControlBusError> {
        let entries = self.entries.read().expect("control bus lock poisoned");
        let entry = entries.get(id).ok_or_else(|| ControlBusError::Unknown(id.to_string()))?;
        (entry.handler)(payload)
    }

    /// Sorted snapshot of registered `(id, description)` pairs.
    pub fn capabilities(&self) -> Vec<(String, String)> {
        self.entries
            .read()
            .expect("control bus lock poisoned")
            .iter()
            .map(|(id, entry)| (id.clone(), entry.description.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn register_rejects_empty_id() {
        let bus = ControlBus::new();
        let err = bus.register("", "desc", |_| Ok(())).unwrap_err();
        assert_eq!(err, ControlBusError::EmptyId);
    }

    #[test]
    fn duplicate_register_keeps_first_handler() {
        let bus = ControlBus::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = calls.clone();
        bus.register("effects.flash", "flash", move |_| {
            calls2.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
        let err = bus.register("effects.flash", "flash again", |_| Ok(())).unwrap_err();
        assert_eq!(err, ControlBusError::Duplicate("effects.flash".to_string()));
        bus.trigger("effects.flash", b"").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn trigger_unknown_id_fails() {
        let bus = ControlBus::new();
        let err = bus.trigger("nope", b"").unwrap_err();
        assert_eq!(err, ControlBusError::Unknown("nope".to_string()));
    }

    #[test]
    fn unregister_is_idempotent() {
        let bus = ControlBus::new();
        bus.unregister("nothing-here");
        bus.register("x", "x", |_| Ok(())).unwrap();
        bus.unregister("x");
        bus.unregister("x");
        assert!(bus.trigger("x", b"").is_err());
    }

    #[test]
    fn capabilities_are_sorted_by_id() {
        let bus = ControlBus::new();
        bus.register("zeta", "last", |_| Ok(())).unwrap();
        bus.register("alpha", "first", |_| Ok(())).unwrap();
        let caps = bus.capabilities();
        assert_eq!(caps[0].0, "alpha");
        assert_eq!(caps[1].0, "zeta");
    }
}
