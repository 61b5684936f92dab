//! Non-blocking refresh signaling between cards and a pipeline's host.

/// A cloneable sink cards use to ask for a new frame. Backed by a
/// single-slot bounded channel: surplus signals collapse into at most one
/// pending frame, and a full channel is simply dropped rather than blocking
/// the card that's signaling.
#[derive(Clone)]
pub struct RefreshNotifier {
    tx: flume::Sender<()>,
}

impl RefreshNotifier {
    pub(crate) fn new(tx: flume::Sender<()>) -> Self {
        Self { tx }
    }

    /// Requests a new frame. Never blocks; a signal already pending is left
    /// alone.
    pub fn notify(&self) {
        let _ = self.tx.try_send(());
    }
}

/// The host side of a [`RefreshNotifier`]: construct a connected pair with
/// [`refresh_channel`].
pub struct RefreshListener {
    rx: flume::Receiver<()>,
}

impl RefreshListener {
    /// True if at least one refresh was requested since the last call;
    /// drains any further pending signals (they all collapse into one
    /// frame).
    pub fn poll(&self) -> bool {
        let mut seen = false;
        while self.rx.try_recv().is_ok() {
            seen = true;
        }
        seen
    }
}

/// Builds a single-slot, non-blocking refresh channel.
pub fn refresh_channel() -> (RefreshNotifier, RefreshListener) {
    let (tx, rx) = flume::bounded(1);
    (RefreshNotifier::new(tx), RefreshListener { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surplus_signals_collapse_to_one_pending_frame() {
        let (notifier, listener) = refresh_channel();
        notifier.notify();
        notifier.notify();
        notifier.notify();
        assert!(listener.poll());
        assert!(!listener.poll());
    }
}
