//! Producer/consumer event queue between the transport and the session.
//!
//! The transport's network thread publishes through an [`EventPublisher`],
//! which is `Clone + Send` and never blocks. The orchestrator drains the
//! paired [`EventReceiver`] from the host's tick loop with non-blocking
//! `try_recv`, so arrival order is preserved and all dispatch happens on
//! the consumer thread. Neither side requires an async runtime.

use tokio::sync::mpsc;
use tracing::trace;

use super::event::TransportEvent;

/// Create a connected publisher/receiver pair for one connection attempt.
pub fn event_queue() -> (EventPublisher, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventPublisher { tx }, EventReceiver { rx })
}

/// Thread-safe handle the transport publishes events through.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    tx: mpsc::UnboundedSender<TransportEvent>,
}

impl EventPublisher {
    /// Enqueue an event for the next drain.
    ///
    /// Returns `false` if the consumer side is gone (session torn down);
    /// the event is dropped in that case.
    pub fn publish(&self, event: TransportEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(dropped) => {
                trace!(event = ?dropped.0.kind(), "event dropped, session closed");
                false
            }
        }
    }

    /// Whether the consumer side still exists.
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Consumer side of the queue, owned by the orchestrator.
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<TransportEvent>,
}

impl EventReceiver {
    /// Dequeue the next pending event without blocking.
    pub fn try_next(&mut self) -> Option<TransportEvent> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::LogLevel;

    #[test]
    fn test_drains_in_arrival_order() {
        let (tx, mut rx) = event_queue();
        tx.publish(TransportEvent::Connection { success: true });
        tx.publish(TransportEvent::Login { user_id: 7, username: "guest#7".into() });
        tx.publish(TransportEvent::Log { level: LogLevel::Info, message: "ok".into() });

        assert!(matches!(rx.try_next(), Some(TransportEvent::Connection { success: true })));
        assert!(matches!(rx.try_next(), Some(TransportEvent::Login { user_id: 7, .. })));
        assert!(matches!(rx.try_next(), Some(TransportEvent::Log { .. })));
        assert!(rx.try_next().is_none());
    }

    #[test]
    fn test_publish_after_receiver_dropped_reports_closed() {
        let (tx, rx) = event_queue();
        assert!(tx.is_open());
        drop(rx);
        assert!(!tx.is_open());
        assert!(!tx.publish(TransportEvent::Connection { success: false }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_publisher_is_usable_from_another_thread() {
        let (tx, mut rx) = event_queue();
        tokio::task::spawn_blocking(move || {
            for i in 0..64 {
                tx.publish(TransportEvent::PingPong { lag_ms: i });
            }
        })
        .await
        .unwrap();

        let mut seen = 0;
        while let Some(ev) = rx.try_next() {
            assert_eq!(ev, TransportEvent::PingPong { lag_ms: seen });
            seen += 1;
        }
        assert_eq!(seen, 64);
    }
}
