//! Scriptable in-process transport for tests.
//!
//! [`MockTransport`] records every call the orchestrator makes and lets
//! the test (or a demo) play server: events pushed with
//! [`MockTransport::publish`] go through the same queue a real network
//! thread would use. Nothing here touches a socket.

use std::collections::HashSet;

use crate::core::TransportError;
use crate::session::SessionConfig;

use super::{EventKind, EventPublisher, Request, Transport, TransportEvent};

/// A transport double that records calls and replays scripted events.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Configs passed to `connect`, in call order.
    pub connects: Vec<SessionConfig>,
    /// Number of `disconnect` calls.
    pub disconnects: usize,
    /// Requests passed to `send`, in call order.
    pub sent: Vec<Request>,
    /// Number of `init_encryption` calls.
    pub crypto_inits: usize,
    /// Values passed to `set_lag_monitor`, in call order.
    pub lag_monitor_calls: Vec<bool>,
    /// Currently subscribed event kinds.
    pub observers: HashSet<EventKind>,
    /// Every kind ever passed to `add_observer`.
    pub observers_added: Vec<EventKind>,
    /// Every kind ever passed to `remove_observer`.
    pub observers_removed: Vec<EventKind>,

    /// Scripted synchronous failure for the next `connect` call.
    pub fail_next_connect: Option<TransportError>,
    /// Scripted synchronous failure for the next `send` call.
    pub fail_next_send: Option<TransportError>,

    publisher: Option<EventPublisher>,
}

impl MockTransport {
    /// Create a mock with no scripted behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an event as the fake network thread.
    ///
    /// Honors the subscription filter a real transport would apply:
    /// events for unobserved kinds are silently dropped. Returns `true`
    /// if the event was enqueued.
    pub fn publish(&self, event: TransportEvent) -> bool {
        if !self.observers.contains(&event.kind()) {
            return false;
        }
        match &self.publisher {
            Some(publisher) => publisher.publish(event),
            None => false,
        }
    }

    /// The publisher handed over by the last `connect`, if any.
    pub fn publisher(&self) -> Option<EventPublisher> {
        self.publisher.clone()
    }

    /// Whether a kind is currently subscribed.
    pub fn is_observed(&self, kind: EventKind) -> bool {
        self.observers.contains(&kind)
    }
}

impl Transport for MockTransport {
    fn connect(
        &mut self,
        config: &SessionConfig,
        events: EventPublisher,
    ) -> Result<(), TransportError> {
        if let Some(err) = self.fail_next_connect.take() {
            return Err(err);
        }
        self.connects.push(config.clone());
        self.publisher = Some(events);
        Ok(())
    }

    fn disconnect(&mut self) {
        self.disconnects += 1;
    }

    fn send(&mut self, request: Request) -> Result<(), TransportError> {
        if let Some(err) = self.fail_next_send.take() {
            return Err(err);
        }
        self.sent.push(request);
        Ok(())
    }

    fn init_encryption(&mut self) -> Result<(), TransportError> {
        self.crypto_inits += 1;
        Ok(())
    }

    fn set_lag_monitor(&mut self, enabled: bool) {
        self.lag_monitor_calls.push(enabled);
    }

    fn add_observer(&mut self, kind: EventKind) {
        self.observers.insert(kind);
        self.observers_added.push(kind);
    }

    fn remove_observer(&mut self, kind: EventKind) {
        self.observers.remove(&kind);
        self.observers_removed.push(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::event_queue;

    #[test]
    fn test_publish_respects_subscription_filter() {
        let mut mock = MockTransport::new();
        let (publisher, mut rx) = event_queue();
        mock.connect(&SessionConfig::default(), publisher).unwrap();

        // Not subscribed yet: dropped.
        assert!(!mock.publish(TransportEvent::Connection { success: true }));
        assert!(rx.try_next().is_none());

        mock.add_observer(EventKind::Connection);
        assert!(mock.publish(TransportEvent::Connection { success: true }));
        assert!(rx.try_next().is_some());
    }

    #[test]
    fn test_scripted_connect_failure_fires_once() {
        let mut mock = MockTransport::new();
        mock.fail_next_connect = Some(TransportError::ConnectionFailed("refused".into()));

        let (publisher, _rx) = event_queue();
        assert!(mock.connect(&SessionConfig::default(), publisher).is_err());
        assert!(mock.connects.is_empty());

        let (publisher, _rx) = event_queue();
        assert!(mock.connect(&SessionConfig::default(), publisher).is_ok());
        assert_eq!(mock.connects.len(), 1);
    }
}
