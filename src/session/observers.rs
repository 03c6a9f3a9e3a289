//! Observer registration bookkeeping.
//!
//! The orchestrator subscribes to a fixed set of transport event
//! channels when a connection attempt starts and must remove exactly
//! that set when the attempt tears down. The pairing is load-bearing:
//! a missed removal leaks handlers into the next attempt (duplicate
//! dispatch), a second removal is a caller bug on real transports.
//! `ObserverSet` makes the pairing explicit state: register rejects
//! duplicates, teardown is idempotent.

use tracing::debug;

use crate::core::SessionError;
use crate::transport::{EventKind, LogLevel, Transport};

/// Every channel the session listens on: the eight lifecycle kinds,
/// three application-relay kinds and four log severities.
pub const OBSERVED_KINDS: [EventKind; 15] = [
    EventKind::Connection,
    EventKind::ConnectionLost,
    EventKind::CryptoInit,
    EventKind::Login,
    EventKind::LoginError,
    EventKind::PingPong,
    EventKind::RoomJoin,
    EventKind::RoomJoinError,
    EventKind::ExtensionResponse,
    EventKind::PublicMessage,
    EventKind::RoomVariablesUpdate,
    EventKind::Log(LogLevel::Debug),
    EventKind::Log(LogLevel::Info),
    EventKind::Log(LogLevel::Warn),
    EventKind::Log(LogLevel::Error),
];

/// Tracks whether the fixed observer set is currently attached.
#[derive(Debug, Default)]
pub(crate) struct ObserverSet {
    registered: bool,
}

impl ObserverSet {
    /// Attach all observed kinds to the transport.
    ///
    /// Registering twice without an intervening teardown is a
    /// programming error: rejected, with a debug assertion.
    pub fn register<T: Transport>(&mut self, transport: &mut T) -> Result<(), SessionError> {
        if self.registered {
            debug_assert!(false, "observer set registered twice");
            return Err(SessionError::ObserversAlreadyRegistered);
        }
        for kind in OBSERVED_KINDS {
            transport.add_observer(kind);
        }
        self.registered = true;
        Ok(())
    }

    /// Detach all observed kinds. Safe to call any number of times;
    /// only the first call after a registration touches the transport.
    pub fn teardown<T: Transport>(&mut self, transport: &mut T) {
        if !self.registered {
            return;
        }
        for kind in OBSERVED_KINDS {
            transport.remove_observer(kind);
        }
        self.registered = false;
        debug!("transport observers removed");
    }

    /// Whether the set is currently attached.
    pub fn is_registered(&self) -> bool {
        self.registered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    #[test]
    fn test_register_and_teardown_are_paired() {
        let mut transport = MockTransport::new();
        let mut observers = ObserverSet::default();

        observers.register(&mut transport).unwrap();
        assert!(observers.is_registered());
        assert_eq!(transport.observers_added.len(), OBSERVED_KINDS.len());
        assert_eq!(transport.observers.len(), OBSERVED_KINDS.len());

        observers.teardown(&mut transport);
        assert!(!observers.is_registered());
        assert_eq!(transport.observers_removed.len(), OBSERVED_KINDS.len());
        assert!(transport.observers.is_empty());
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut transport = MockTransport::new();
        let mut observers = ObserverSet::default();

        observers.register(&mut transport).unwrap();
        observers.teardown(&mut transport);
        observers.teardown(&mut transport);
        observers.teardown(&mut transport);

        // Exactly one removal pass.
        assert_eq!(transport.observers_removed.len(), OBSERVED_KINDS.len());
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_double_register_is_rejected() {
        let mut transport = MockTransport::new();
        let mut observers = ObserverSet::default();

        observers.register(&mut transport).unwrap();
        assert_eq!(
            observers.register(&mut transport),
            Err(SessionError::ObserversAlreadyRegistered)
        );
        // No duplicate subscriptions reached the transport.
        assert_eq!(transport.observers_added.len(), OBSERVED_KINDS.len());
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    #[cfg(debug_assertions)]
    fn test_double_register_asserts_in_debug_builds() {
        let mut transport = MockTransport::new();
        let mut observers = ObserverSet::default();
        observers.register(&mut transport).unwrap();
        let _ = observers.register(&mut transport);
    }

    #[test]
    fn test_registration_allowed_again_after_teardown() {
        let mut transport = MockTransport::new();
        let mut observers = ObserverSet::default();

        observers.register(&mut transport).unwrap();
        observers.teardown(&mut transport);
        observers.register(&mut transport).unwrap();
        assert!(observers.is_registered());
    }
}
