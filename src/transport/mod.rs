//! The transport collaborator seam.
//!
//! Roomlink does not implement a wire protocol. It drives an opaque
//! transport client through the [`Transport`] trait and reacts to the
//! events that client publishes:
//!
//! - **Outbound**: [`Request`] values plus the lifecycle calls
//!   (`connect`, `disconnect`, `init_encryption`, `set_lag_monitor`)
//! - **Inbound**: [`TransportEvent`]s queued by the transport's network
//!   thread and drained by the consumer (see [`event_queue`])
//! - **Subscription**: per-[`EventKind`] observer add/remove, so the
//!   transport only publishes channels somebody listens to
//!
//! [`MockTransport`] is a scriptable in-process implementation intended
//! for host-application tests.

mod event;
pub mod mock;
mod queue;

pub use event::{EventKind, LogLevel, TransportEvent};
pub use mock::MockTransport;
pub use queue::{event_queue, EventPublisher, EventReceiver};

use crate::core::TransportError;
use crate::session::SessionConfig;

/// An outbound request the session issues over an open connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Log in to the configured zone. An empty username is a guest login.
    Login {
        /// Credential; empty for the anonymous/guest path.
        username: String,
    },
    /// Join a room by name.
    JoinRoom {
        /// Room display name.
        room: String,
    },
}

/// The opaque protocol client the orchestrator drives.
///
/// # Requirements
///
/// - `connect` MUST NOT block; the outcome arrives later as a
///   [`TransportEvent::Connection`] on the supplied publisher
/// - `disconnect` is fire-and-forget; an eventual
///   [`TransportEvent::ConnectionLost`] confirms the teardown
/// - events MUST be published in the order they occurred
/// - only subscribed [`EventKind`]s may be published
pub trait Transport {
    /// Open a connection described by `config`, publishing events for
    /// this attempt through `events`.
    fn connect(
        &mut self,
        config: &SessionConfig,
        events: EventPublisher,
    ) -> Result<(), TransportError>;

    /// Request connection close. Completion is signaled by a
    /// connection-lost event, never synchronously.
    fn disconnect(&mut self);

    /// Hand an outbound request to the wire.
    fn send(&mut self, request: Request) -> Result<(), TransportError>;

    /// Start the encryption handshake. Resolution arrives as a
    /// [`TransportEvent::CryptoInit`], possibly several drains later.
    fn init_encryption(&mut self) -> Result<(), TransportError>;

    /// Enable or disable the periodic round-trip probe.
    fn set_lag_monitor(&mut self, enabled: bool);

    /// Subscribe to one event channel.
    fn add_observer(&mut self, kind: EventKind);

    /// Unsubscribe from one event channel.
    fn remove_observer(&mut self, kind: EventKind);
}
