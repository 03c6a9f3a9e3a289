//! # Roomlink
//!
//! Client-side session orchestration for room-based multiplayer
//! servers. Roomlink drives an opaque protocol transport through the
//! full session lifecycle and relays what happens to the hosting
//! application:
//!
//! - **Connect**: open the transport with a [`session::SessionConfig`]
//! - **Encrypt**: optionally negotiate protocol encryption first
//! - **Authenticate**: anonymous guest login
//! - **Join**: enter the configured default room
//! - **Relay**: chat, room-variable updates, extension responses, lag
//!   measurements and transport log lines, delivered as
//!   [`session::SessionNotification`]s
//!
//! The hard part, and the reason this crate exists, is the lifecycle
//! state machine: an ordered sequence of asynchronous handshake stages,
//! each able to fail independently, each cleaning up exactly the
//! observers it registered, all consumed on a single thread. The
//! transport's network thread never runs session logic; it enqueues
//! events that the host drains once per tick via
//! [`session::SessionOrchestrator::drain_events`].
//!
//! ## Modules
//!
//! - [`core`]: constants and error taxonomy
//! - [`transport`]: the transport-collaborator seam ([`transport::Transport`]
//!   trait, events, queue, [`transport::MockTransport`])
//! - [`session`]: the orchestrator and its supporting types
//!
//! ## Example
//!
//! ```
//! use roomlink::prelude::*;
//!
//! // MockTransport stands in for a real protocol client here.
//! let mut session = SessionOrchestrator::new(MockTransport::new());
//! session.connect(SessionConfig::builder("127.0.0.1").zone("BasicExamples").build())?;
//!
//! // Host tick: the transport answers, the next drain reacts to it.
//! session.transport().publish(TransportEvent::Connection { success: true });
//! for note in session.drain_events() {
//!     println!("{note:?}");
//! }
//! assert_eq!(session.state(), SessionState::Authenticating);
//! # Ok::<(), roomlink::core::SessionError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod session;
pub mod transport;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        AuthenticationError, EncryptionError, RoomJoinError, SessionError, TransportError,
    };
    pub use crate::session::{
        RoomMembership, SessionConfig, SessionNotification, SessionOrchestrator, SessionState,
        UserIdentity,
    };
    pub use crate::transport::{
        event_queue, EventKind, EventPublisher, EventReceiver, LogLevel, MockTransport, Request,
        Transport, TransportEvent,
    };
}

// Re-export the types nearly every host touches at the crate root.
pub use session::{SessionConfig, SessionNotification, SessionOrchestrator, SessionState};
pub use transport::{Transport, TransportEvent};
