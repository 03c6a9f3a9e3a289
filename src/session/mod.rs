//! Session orchestration.
//!
//! [`SessionOrchestrator`] owns one transport and walks it through the
//! lifecycle: connect, optional encryption handshake, guest login,
//! default-room join, and the active relay phase. Supporting types live
//! alongside it:
//!
//! - [`SessionConfig`]: immutable per-attempt connection parameters
//! - [`SessionState`]: the single source of truth for lifecycle position
//! - [`SessionNotification`]: what the host sees from `drain_events`
//! - [`UserIdentity`] / [`RoomMembership`]: per-attempt session data
//! - [`LagMonitor`]: round-trip probe request tracking and smoothing

mod config;
mod lag;
mod notification;
pub(crate) mod observers;
mod orchestrator;
mod state;

pub use config::{SessionConfig, SessionConfigBuilder};
pub use lag::LagMonitor;
pub use notification::{RoomMembership, SessionNotification, UserIdentity};
pub use orchestrator::SessionOrchestrator;
pub use state::SessionState;
