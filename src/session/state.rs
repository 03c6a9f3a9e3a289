//! Session lifecycle state.

use serde::{Deserialize, Serialize};

/// Where the session is in its connect-through-disconnect lifecycle.
///
/// The orchestrator owns exactly one of these and mutates it only while
/// dispatching drained events, so no state is ever read mid-transition.
/// `Authenticated`, `Failed` and `Disconnected` are pass-through values:
/// the machine emits their notification and moves on within the same
/// dispatch (`Authenticated` to `JoiningRoom`, the other two to `Idle`),
/// so `Idle` is the only resting not-connected state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// No connection attempt in progress.
    Idle,
    /// Transport connect issued, outcome pending.
    Connecting,
    /// Socket up, encryption handshake pending or stalled.
    ConnectedAwaitingEncryption,
    /// Login request sent, acknowledgment pending or stalled.
    Authenticating,
    /// Login acknowledged (pass-through).
    Authenticated,
    /// Join-room request sent, acknowledgment pending or stalled.
    JoiningRoom,
    /// Logged in and joined to the default room.
    Active,
    /// Connection attempt failed (pass-through to `Idle`).
    Failed,
    /// Established connection lost (pass-through to `Idle`).
    Disconnected,
}

impl SessionState {
    /// Whether a transport connection is live (or being established) in
    /// this state. Observer registrations exist exactly when this holds.
    pub fn is_connected(self) -> bool {
        !matches!(self, SessionState::Idle | SessionState::Failed | SessionState::Disconnected)
    }

    /// Whether a new `connect` call is accepted from this state.
    pub fn may_connect(self) -> bool {
        matches!(self, SessionState::Idle | SessionState::Failed | SessionState::Disconnected)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Connecting => "connecting",
            SessionState::ConnectedAwaitingEncryption => "connected, awaiting encryption",
            SessionState::Authenticating => "authenticating",
            SessionState::Authenticated => "authenticated",
            SessionState::JoiningRoom => "joining room",
            SessionState::Active => "active",
            SessionState::Failed => "failed",
            SessionState::Disconnected => "disconnected",
        };
        f.write_str(name)
    }
}
