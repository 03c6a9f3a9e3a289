//! Notifications the orchestrator reports to the host application.

use serde_json::Value;

use crate::core::{AuthenticationError, EncryptionError, RoomJoinError, TransportError};
use crate::transport::LogLevel;

/// Identity assigned by the server at login, present from
/// authentication until teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Server-assigned user id.
    pub user_id: u32,
    /// Display name the server settled on (guests get a generated one).
    pub username: String,
}

/// Membership of the joined room, present only while the session is
/// active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMembership {
    /// Server-side room id.
    pub room_id: u32,
    /// Room display name.
    pub room_name: String,
}

/// One host-visible effect of a drained event or an inbound call.
///
/// `drain_events` returns these in the order they were produced: one
/// per state transition plus the application relays and log lines.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionNotification {
    /// A connection attempt started.
    Connecting,
    /// The transport established the connection.
    Connected,
    /// The connection attempt failed; the session is back to idle.
    ConnectionFailed(TransportError),
    /// Protocol encryption is ready.
    EncryptionReady,
    /// The encryption handshake failed; the session is stalled in the
    /// awaiting-encryption stage for inspection.
    EncryptionFailed(EncryptionError),
    /// Login succeeded.
    Authenticated(UserIdentity),
    /// Login was rejected; the session is stalled in authenticating.
    AuthenticationFailed(AuthenticationError),
    /// The default room was joined; the session is now active.
    RoomJoined(RoomMembership),
    /// The room join was rejected; the session is stalled joining.
    RoomJoinFailed(RoomJoinError),
    /// The lag monitor measured a round trip.
    LagMeasured {
        /// Raw round-trip time in milliseconds.
        millis: u32,
    },
    /// The connection was lost and the session torn down.
    Disconnected {
        /// Transport-supplied reason.
        reason: String,
    },
    /// A server-side extension (RPC) responded.
    ExtensionResponse {
        /// Extension command name.
        command: String,
        /// Dynamic response parameters.
        params: Value,
    },
    /// A public chat message arrived in the joined room.
    PublicMessage {
        /// Sender display name.
        sender: String,
        /// Message text.
        message: String,
    },
    /// Room variables changed.
    RoomVariablesUpdated {
        /// Room the variables belong to.
        room_id: u32,
        /// Names of the variables that changed.
        changed: Vec<String>,
    },
    /// A line relayed from one of the transport's log channels.
    Log {
        /// Severity channel.
        level: LogLevel,
        /// Log text.
        message: String,
    },
}
