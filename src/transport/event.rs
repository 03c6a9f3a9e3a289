//! Inbound events published by the transport's network thread.
//!
//! Event kinds and payload fields follow the server's event dictionary:
//! a boolean `success` on connection/crypto events, a `reason` on
//! connection loss, an `errorMessage` on stage failures, and so on.
//! [`TransportEvent`] carries those payloads as typed fields;
//! [`EventKind`] is the key the orchestrator subscribes with.

use serde_json::Value;

/// Severity channels of the transport's internal logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Verbose wire-level detail.
    Debug,
    /// Normal operational messages.
    Info,
    /// Recoverable anomalies.
    Warn,
    /// Failures.
    Error,
}

impl LogLevel {
    /// All severities, in ascending order.
    pub const ALL: [LogLevel; 4] =
        [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error];
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Subscription key for one transport event channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Connection attempt resolved (success or failure).
    Connection,
    /// Established connection dropped.
    ConnectionLost,
    /// Encryption handshake resolved.
    CryptoInit,
    /// Login accepted.
    Login,
    /// Login rejected.
    LoginError,
    /// Lag-monitor round trip measured.
    PingPong,
    /// Room join accepted.
    RoomJoin,
    /// Room join rejected.
    RoomJoinError,
    /// Server-side extension (RPC) response.
    ExtensionResponse,
    /// Public chat message in a joined room.
    PublicMessage,
    /// Room variables changed.
    RoomVariablesUpdate,
    /// One of the transport's log severity channels.
    Log(LogLevel),
}

/// An event dequeued from the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Connection attempt resolved.
    Connection {
        /// Whether the socket was established.
        success: bool,
    },
    /// Established connection dropped.
    ConnectionLost {
        /// Transport-supplied reason (e.g. heartbeat timeout).
        reason: String,
    },
    /// Encryption handshake resolved.
    CryptoInit {
        /// Whether the handshake completed.
        success: bool,
        /// Failure detail when `success` is false.
        error: Option<String>,
    },
    /// Login accepted by the server.
    Login {
        /// Server-assigned user id.
        user_id: u32,
        /// Display name the server settled on.
        username: String,
    },
    /// Login rejected by the server.
    LoginError {
        /// Server-supplied reason.
        error: String,
    },
    /// Lag-monitor round trip measured.
    PingPong {
        /// Round-trip time in milliseconds.
        lag_ms: u32,
    },
    /// Room join accepted.
    RoomJoin {
        /// Server-side room id.
        room_id: u32,
        /// Room display name.
        room_name: String,
    },
    /// Room join rejected.
    RoomJoinError {
        /// Server-supplied reason.
        error: String,
    },
    /// Server-side extension (RPC) response.
    ExtensionResponse {
        /// Extension command name.
        command: String,
        /// Dynamic response parameters.
        params: Value,
    },
    /// Public chat message in a joined room.
    PublicMessage {
        /// Sender display name.
        sender: String,
        /// Message text.
        message: String,
    },
    /// Room variables changed.
    RoomVariablesUpdate {
        /// Room the variables belong to.
        room_id: u32,
        /// Names of the variables that changed.
        changed: Vec<String>,
    },
    /// A line from one of the transport's log channels.
    Log {
        /// Severity channel.
        level: LogLevel,
        /// Log text.
        message: String,
    },
}

impl TransportEvent {
    /// The subscription kind this event is delivered under.
    pub fn kind(&self) -> EventKind {
        match self {
            TransportEvent::Connection { .. } => EventKind::Connection,
            TransportEvent::ConnectionLost { .. } => EventKind::ConnectionLost,
            TransportEvent::CryptoInit { .. } => EventKind::CryptoInit,
            TransportEvent::Login { .. } => EventKind::Login,
            TransportEvent::LoginError { .. } => EventKind::LoginError,
            TransportEvent::PingPong { .. } => EventKind::PingPong,
            TransportEvent::RoomJoin { .. } => EventKind::RoomJoin,
            TransportEvent::RoomJoinError { .. } => EventKind::RoomJoinError,
            TransportEvent::ExtensionResponse { .. } => EventKind::ExtensionResponse,
            TransportEvent::PublicMessage { .. } => EventKind::PublicMessage,
            TransportEvent::RoomVariablesUpdate { .. } => EventKind::RoomVariablesUpdate,
            TransportEvent::Log { level, .. } => EventKind::Log(*level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_maps_to_its_kind() {
        let ev = TransportEvent::ConnectionLost { reason: "timeout".into() };
        assert_eq!(ev.kind(), EventKind::ConnectionLost);

        let ev = TransportEvent::Log { level: LogLevel::Warn, message: "slow".into() };
        assert_eq!(ev.kind(), EventKind::Log(LogLevel::Warn));
    }

    #[test]
    fn test_log_levels_display_as_channel_names() {
        let names: Vec<String> = LogLevel::ALL.iter().map(|l| l.to_string()).collect();
        assert_eq!(names, ["DEBUG", "INFO", "WARN", "ERROR"]);
    }
}
