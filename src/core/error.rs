//! Error types for roomlink.
//!
//! Two distinct classes live here. The remote class (`TransportError`,
//! `EncryptionError`, `AuthenticationError`, `RoomJoinError`) carries
//! reason strings reported by the transport layer or the remote peer;
//! these are surfaced as notifications and are never fatal. The local
//! class (`SessionError`) is returned synchronously when the host
//! application used the orchestrator outside its contract.

use thiserror::Error;

use crate::session::SessionState;

/// Errors originating in the transport layer itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The initial connection attempt was refused or timed out.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// An established connection was lost.
    #[error("connection lost: {0}")]
    ConnectionLost(String),

    /// An outbound request could not be handed to the transport.
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Encryption handshake failure reported by the transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("encryption initialization failed: {reason}")]
pub struct EncryptionError {
    /// Reason string supplied by the transport.
    pub reason: String,
}

/// Login rejected by the server.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("login failed: {reason}")]
pub struct AuthenticationError {
    /// Reason string supplied by the server.
    pub reason: String,
}

/// Room join rejected by the server (full, missing, access denied).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("room join failed: {reason}")]
pub struct RoomJoinError {
    /// Reason string supplied by the server.
    pub reason: String,
}

/// Local programming errors: the host application used the orchestrator
/// outside its contract. These indicate a bug in the caller, not a
/// network condition, and never leave side effects behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `connect` called while a session is already open or in progress.
    #[error("connect rejected: session is {0}")]
    ConnectRejected(SessionState),

    /// `disconnect` called with no session in progress.
    #[error("disconnect rejected: no active session")]
    NoActiveSession,

    /// Observer registration requested while already registered.
    #[error("observers already registered for this attempt")]
    ObserversAlreadyRegistered,

    /// The transport rejected a call synchronously.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
