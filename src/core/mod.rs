//! Core constants and error types (always included).

pub mod constants;
mod error;

pub use error::{
    AuthenticationError, EncryptionError, RoomJoinError, SessionError, TransportError,
};
