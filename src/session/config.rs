//! Connection configuration.

use serde::{Deserialize, Serialize};

use crate::core::constants;

/// Immutable description of one connection attempt.
///
/// Assembled once from host input, handed to the transport by
/// [`connect`](crate::session::SessionOrchestrator::connect) and never
/// mutated afterwards. All fields have working defaults for a local
/// development server; serde support lets hosts load it from a config
/// file instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Server host name or address.
    pub host: String,
    /// Primary port (protocol-dependent; TCP default is 9933).
    pub port: u16,
    /// HTTP port of the server's internal web server, used by the
    /// tunneled fallback transport.
    pub http_port: u16,
    /// HTTPS port, used to bootstrap protocol encryption on
    /// non-WebSocket connections.
    pub https_port: u16,
    /// Zone (server-side namespace) to log in to.
    pub zone: String,
    /// Room joined after a successful login.
    pub room: String,
    /// Negotiate protocol encryption after connecting.
    pub use_encryption: bool,
    /// Ask the transport for verbose internal logging.
    pub debug: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: constants::DEFAULT_PORT,
            http_port: constants::DEFAULT_HTTP_PORT,
            https_port: constants::DEFAULT_HTTPS_PORT,
            zone: constants::DEFAULT_ZONE.into(),
            room: constants::DEFAULT_ROOM.into(),
            use_encryption: false,
            debug: false,
        }
    }
}

impl SessionConfig {
    /// Start building a config for the given host.
    pub fn builder(host: impl Into<String>) -> SessionConfigBuilder {
        SessionConfigBuilder {
            config: SessionConfig { host: host.into(), ..SessionConfig::default() },
        }
    }
}

/// Builder for [`SessionConfig`].
#[derive(Debug)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the primary port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the HTTP fallback port.
    pub fn http_port(mut self, port: u16) -> Self {
        self.config.http_port = port;
        self
    }

    /// Set the HTTPS (encryption bootstrap) port.
    pub fn https_port(mut self, port: u16) -> Self {
        self.config.https_port = port;
        self
    }

    /// Set the zone to log in to.
    pub fn zone(mut self, zone: impl Into<String>) -> Self {
        self.config.zone = zone.into();
        self
    }

    /// Set the room joined after login.
    pub fn room(mut self, room: impl Into<String>) -> Self {
        self.config.room = room.into();
        self
    }

    /// Enable or disable protocol encryption.
    pub fn encryption(mut self, enabled: bool) -> Self {
        self.config.use_encryption = enabled;
        self
    }

    /// Enable or disable transport debug logging.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    /// Finish building.
    pub fn build(self) -> SessionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_server() {
        let config = SessionConfig::default();
        assert_eq!(config.port, 9933);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.https_port, 8443);
        assert_eq!(config.zone, "BasicExamples");
        assert_eq!(config.room, "The Lobby");
        assert!(!config.use_encryption);
    }

    #[test]
    fn test_builder_overrides_selected_fields() {
        let config = SessionConfig::builder("game.example.net")
            .port(8443)
            .zone("Arena")
            .encryption(true)
            .build();

        assert_eq!(config.host, "game.example.net");
        assert_eq!(config.port, 8443);
        assert_eq!(config.zone, "Arena");
        assert!(config.use_encryption);
        // Untouched fields keep their defaults.
        assert_eq!(config.room, "The Lobby");
    }

    #[test]
    fn test_roundtrips_through_json() {
        let config = SessionConfig::builder("h").encryption(true).build();
        let json = serde_json::to_string(&config).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
