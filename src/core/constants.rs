//! Connection defaults shared by the orchestrator and its hosts.
//!
//! These mirror the conventional server setup: the primary socket port,
//! plus the HTTP/HTTPS ports of the server's internal web server, which
//! carries WebSocket traffic, tunneled HTTP-fallback traffic and the
//! encryption bootstrap alike.

// =============================================================================
// PORTS
// =============================================================================

/// Default primary (TCP) port.
pub const DEFAULT_PORT: u16 = 9933;

/// Default WebSocket port; equals the HTTP port by server convention.
pub const DEFAULT_WS_PORT: u16 = 8080;

/// Default secure-WebSocket port; equals the HTTPS port by server convention.
pub const DEFAULT_WSS_PORT: u16 = 8443;

/// Default HTTP port (tunneled fallback transport).
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default HTTPS port (encryption bootstrap on non-WebSocket connections).
pub const DEFAULT_HTTPS_PORT: u16 = 8443;

// =============================================================================
// NAMESPACES
// =============================================================================

/// Default server zone joined when the host supplies none.
pub const DEFAULT_ZONE: &str = "BasicExamples";

/// Default room requested after a successful login.
pub const DEFAULT_ROOM: &str = "The Lobby";
