//! The session orchestrator and its lifecycle state machine.

use tracing::{debug, error, info, trace, warn};

use crate::core::{
    AuthenticationError, EncryptionError, RoomJoinError, SessionError, TransportError,
};
use crate::transport::{event_queue, EventReceiver, LogLevel, Request, Transport, TransportEvent};

use super::config::SessionConfig;
use super::lag::LagMonitor;
use super::notification::{RoomMembership, SessionNotification, UserIdentity};
use super::observers::ObserverSet;
use super::state::SessionState;

/// Drives one transport through the session lifecycle: connect,
/// optional encryption, guest login, default-room join, then relay.
///
/// The orchestrator owns its transport exclusively and is single
/// threaded by construction: every state mutation happens inside
/// [`drain_events`](Self::drain_events), which the host must call at a
/// regular cadence (once per frame or tick) from one thread. The
/// transport's network thread only ever touches the event queue.
///
/// Stage failures (encryption, login, room join) are reported and leave
/// the session stalled in the failing stage so the host can see exactly
/// what broke; only loss of the connection itself tears the attempt
/// down and returns the machine to idle.
///
/// # Example
///
/// ```ignore
/// let mut session = SessionOrchestrator::new(transport);
/// session.connect(SessionConfig::builder("game.example.net").build())?;
///
/// loop {
///     for note in session.drain_events() {
///         match note {
///             SessionNotification::RoomJoined(room) => { /* … */ }
///             SessionNotification::Disconnected { .. } => return Ok(()),
///             _ => {}
///         }
///     }
///     // … render frame, sleep tick …
/// }
/// ```
#[derive(Debug)]
pub struct SessionOrchestrator<T: Transport> {
    transport: T,
    state: SessionState,
    config: Option<SessionConfig>,
    observers: ObserverSet,
    events: Option<EventReceiver>,
    identity: Option<UserIdentity>,
    membership: Option<RoomMembership>,
    lag: LagMonitor,
    pending: Vec<SessionNotification>,
}

impl<T: Transport> SessionOrchestrator<T> {
    /// Create an orchestrator owning `transport`. No connection is made
    /// until [`connect`](Self::connect).
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: SessionState::Idle,
            config: None,
            observers: ObserverSet::default(),
            events: None,
            identity: None,
            membership: None,
            lag: LagMonitor::default(),
            pending: Vec::new(),
        }
    }

    /// Start a connection attempt.
    ///
    /// Rejected without side effects while an attempt is in progress or
    /// a session is open; the orchestrator never holds two live
    /// connections. A synchronous transport error rolls the observer
    /// registration back and leaves the machine idle.
    pub fn connect(&mut self, config: SessionConfig) -> Result<(), SessionError> {
        if !self.state.may_connect() {
            return Err(SessionError::ConnectRejected(self.state));
        }

        self.observers.register(&mut self.transport)?;
        let (publisher, receiver) = event_queue();
        if let Err(err) = self.transport.connect(&config, publisher) {
            self.observers.teardown(&mut self.transport);
            return Err(err.into());
        }

        info!(host = %config.host, port = config.port, zone = %config.zone, "connecting");
        self.events = Some(receiver);
        self.config = Some(config);
        self.state = SessionState::Connecting;
        self.notify(SessionNotification::Connecting);
        Ok(())
    }

    /// Request disconnection.
    ///
    /// Fire and forget: teardown happens only when the transport
    /// reports the connection lost on a later drain, so a lost event
    /// racing this call cannot cause a double teardown.
    pub fn disconnect(&mut self) -> Result<(), SessionError> {
        if !self.state.is_connected() {
            return Err(SessionError::NoActiveSession);
        }
        debug!(state = %self.state, "disconnect requested");
        self.transport.disconnect();
        Ok(())
    }

    /// Ask for (or cancel) periodic round-trip measurement.
    ///
    /// The probe can only run on an authenticated session; a request
    /// made earlier is remembered and forwarded right after the next
    /// successful login.
    pub fn set_lag_monitoring(&mut self, enabled: bool) {
        let authenticated = matches!(
            self.state,
            SessionState::JoiningRoom | SessionState::Active
        );
        if self.lag.request(enabled, authenticated) {
            self.transport.set_lag_monitor(enabled);
        } else if enabled && !authenticated {
            debug!("lag monitor deferred until login succeeds");
        }
    }

    /// Dequeue and dispatch every event the transport published since
    /// the last drain, in arrival order, on the calling thread; then
    /// return the notifications those events (and any inbound calls
    /// since the last drain) produced.
    ///
    /// Dispatch is not reentrant: each event's transition, including
    /// its outbound request, completes before the next event is
    /// dequeued. The host must not call this from two threads.
    pub fn drain_events(&mut self) -> Vec<SessionNotification> {
        if let Some(mut receiver) = self.events.take() {
            while let Some(event) = receiver.try_next() {
                self.dispatch(event);
            }
            // Teardown during dispatch drops the queue for good.
            if self.observers.is_registered() {
                self.events = Some(receiver);
            }
        }
        std::mem::take(&mut self.pending)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Identity assigned at login, while authenticated.
    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    /// Membership of the joined room, while active.
    pub fn membership(&self) -> Option<&RoomMembership> {
        self.membership.as_ref()
    }

    /// Configuration of the attempt in progress, if any.
    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    /// Whether the session is fully up (logged in and joined).
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Smoothed round-trip time, once the lag monitor has samples.
    pub fn smoothed_lag_ms(&self) -> Option<f64> {
        self.lag.smoothed_ms()
    }

    /// The owned transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the owned transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // ── Event dispatch ──────────────────────────────────────────────

    fn dispatch(&mut self, event: TransportEvent) {
        trace!(kind = ?event.kind(), state = %self.state, "dispatching");
        match event {
            TransportEvent::Connection { success } => self.on_connection(success),
            TransportEvent::ConnectionLost { reason } => self.on_connection_lost(reason),
            TransportEvent::CryptoInit { success, error } => self.on_crypto_init(success, error),
            TransportEvent::Login { user_id, username } => self.on_login(user_id, username),
            TransportEvent::LoginError { error } => self.on_login_error(error),
            TransportEvent::PingPong { lag_ms } => self.on_ping_pong(lag_ms),
            TransportEvent::RoomJoin { room_id, room_name } => self.on_room_join(room_id, room_name),
            TransportEvent::RoomJoinError { error } => self.on_room_join_error(error),
            TransportEvent::ExtensionResponse { command, params } => {
                if self.guard_relay("extension response") {
                    self.notify(SessionNotification::ExtensionResponse { command, params });
                }
            }
            TransportEvent::PublicMessage { sender, message } => {
                if self.guard_relay("public message") {
                    self.notify(SessionNotification::PublicMessage { sender, message });
                }
            }
            TransportEvent::RoomVariablesUpdate { room_id, changed } => {
                if self.guard_relay("room variables") {
                    self.notify(SessionNotification::RoomVariablesUpdated { room_id, changed });
                }
            }
            TransportEvent::Log { level, message } => self.on_transport_log(level, message),
        }
    }

    fn on_connection(&mut self, success: bool) {
        if self.state != SessionState::Connecting {
            warn!(state = %self.state, "stale connection event ignored");
            return;
        }

        if !success {
            let err = TransportError::ConnectionFailed(
                "server refused the connection or did not answer".into(),
            );
            self.state = SessionState::Failed;
            self.notify(SessionNotification::ConnectionFailed(err));
            self.teardown_attempt();
            return;
        }

        self.notify(SessionNotification::Connected);
        let encrypted = self.config.as_ref().is_some_and(|c| c.use_encryption);
        if encrypted {
            self.state = SessionState::ConnectedAwaitingEncryption;
            if let Err(err) = self.transport.init_encryption() {
                // Stalls the attempt like an asynchronous handshake failure.
                self.notify(SessionNotification::EncryptionFailed(EncryptionError {
                    reason: err.to_string(),
                }));
            }
        } else {
            self.send_login();
            self.state = SessionState::Authenticating;
        }
    }

    fn on_crypto_init(&mut self, success: bool, error: Option<String>) {
        if self.state != SessionState::ConnectedAwaitingEncryption {
            warn!(state = %self.state, "stale crypto event ignored");
            return;
        }

        if success {
            self.notify(SessionNotification::EncryptionReady);
            self.send_login();
            self.state = SessionState::Authenticating;
        } else {
            // Connected but unauthenticated; terminal for this attempt.
            self.notify(SessionNotification::EncryptionFailed(EncryptionError {
                reason: error.unwrap_or_else(|| "unknown handshake failure".into()),
            }));
        }
    }

    fn on_login(&mut self, user_id: u32, username: String) {
        if self.state != SessionState::Authenticating {
            warn!(state = %self.state, "stale login event ignored");
            return;
        }

        let identity = UserIdentity { user_id, username };
        info!(user = %identity.username, id = identity.user_id, "logged in");
        self.identity = Some(identity.clone());
        self.state = SessionState::Authenticated;
        self.notify(SessionNotification::Authenticated(identity));

        let room = self
            .config
            .as_ref()
            .map(|c| c.room.clone())
            .unwrap_or_else(|| crate::core::constants::DEFAULT_ROOM.into());
        self.send_request(Request::JoinRoom { room });
        if self.lag.on_authenticated() {
            self.transport.set_lag_monitor(true);
        }
        self.state = SessionState::JoiningRoom;
    }

    fn on_login_error(&mut self, reason: String) {
        if self.state != SessionState::Authenticating {
            warn!(state = %self.state, "stale login-error event ignored");
            return;
        }
        // Connection stays open so the operator can see what failed.
        self.notify(SessionNotification::AuthenticationFailed(AuthenticationError { reason }));
    }

    fn on_ping_pong(&mut self, lag_ms: u32) {
        if !self.state.is_connected() {
            return;
        }
        self.lag.record(lag_ms);
        trace!(lag_ms, smoothed = ?self.lag.smoothed_ms(), "lag measured");
        self.notify(SessionNotification::LagMeasured { millis: lag_ms });
    }

    fn on_room_join(&mut self, room_id: u32, room_name: String) {
        if self.state != SessionState::JoiningRoom {
            warn!(state = %self.state, "stale room-join event ignored");
            return;
        }
        let membership = RoomMembership { room_id, room_name };
        info!(room = %membership.room_name, id = membership.room_id, "room joined");
        self.membership = Some(membership.clone());
        self.state = SessionState::Active;
        self.notify(SessionNotification::RoomJoined(membership));
    }

    fn on_room_join_error(&mut self, reason: String) {
        if self.state != SessionState::JoiningRoom {
            warn!(state = %self.state, "stale room-join-error event ignored");
            return;
        }
        self.notify(SessionNotification::RoomJoinFailed(RoomJoinError { reason }));
    }

    fn on_connection_lost(&mut self, reason: String) {
        if !self.state.is_connected() {
            // Teardown already ran for this attempt (e.g. an explicit
            // disconnect raced a heartbeat timeout).
            debug!("stale connection-lost event ignored");
            return;
        }
        info!(%reason, "connection lost");
        self.state = SessionState::Disconnected;
        self.notify(SessionNotification::Disconnected { reason });
        self.teardown_attempt();
    }

    fn on_transport_log(&mut self, level: LogLevel, message: String) {
        match level {
            LogLevel::Debug => debug!(target: "roomlink::transport", "{message}"),
            LogLevel::Info => info!(target: "roomlink::transport", "{message}"),
            LogLevel::Warn => warn!(target: "roomlink::transport", "{message}"),
            LogLevel::Error => error!(target: "roomlink::transport", "{message}"),
        }
        self.notify(SessionNotification::Log { level, message });
    }

    // ── Helpers ─────────────────────────────────────────────────────

    /// Application relays are only meaningful on a live session.
    fn guard_relay(&self, what: &str) -> bool {
        if self.state.is_connected() {
            true
        } else {
            warn!(state = %self.state, "{what} ignored, no session");
            false
        }
    }

    fn send_login(&mut self) {
        // Guest login: empty credential by policy.
        self.send_request(Request::Login { username: String::new() });
    }

    fn send_request(&mut self, request: Request) {
        if let Err(err) = self.transport.send(request) {
            // The transport will follow up with a connection-lost event
            // if the link is actually gone.
            error!(%err, "outbound request failed");
        }
    }

    /// Release everything created at connect, exactly once per attempt.
    fn teardown_attempt(&mut self) {
        self.observers.teardown(&mut self.transport);
        self.events = None;
        self.identity = None;
        self.membership = None;
        self.config = None;
        self.lag.reset();
        self.state = SessionState::Idle;
    }

    fn notify(&mut self, notification: SessionNotification) {
        debug!(?notification, "notify");
        self.pending.push(notification);
    }
}
