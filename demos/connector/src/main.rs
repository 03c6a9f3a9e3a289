//! Headless auto-connecting deployment of the roomlink orchestrator.
//!
//! Connects to the scripted loopback server, walks the full lifecycle
//! (encryption, guest login, lobby join), watches lag measurements for
//! a while, then disconnects cleanly. Run with:
//!
//! ```text
//! cargo run -p roomlink-connector
//! ```

mod loopback;

use std::time::Duration;

use anyhow::Result;
use roomlink::prelude::*;
use tracing::info;

use crate::loopback::LoopbackTransport;

/// How long the session stays active before disconnecting.
const SESSION_RUNTIME: Duration = Duration::from_secs(2);

/// Host tick cadence; every tick drains pending transport events.
const TICK: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,roomlink=debug".into()),
        )
        .init();

    let mut session = SessionOrchestrator::new(LoopbackTransport::new());
    session.set_lag_monitoring(true);
    session.connect(
        SessionConfig::builder("127.0.0.1")
            .zone("BasicExamples")
            .room("The Lobby")
            .encryption(true)
            .build(),
    )?;

    let mut ticker = tokio::time::interval(TICK);
    let mut active_since = None;

    loop {
        ticker.tick().await;

        for note in session.drain_events() {
            match note {
                SessionNotification::Connecting => info!("connecting..."),
                SessionNotification::Connected => info!("connection established"),
                SessionNotification::EncryptionReady => info!("encryption initialized"),
                SessionNotification::Authenticated(user) => {
                    info!(user = %user.username, id = user.user_id, "logged in");
                }
                SessionNotification::RoomJoined(room) => {
                    info!(room = %room.room_name, id = room.room_id, "joined");
                    active_since = Some(tokio::time::Instant::now());
                }
                SessionNotification::LagMeasured { millis } => {
                    info!(millis, smoothed = ?session.smoothed_lag_ms(), "lag");
                }
                SessionNotification::PublicMessage { sender, message } => {
                    info!("[{sender}] {message}");
                }
                SessionNotification::Log { level, message } => {
                    info!("[transport > {level}] {message}");
                }
                SessionNotification::Disconnected { reason } => {
                    info!(%reason, "session closed");
                    return Ok(());
                }
                SessionNotification::ConnectionFailed(err) => {
                    anyhow::bail!("connection failed: {err}");
                }
                SessionNotification::EncryptionFailed(err) => {
                    anyhow::bail!("encryption failed: {err}");
                }
                SessionNotification::AuthenticationFailed(err) => {
                    anyhow::bail!("login failed: {err}");
                }
                SessionNotification::RoomJoinFailed(err) => {
                    anyhow::bail!("room join failed: {err}");
                }
                other => info!(?other, "notification"),
            }
        }

        if session.is_active()
            && active_since.is_some_and(|since| since.elapsed() >= SESSION_RUNTIME)
        {
            info!("runtime elapsed, disconnecting");
            session.disconnect()?;
            // Drop the marker so disconnect is only requested once.
            active_since = None;
        }
    }
}
