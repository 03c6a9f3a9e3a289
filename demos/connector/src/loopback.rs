//! A scripted loopback transport.
//!
//! Plays the server side of a session without any networking: every
//! lifecycle call schedules the matching acknowledgment events on a
//! background thread, so the orchestrator sees the same producer/
//! consumer shape a real protocol client would give it. Useful for
//! demos and for exercising hosts end to end.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use roomlink::prelude::*;

/// Simulated one-way network delay.
const LINK_DELAY: Duration = Duration::from_millis(40);

/// Interval between simulated lag-monitor round trips.
const PING_INTERVAL: Duration = Duration::from_millis(250);

/// In-process stand-in for a protocol client, scripted to accept
/// everything: connections succeed, the crypto handshake completes,
/// guest logins are assigned an id, and room joins land in the
/// requested room.
pub struct LoopbackTransport {
    publisher: Option<EventPublisher>,
    observers: HashSet<EventKind>,
    zone: String,
    room_seq: u32,
    lag_running: Arc<AtomicBool>,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self {
            publisher: None,
            observers: HashSet::new(),
            zone: String::new(),
            room_seq: 0,
            lag_running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Schedule `events` for publication after the simulated delay,
    /// honoring the subscription filter as of now.
    fn reply_with(&self, events: Vec<TransportEvent>) {
        let Some(publisher) = self.publisher.clone() else {
            return;
        };
        let allowed = self.observers.clone();
        thread::spawn(move || {
            thread::sleep(LINK_DELAY);
            for event in events {
                if allowed.contains(&event.kind()) {
                    publisher.publish(event);
                }
            }
        });
    }
}

impl Default for LoopbackTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for LoopbackTransport {
    fn connect(
        &mut self,
        config: &SessionConfig,
        events: EventPublisher,
    ) -> Result<(), TransportError> {
        self.publisher = Some(events);
        self.zone = config.zone.clone();
        self.reply_with(vec![
            TransportEvent::Log {
                level: LogLevel::Info,
                message: format!("socket open to {}:{}", config.host, config.port),
            },
            TransportEvent::Connection { success: true },
        ]);
        Ok(())
    }

    fn disconnect(&mut self) {
        self.lag_running.store(false, Ordering::Relaxed);
        self.reply_with(vec![TransportEvent::ConnectionLost {
            reason: "client disconnect".into(),
        }]);
    }

    fn send(&mut self, request: Request) -> Result<(), TransportError> {
        match request {
            Request::Login { username } => {
                let username = if username.is_empty() {
                    "guest#1".to_string()
                } else {
                    username
                };
                self.reply_with(vec![
                    TransportEvent::Log {
                        level: LogLevel::Debug,
                        message: format!("login accepted in zone {}", self.zone),
                    },
                    TransportEvent::Login { user_id: 1, username },
                ]);
            }
            Request::JoinRoom { room } => {
                self.room_seq += 1;
                self.reply_with(vec![
                    TransportEvent::RoomJoin { room_id: self.room_seq, room_name: room.clone() },
                    TransportEvent::PublicMessage {
                        sender: "server".into(),
                        message: format!("welcome to {room}"),
                    },
                ]);
            }
        }
        Ok(())
    }

    fn init_encryption(&mut self) -> Result<(), TransportError> {
        self.reply_with(vec![TransportEvent::CryptoInit { success: true, error: None }]);
        Ok(())
    }

    fn set_lag_monitor(&mut self, enabled: bool) {
        self.lag_running.store(enabled, Ordering::Relaxed);
        if !enabled {
            return;
        }
        let Some(publisher) = self.publisher.clone() else {
            return;
        };
        let running = Arc::clone(&self.lag_running);
        thread::spawn(move || {
            let mut lag = 35u32;
            while running.load(Ordering::Relaxed) && publisher.is_open() {
                thread::sleep(PING_INTERVAL);
                // Wander a little so the smoothing has work to do.
                lag = 20 + (lag * 7 + 13) % 40;
                publisher.publish(TransportEvent::PingPong { lag_ms: lag });
            }
        });
    }

    fn add_observer(&mut self, kind: EventKind) {
        self.observers.insert(kind);
    }

    fn remove_observer(&mut self, kind: EventKind) {
        self.observers.remove(&kind);
    }
}
