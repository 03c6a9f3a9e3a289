//! Lag monitoring.
//!
//! The transport's round-trip probe reports raw millisecond samples.
//! Those are relayed to the host unmodified; `LagMonitor` additionally
//! keeps an exponentially weighted moving average as a diagnostic, the
//! same smoothing shape RTT estimators use, without the retransmission
//! machinery none of this layer needs.

/// Weight of a new sample in the smoothed average (1/8, the classic
/// SRTT alpha).
const SAMPLE_ALPHA: f64 = 0.125;

/// Tracks the host's lag-monitoring request and smooths samples.
#[derive(Debug, Default)]
pub struct LagMonitor {
    /// Whether the host asked for monitoring.
    requested: bool,
    /// Whether the request has been forwarded to the transport
    /// (possible only once authenticated).
    active: bool,
    /// Smoothed round-trip time in milliseconds.
    smoothed_ms: Option<f64>,
}

impl LagMonitor {
    /// Record the host's wish. Returns `true` if the transport should
    /// be told now, which requires `authenticated`.
    pub fn request(&mut self, enabled: bool, authenticated: bool) -> bool {
        self.requested = enabled;
        if !enabled {
            let was_active = self.active;
            self.active = false;
            return was_active;
        }
        if authenticated && !self.active {
            self.active = true;
            return true;
        }
        false
    }

    /// Called on login success: returns `true` if a pending request
    /// should now be forwarded to the transport.
    pub fn on_authenticated(&mut self) -> bool {
        if self.requested && !self.active {
            self.active = true;
            true
        } else {
            false
        }
    }

    /// Fold a new sample into the smoothed average.
    pub fn record(&mut self, lag_ms: u32) {
        let sample = f64::from(lag_ms);
        self.smoothed_ms = Some(match self.smoothed_ms {
            None => sample,
            Some(prev) => (1.0 - SAMPLE_ALPHA) * prev + SAMPLE_ALPHA * sample,
        });
    }

    /// Smoothed round-trip time, if any sample arrived yet.
    pub fn smoothed_ms(&self) -> Option<f64> {
        self.smoothed_ms
    }

    /// Whether monitoring is currently forwarded to the transport.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Reset everything except the host's standing request, so a
    /// reconnect re-enables monitoring after the next login.
    pub fn reset(&mut self) {
        self.active = false;
        self.smoothed_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_before_login_is_deferred() {
        let mut lag = LagMonitor::default();
        assert!(!lag.request(true, false));
        assert!(!lag.is_active());

        // Login succeeds: the pending request fires exactly once.
        assert!(lag.on_authenticated());
        assert!(lag.is_active());
        assert!(!lag.on_authenticated());
    }

    #[test]
    fn test_request_after_login_fires_immediately() {
        let mut lag = LagMonitor::default();
        assert!(lag.request(true, true));
        assert!(lag.is_active());
    }

    #[test]
    fn test_disable_reports_whether_transport_must_be_told() {
        let mut lag = LagMonitor::default();
        assert!(lag.request(true, true));
        assert!(lag.request(false, true));
        // Already off: nothing to forward.
        assert!(!lag.request(false, true));
    }

    #[test]
    fn test_smoothing_moves_toward_new_samples() {
        let mut lag = LagMonitor::default();
        lag.record(100);
        assert_eq!(lag.smoothed_ms(), Some(100.0));

        lag.record(200);
        let smoothed = lag.smoothed_ms().unwrap();
        assert!(smoothed > 100.0 && smoothed < 200.0);
    }

    #[test]
    fn test_reset_keeps_the_standing_request() {
        let mut lag = LagMonitor::default();
        lag.request(true, true);
        lag.record(40);
        lag.reset();

        assert!(!lag.is_active());
        assert_eq!(lag.smoothed_ms(), None);
        // The request survives teardown: next login re-enables.
        assert!(lag.on_authenticated());
    }
}
