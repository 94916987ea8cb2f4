use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::warn;

use crate::config::admission::{ADMISSION_WINDOW_SECS, MAX_ADMISSIONS_PER_WINDOW};

// Sweep stale source windows once the map grows past this many entries.
const SWEEP_THRESHOLD: usize = 1024;

/// Per-source fixed-window admission counter.
struct SourceWindow {
    started: Instant,
    admitted: u32,
}

/// Connection admission control, keyed by source address.
///
/// Each source gets MAX_ADMISSIONS_PER_WINDOW connection admissions per
/// ADMISSION_WINDOW_SECS window. Checked during the WebSocket handshake,
/// before any core state is created for the connection.
pub struct ConnectionLimiter {
    windows: HashMap<String, SourceWindow>,
}

impl ConnectionLimiter {
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
        }
    }

    /// Returns true if the connection from `source` is admitted.
    pub fn try_admit(&mut self, source: &str) -> bool {
        self.admit_at(source, Instant::now())
    }

    fn admit_at(&mut self, source: &str, now: Instant) -> bool {
        self.sweep(now);
        let window = self
            .windows
            .entry(source.to_string())
            .or_insert(SourceWindow {
                started: now,
                admitted: 0,
            });
        if now.duration_since(window.started) >= Duration::from_secs(ADMISSION_WINDOW_SECS) {
            window.started = now;
            window.admitted = 0;
        }
        if window.admitted >= MAX_ADMISSIONS_PER_WINDOW {
            warn!("[Admission] Rejected connection from source={source} (quota exhausted)");
            return false;
        }
        window.admitted += 1;
        true
    }

    /// Drop windows that have expired, but only once the map is large.
    fn sweep(&mut self, now: Instant) {
        if self.windows.len() > SWEEP_THRESHOLD {
            self.windows.retain(|_, w| {
                now.duration_since(w.started) < Duration::from_secs(ADMISSION_WINDOW_SECS)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_up_to_quota_then_rejects() {
        let mut limiter = ConnectionLimiter::new();
        for _ in 0..MAX_ADMISSIONS_PER_WINDOW {
            assert!(limiter.try_admit("10.0.0.1"));
        }
        assert!(!limiter.try_admit("10.0.0.1"));
    }

    #[test]
    fn sources_are_counted_independently() {
        let mut limiter = ConnectionLimiter::new();
        for _ in 0..MAX_ADMISSIONS_PER_WINDOW {
            assert!(limiter.try_admit("10.0.0.1"));
        }
        assert!(!limiter.try_admit("10.0.0.1"));
        assert!(limiter.try_admit("10.0.0.2"));
    }

    #[test]
    fn window_resets_after_expiry() {
        let mut limiter = ConnectionLimiter::new();
        let t0 = Instant::now();
        for _ in 0..MAX_ADMISSIONS_PER_WINDOW {
            assert!(limiter.admit_at("10.0.0.1", t0));
        }
        assert!(!limiter.admit_at("10.0.0.1", t0));
        let t1 = t0 + Duration::from_secs(ADMISSION_WINDOW_SECS + 1);
        assert!(limiter.admit_at("10.0.0.1", t1));
    }
}
