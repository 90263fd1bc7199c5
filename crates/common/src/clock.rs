//! Recording clock.
//!
//! A recording is anchored to a monotonic epoch captured when the engine
//! reports capture has begun. The wall-clock time at that moment is kept
//! alongside for status reporting.

use std::time::Instant;

/// Monotonic timestamps relative to the moment a recording started.
#[derive(Debug, Clone)]
pub struct RecordingClock {
    epoch: Instant,
    epoch_wall: String,
}

impl RecordingClock {
    /// Create a new recording clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Get seconds elapsed since recording start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at recording start (RFC 3339).
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = RecordingClock::start();
        assert!(clock.elapsed_secs() < 1.0);
    }

    #[test]
    fn test_epoch_wall_is_rfc3339() {
        let clock = RecordingClock::start();
        assert!(chrono::DateTime::parse_from_rfc3339(clock.epoch_wall()).is_ok());
    }
}
