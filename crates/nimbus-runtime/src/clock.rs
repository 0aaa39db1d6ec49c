//! Tick clock for fixed-cadence loops

use std::time::{Duration, Instant};

/// Measures the real time between loop ticks and how long to sleep
/// before the next one
pub struct TickClock {
    /// Total elapsed time across all ticks in milliseconds
    pub total_ms: f64,
    /// Real time since the previous tick in milliseconds
    pub delta_ms: f64,
    /// Target interval between tick starts
    pub interval: Duration,
    /// Start of the previous tick
    last_instant: Instant,
}

impl TickClock {
    /// Create a clock whose first tick is measured from now
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, start: Instant) -> Self {
        Self {
            total_ms: 0.0,
            delta_ms: 0.0,
            interval,
            last_instant: start,
        }
    }

    /// Advance the clock. Call once at the start of every tick.
    /// Returns the real elapsed milliseconds since the previous tick.
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f64 {
        // Instants are monotonic, but saturate anyway
        let elapsed = now.saturating_duration_since(self.last_instant);
        self.last_instant = now;
        self.delta_ms = elapsed.as_secs_f64() * 1000.0;
        self.total_ms += self.delta_ms;
        self.delta_ms
    }

    /// Time left in the current interval, measured from the last tick
    pub fn remaining(&self) -> Duration {
        self.remaining_at(Instant::now())
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_instant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_measures_from_start() {
        let start = Instant::now();
        let mut clock = TickClock::starting_at(Duration::from_millis(16), start);
        let dt = clock.tick_at(start + Duration::from_millis(20));
        assert!((dt - 20.0).abs() < 1e-6);
        assert!((clock.total_ms - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_delta_is_real_interval() {
        let start = Instant::now();
        let mut clock = TickClock::starting_at(Duration::from_millis(16), start);
        clock.tick_at(start + Duration::from_millis(16));
        let dt = clock.tick_at(start + Duration::from_millis(49));
        assert!((dt - 33.0).abs() < 1e-6);
        assert!((clock.total_ms - 49.0).abs() < 1e-6);
    }

    #[test]
    fn test_remaining_saturates() {
        let start = Instant::now();
        let clock = TickClock::starting_at(Duration::from_millis(16), start);
        assert_eq!(
            clock.remaining_at(start + Duration::from_millis(6)),
            Duration::from_millis(10)
        );
        assert_eq!(
            clock.remaining_at(start + Duration::from_millis(40)),
            Duration::ZERO
        );
    }
}
