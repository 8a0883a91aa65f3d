//! Once-per-second tick source for screen countdowns.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Drives a [`Countdown`](crate::domain::Countdown) owned by a screen.
///
/// The first tick fires one period after creation. Dropping the timer
/// cancels it.
pub struct CountdownTimer {
    interval: Interval,
}

impl CountdownTimer {
    pub const PERIOD: Duration = Duration::from_secs(1);

    pub fn start() -> Self {
        Self::with_period(Self::PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    /// Wait for the next tick
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}
