use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval};

/// Fixed-interval tick source for the session loop.
///
/// The first tick fires one full period after creation. Missed ticks fire in
/// a burst, so every elapsed period reaches the session.
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            interval: interval_at(Instant::now() + period, period),
        }
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}
