use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

// The one tick timer a session owns. Arming replaces any previous interval.
#[derive(Default)]
pub struct TickTimer {
    interval: Option<Interval>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    // First tick fires one full period from now.
    pub fn arm(&mut self, delay: Duration) {
        let mut interval = interval_at(Instant::now() + delay, delay);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    pub fn disarm(&mut self) {
        self.interval = None;
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(Interval::period)
    }

    // Pends forever while disarmed.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
