use std::time::Duration;

use log::debug;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// The recurring simulation timer
///
/// Rescheduling replaces the underlying interval atomically, and a fresh
/// interval never fires before one full period has passed, so a tick that is
/// already being handled cannot be followed by an overlapping one. Missed
/// ticks are delayed rather than burst for the same reason.
pub struct GameClock {
    base_interval: Duration,
    timer: Option<Interval>,
}

impl GameClock {
    pub fn new(base_interval: Duration) -> Self {
        Self {
            base_interval,
            timer: None,
        }
    }

    /// Begin ticking at `base_interval / speed`
    pub fn start(&mut self, speed: f64) {
        let period = self.period(speed);
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
        debug!("clock running at {:?} per tick", period);
    }

    /// Cancel the current interval and restart at the new speed
    pub fn reschedule(&mut self, speed: f64) {
        self.start(speed);
    }

    pub fn stop(&mut self) {
        self.timer = None;
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Wait for the next tick; parks forever while stopped
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => futures::future::pending::<()>().await,
        }
    }

    fn period(&self, speed: f64) -> Duration {
        debug_assert!(speed > 0.0);
        Duration::from_secs_f64(self.base_interval.as_secs_f64() / speed)
    }
}
