//! Footer clock. Ticks once per second while the kiosk runs; every tick
//! forces a re-render, which is what keeps the screen from looking idle.

use chrono::{DateTime, Local};
use std::time::Instant;

/// Source of local wall-clock time. Tests pin it to a fixed instant.
pub trait WallClock {
    fn now(&self) -> DateTime<Local>;
}

/// Source of monotonic time. Read again after every blocking backend call so
/// step timers start when the response arrived, not when the request left.
pub trait MonotonicClock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

impl MonotonicClock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone)]
pub struct SessionClock {
    now: DateTime<Local>,
    ticks: u64,
}

impl SessionClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self { now, ticks: 0 }
    }

    pub fn on_tick(&mut self, now: DateTime<Local>) {
        self.now = now;
        self.ticks += 1;
    }

    pub fn now(&self) -> DateTime<Local> {
        self.now
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// "9:03:27 AM"
    pub fn time_label(&self) -> String {
        self.now.format("%-I:%M:%S %p").to_string()
    }

    /// "Friday, October 16, 2026"
    pub fn date_label(&self) -> String {
        self.now.format("%A, %B %-d, %Y").to_string()
    }
}
