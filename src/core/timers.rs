//! Named timers owned by the kiosk state machine.
//!
//! Each timer is a deadline on the monotonic clock. The machine arms step
//! timers when it enters a step and drops all of them on every transition,
//! so no timer outlives the step that started it.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Footer clock refresh.
pub const CLOCK_TICK: Duration = Duration::from_secs(1);
/// Delay between the 4th PIN digit and the automatic submission.
pub const PIN_SUBMIT_DELAY: Duration = Duration::from_millis(100);
/// Visible countdown before a punch executes.
pub const COUNTDOWN_SECS: u32 = 5;
pub const COUNTDOWN_STEP: Duration = Duration::from_secs(1);
/// How long the success screen stays up.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(3);
/// Inactivity window on My Hours and Edit Entry.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    ClockTick,
    PinSubmit,
    Countdown,
    Success,
    Idle,
}

impl TimerKind {
    /// Step timers die with their step; the clock tick runs for the whole session.
    pub fn is_step_scoped(&self) -> bool {
        !matches!(self, TimerKind::ClockTick)
    }

    /// A late countdown fires once and restarts its period from the late
    /// tick, so a stalled host never burns through the cancel window.
    fn replays_missed(&self) -> bool {
        !matches!(self, TimerKind::Countdown)
    }
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    deadline: Instant,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct TimerSet {
    slots: BTreeMap<TimerKind, Timer>,
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) a one-shot timer firing `after` from `now`.
    pub fn arm_once(&mut self, kind: TimerKind, now: Instant, after: Duration) {
        self.slots.insert(
            kind,
            Timer {
                deadline: now + after,
                period: None,
            },
        );
    }

    /// Arm (or re-arm) a timer firing every `period`, first at `now + period`.
    pub fn arm_repeating(&mut self, kind: TimerKind, now: Instant, period: Duration) {
        self.slots.insert(
            kind,
            Timer {
                deadline: now + period,
                period: Some(period),
            },
        );
    }

    pub fn disarm(&mut self, kind: TimerKind) {
        self.slots.remove(&kind);
    }

    pub fn disarm_step_timers(&mut self) {
        self.slots.retain(|kind, _| !kind.is_step_scoped());
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.slots.contains_key(&kind)
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<Instant> {
        self.slots.get(&kind).map(|t| t.deadline)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots.values().map(|t| t.deadline).min()
    }

    /// Take the earliest timer due at `now`.
    ///
    /// Repeating timers move one period forward, so a late caller sees every
    /// missed period in order; the countdown instead skips to `now + period`.
    /// One-shot timers are removed.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerKind> {
        let (kind, timer) = self
            .slots
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| t.deadline)
            .map(|(k, t)| (*k, *t))?;

        match timer.period {
            Some(period) => {
                let mut next = timer.deadline + period;
                if next <= now && !kind.replays_missed() {
                    next = now + period;
                }
                if let Some(slot) = self.slots.get_mut(&kind) {
                    slot.deadline = next;
                }
            }
            None => {
                self.slots.remove(&kind);
            }
        }

        Some(kind)
    }
}
