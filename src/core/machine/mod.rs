//! The kiosk state machine.
//!
//! ```text
//! StoreCode ──verify──▶ Pin ──lookup──▶ Confirm ──choose──▶ Countdown ──0──▶ Success ──3s──▶ Pin
//!                        ▲                 │  ▲                 │ cancel        (execute fails → Confirm)
//!                        │                 ▼  │                 ▼
//!                        └──── idle 60s ── MyHours ⇄ EditEntry  Confirm
//! ```
//!
//! The machine is driven from one thread: [`KioskMachine::handle`] for
//! operator input and [`KioskMachine::tick`] for timer expiry. Backend calls
//! are made inline, so at most one is ever in flight. Every way back to the
//! PIN step goes through `lock`, which drops the PIN buffer and the
//! employee session together.

mod auth;
pub mod events;
mod hours;
mod punch;

pub use events::{KioskEvent, LockReason};
pub use hours::HoursBoard;

use crate::backend::KioskBackend;
use crate::core::pin::PinPad;
use crate::core::session_clock::{MonotonicClock, SessionClock, SystemClock, WallClock};
use crate::core::timers::{
    CLOCK_TICK, COUNTDOWN_STEP, IDLE_TIMEOUT, SUCCESS_DISPLAY, TimerKind, TimerSet,
};
use crate::models::{
    ActionChoice, ActionSlot, ClockState, CorrectionDraft, CorrectionField, EmployeeIdentity,
    PunchAction, TenantContext,
};
use std::time::Instant;
use tracing::{debug, info};

pub(crate) const MSG_CONNECTION: &str = "Connection error. Please try again.";
pub(crate) const MSG_RATE_LIMITED: &str = "Too many attempts. Please wait a moment and try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    StoreCode,
    Pin,
    Confirm,
    Countdown { action: PunchAction, remaining: u32 },
    Success { action: PunchAction },
    MyHours,
    EditEntry { draft: CorrectionDraft },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    StoreCode,
    Pin,
    Confirm,
    Countdown,
    Success,
    MyHours,
    EditEntry,
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::StoreCode => StepKind::StoreCode,
            Step::Pin => StepKind::Pin,
            Step::Confirm => StepKind::Confirm,
            Step::Countdown { .. } => StepKind::Countdown,
            Step::Success { .. } => StepKind::Success,
            Step::MyHours => StepKind::MyHours,
            Step::EditEntry { .. } => StepKind::EditEntry,
        }
    }

    /// Steps watched by the idle guard.
    pub fn is_idle_guarded(&self) -> bool {
        matches!(self, Step::MyHours | Step::EditEntry { .. })
    }
}

/// Operator input. Anything not meaningful on the current step is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    SubmitStoreCode(String),
    ChangeStore,
    Digit(u8),
    Clear,
    Backspace,
    ChooseAction(ActionSlot),
    OpenMyHours,
    Done,
    CancelCountdown,
    ReloadHours,
    SelectEntry(usize),
    CloseMyHours,
    EditField(CorrectionField, String),
    SubmitCorrection,
    CancelCorrection,
    /// A touch that maps to no control; only keeps the idle guard at bay.
    Touch,
}

/// Employee state for one authenticated interaction.
#[derive(Debug, Clone)]
pub struct EmployeeSession {
    pub employee: EmployeeIdentity,
    pub clock: ClockState,
    pub choice: ActionChoice,
    pub hours: Option<HoursBoard>,
}

pub struct KioskMachine<B: KioskBackend> {
    backend: B,
    wall: Box<dyn WallClock>,
    monotonic: Box<dyn MonotonicClock>,
    clock: SessionClock,
    timers: TimerSet,
    step: Step,
    tenant: Option<TenantContext>,
    pin: PinPad,
    pin_shake: bool,
    session: Option<EmployeeSession>,
    error: Option<String>,
    events: Vec<KioskEvent>,
}

impl<B: KioskBackend> KioskMachine<B> {
    /// Start on the store-code step with the footer clock running.
    pub fn new(backend: B, wall: Box<dyn WallClock>, now: Instant) -> Self {
        let clock = SessionClock::new(wall.now());
        let mut timers = TimerSet::new();
        timers.arm_repeating(TimerKind::ClockTick, now, CLOCK_TICK);

        Self {
            backend,
            wall,
            monotonic: Box::new(SystemClock),
            clock,
            timers,
            step: Step::StoreCode,
            tenant: None,
            pin: PinPad::new(),
            pin_shake: false,
            session: None,
            error: None,
            events: Vec::new(),
        }
    }

    /// Replace the monotonic source read after backend calls.
    pub fn with_monotonic(mut self, monotonic: Box<dyn MonotonicClock>) -> Self {
        self.monotonic = monotonic;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn step_kind(&self) -> StepKind {
        self.step.kind()
    }

    pub fn tenant(&self) -> Option<&TenantContext> {
        self.tenant.as_ref()
    }

    pub fn session(&self) -> Option<&EmployeeSession> {
        self.session.as_ref()
    }

    pub fn employee(&self) -> Option<&EmployeeIdentity> {
        self.session.as_ref().map(|s| &s.employee)
    }

    pub fn pin(&self) -> &PinPad {
        &self.pin
    }

    /// Set after a rejected PIN; the indicator shakes until the next digit.
    pub fn pin_shake(&self) -> bool {
        self.pin_shake
    }

    /// Inline error on the current step.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn is_timer_armed(&self, kind: TimerKind) -> bool {
        self.timers.is_armed(kind)
    }

    pub fn timer_deadline(&self, kind: TimerKind) -> Option<Instant> {
        self.timers.deadline(kind)
    }

    /// Earliest pending timer; the host sleeps until then unless input arrives.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn take_events(&mut self) -> Vec<KioskEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn handle(&mut self, input: Input, now: Instant) {
        if self.step.is_idle_guarded() {
            self.timers.arm_once(TimerKind::Idle, now, IDLE_TIMEOUT);
        }

        match (self.step.kind(), input) {
            (StepKind::StoreCode, Input::SubmitStoreCode(code)) => {
                self.submit_store_code(&code, now)
            }

            (StepKind::Pin, Input::Digit(d)) => self.press_digit(d, now),
            (StepKind::Pin, Input::Clear) => self.clear_pin(),
            (StepKind::Pin, Input::Backspace) => self.backspace_pin(),
            (StepKind::Pin, Input::ChangeStore) => self.change_store(now),

            (StepKind::Confirm, Input::ChooseAction(slot)) => self.choose_action(slot, now),
            (StepKind::Confirm, Input::OpenMyHours) => self.open_my_hours(now),
            (StepKind::Confirm, Input::Done) => self.lock(LockReason::Dismissed, now),

            (StepKind::Countdown, Input::CancelCountdown) => self.cancel_countdown(now),

            (StepKind::MyHours, Input::ReloadHours) => self.reload_hours(now),
            (StepKind::MyHours, Input::SelectEntry(index)) => self.select_entry(index, now),
            (StepKind::MyHours, Input::CloseMyHours) => self.close_my_hours(now),

            (StepKind::EditEntry, Input::EditField(field, value)) => {
                self.edit_field(field, value)
            }
            (StepKind::EditEntry, Input::SubmitCorrection) => self.submit_correction(now),
            (StepKind::EditEntry, Input::CancelCorrection) => self.cancel_correction(now),

            (_, Input::Touch) => {}
            (kind, other) => debug!(?kind, input = ?other, "input ignored on this step"),
        }
    }

    /// Fire every timer due at `now`, earliest first.
    pub fn tick(&mut self, now: Instant) {
        while let Some(kind) = self.timers.pop_due(now) {
            match kind {
                TimerKind::ClockTick => self.clock.on_tick(self.wall.now()),
                TimerKind::PinSubmit => self.submit_pin(now),
                TimerKind::Countdown => self.countdown_step(now),
                TimerKind::Success => self.lock(LockReason::Completed, now),
                TimerKind::Idle => self.lock(LockReason::IdleTimeout, now),
            }
        }
    }

    /// `now` moved past the time spent blocked in a backend call.
    fn after_call(&self, now: Instant) -> Instant {
        now.max(self.monotonic.now())
    }

    /// Switch steps: drop every step timer, then arm the new step's own.
    fn enter(&mut self, step: Step, now: Instant) {
        self.timers.disarm_step_timers();

        match &step {
            Step::Countdown { .. } => {
                self.timers
                    .arm_repeating(TimerKind::Countdown, now, COUNTDOWN_STEP)
            }
            Step::Success { .. } => self.timers.arm_once(TimerKind::Success, now, SUCCESS_DISPLAY),
            Step::MyHours | Step::EditEntry { .. } => {
                self.timers.arm_once(TimerKind::Idle, now, IDLE_TIMEOUT)
            }
            Step::StoreCode | Step::Pin | Step::Confirm => {}
        }

        debug!(from = ?self.step.kind(), to = ?step.kind(), "step change");
        self.step = step;
    }

    /// Return to the locked PIN step. PIN buffer and employee go together.
    fn lock(&mut self, reason: LockReason, now: Instant) {
        self.pin.clear();
        self.pin_shake = false;
        self.session = None;
        self.error = None;

        info!(reason = reason.as_str(), "kiosk locked");
        self.events.push(KioskEvent::Locked { reason });
        self.enter(Step::Pin, now);
    }
}
