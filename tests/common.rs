#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, TimeZone, Utc};
use punchkiosk::backend::{BackendError, HoursQuery, KioskBackend, PunchCommand, PunchLookup};
use punchkiosk::core::machine::{Input, KioskMachine};
use punchkiosk::core::session_clock::{MonotonicClock, WallClock};
use punchkiosk::models::{
    BreakRecord, ClockState, ClockStatus, EditRequest, EmployeeIdentity, EmployeeProfile,
    EmployeeSource, HoursEntry, TenantContext,
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub fn pk() -> Command {
    cargo_bin_cmd!("punchkiosk")
}

/// Wall clock pinned to one local instant.
pub struct FixedClock(pub DateTime<Local>);

impl WallClock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Monotonic clock moved by hand; shared between a test and its backend.
#[derive(Clone)]
pub struct ManualClock(Rc<Cell<Instant>>);

impl ManualClock {
    pub fn new(at: Instant) -> Self {
        Self(Rc::new(Cell::new(at)))
    }

    pub fn get(&self) -> Instant {
        self.0.get()
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }

    /// Move forward to `at`; never backwards.
    pub fn catch_up(&self, at: Instant) {
        if at > self.0.get() {
            self.0.set(at);
        }
    }
}

impl MonotonicClock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap()
}

pub fn tenant() -> TenantContext {
    TenantContext {
        tenant_id: "tenant-1".into(),
        tenant_name: "Brew House".into(),
        logo_url: None,
    }
}

pub fn employee(source: EmployeeSource) -> EmployeeIdentity {
    EmployeeIdentity::new(
        source,
        EmployeeProfile {
            id: "emp-7".into(),
            full_name: "Ana Ruiz".into(),
            avatar_url: None,
            role: Some("barista".into()),
        },
    )
}

pub fn clock(status: ClockStatus) -> ClockState {
    match status {
        ClockStatus::ClockedOut => ClockState::ClockedOut,
        ClockStatus::ClockedIn => ClockState::ClockedIn {
            entry_id: "entry-1".into(),
            clock_in: Some(utc(2026, 10, 20, 13, 0)),
        },
        ClockStatus::OnBreak => ClockState::OnBreak {
            entry_id: "entry-1".into(),
            clock_in: Some(utc(2026, 10, 20, 13, 0)),
            break_id: "break-1".into(),
            break_start: utc(2026, 10, 20, 16, 0),
        },
    }
}

pub fn lookup(status: ClockStatus) -> PunchLookup {
    PunchLookup {
        employee: employee(EmployeeSource::Staff),
        clock: clock(status),
    }
}

/// Completed entry with one 30 minute break: 8h gross, 7.5h net.
pub fn completed_entry(id: &str, day: u32) -> HoursEntry {
    HoursEntry {
        id: id.into(),
        clock_in: utc(2026, 10, day, 13, 0),
        clock_out: Some(utc(2026, 10, day, 21, 0)),
        notes: None,
        breaks: vec![BreakRecord {
            id: format!("{id}-b"),
            break_start: utc(2026, 10, day, 17, 0),
            break_end: Some(utc(2026, 10, day, 17, 30)),
        }],
        has_pending_edit: false,
    }
}

#[derive(Debug, Default)]
pub struct Calls {
    pub verify: Vec<String>,
    pub pins: Vec<(String, String)>,
    pub punches: Vec<PunchCommand>,
    pub hours: Vec<HoursQuery>,
    pub edits: Vec<(String, String, EditRequest)>,
}

/// In-memory backend. Queued replies are used first; then the defaults:
/// store resolves, PIN not found, punches and edits succeed, no hours.
#[derive(Default)]
pub struct ScriptedBackend {
    pub store: RefCell<VecDeque<Result<TenantContext, BackendError>>>,
    pub pins: RefCell<VecDeque<Result<PunchLookup, BackendError>>>,
    pub punches: RefCell<VecDeque<Result<(), BackendError>>>,
    pub hours: RefCell<VecDeque<Result<Vec<HoursEntry>, BackendError>>>,
    pub edits: RefCell<VecDeque<Result<(), BackendError>>>,
    pub calls: RefCell<Calls>,
    /// Every call moves this clock forward by the given time.
    pub latency: RefCell<Option<(ManualClock, Duration)>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pin(self, reply: Result<PunchLookup, BackendError>) -> Self {
        self.pins.borrow_mut().push_back(reply);
        self
    }

    pub fn with_punch(self, reply: Result<(), BackendError>) -> Self {
        self.punches.borrow_mut().push_back(reply);
        self
    }

    pub fn with_hours(self, reply: Result<Vec<HoursEntry>, BackendError>) -> Self {
        self.hours.borrow_mut().push_back(reply);
        self
    }

    pub fn with_store(self, reply: Result<TenantContext, BackendError>) -> Self {
        self.store.borrow_mut().push_back(reply);
        self
    }

    pub fn with_edit(self, reply: Result<(), BackendError>) -> Self {
        self.edits.borrow_mut().push_back(reply);
        self
    }

    /// Make every later call take `by` on `clock`.
    pub fn set_latency(&self, clock: &ManualClock, by: Duration) {
        *self.latency.borrow_mut() = Some((clock.clone(), by));
    }

    fn elapse(&self) {
        if let Some((clock, by)) = self.latency.borrow().as_ref() {
            clock.advance(*by);
        }
    }

    pub fn pin_calls(&self) -> usize {
        self.calls.borrow().pins.len()
    }

    pub fn punch_calls(&self) -> Vec<PunchCommand> {
        self.calls.borrow().punches.clone()
    }
}

impl KioskBackend for ScriptedBackend {
    fn verify_store(&self, code: &str) -> Result<TenantContext, BackendError> {
        self.elapse();
        self.calls.borrow_mut().verify.push(code.to_string());
        self.store.borrow_mut().pop_front().unwrap_or_else(|| Ok(tenant()))
    }

    fn lookup_pin(&self, tenant_id: &str, pin: &str) -> Result<PunchLookup, BackendError> {
        self.elapse();
        self.calls
            .borrow_mut()
            .pins
            .push((tenant_id.to_string(), pin.to_string()));
        self.pins
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(BackendError::NotFound))
    }

    fn execute_punch(&self, command: &PunchCommand) -> Result<(), BackendError> {
        self.elapse();
        self.calls.borrow_mut().punches.push(command.clone());
        self.punches.borrow_mut().pop_front().unwrap_or(Ok(()))
    }

    fn my_hours(&self, query: &HoursQuery) -> Result<Vec<HoursEntry>, BackendError> {
        self.elapse();
        self.calls.borrow_mut().hours.push(query.clone());
        self.hours.borrow_mut().pop_front().unwrap_or(Ok(Vec::new()))
    }

    fn submit_edit_request(
        &self,
        tenant_id: &str,
        employee_id: &str,
        request: &EditRequest,
    ) -> Result<(), BackendError> {
        self.elapse();
        self.calls.borrow_mut().edits.push((
            tenant_id.to_string(),
            employee_id.to_string(),
            request.clone(),
        ));
        self.edits.borrow_mut().pop_front().unwrap_or(Ok(()))
    }
}

/// Drives a machine on a synthetic monotonic timeline.
pub struct Kiosk {
    pub machine: KioskMachine<ScriptedBackend>,
    pub now: Instant,
    /// What the machine reads after a backend call; runs ahead of `now`
    /// while a slow backend is blocking.
    pub mono: ManualClock,
}

impl Kiosk {
    /// Machine with the store already resolved, on the PIN step.
    /// Wall clock: Tuesday 2026-10-20 10:00 local.
    pub fn at_pin(backend: ScriptedBackend) -> Self {
        let now = Instant::now();
        let wall = Box::new(FixedClock(local(2026, 10, 20, 10, 0)));
        let mono = ManualClock::new(now);
        let mut machine =
            KioskMachine::new(backend, wall, now).with_monotonic(Box::new(mono.clone()));
        machine.handle(Input::SubmitStoreCode("brew42".into()), now);
        machine.take_events();
        Self { machine, now, mono }
    }

    /// Pick up time a slow backend spent.
    fn sync(&mut self) {
        self.now = self.now.max(self.mono.get());
    }

    pub fn press(&mut self, input: Input) {
        self.sync();
        self.machine.tick(self.now);
        self.machine.handle(input, self.now);
    }

    pub fn advance(&mut self, by: Duration) {
        self.sync();
        self.now += by;
        self.mono.catch_up(self.now);
        self.machine.tick(self.now);
    }

    /// Let the five countdown seconds pass one by one.
    pub fn run_countdown(&mut self) {
        for _ in 0..5 {
            self.advance(Duration::from_secs(1));
        }
    }

    pub fn type_pin(&mut self, pin: &str) {
        for b in pin.bytes() {
            self.press(Input::Digit(b - b'0'));
        }
    }

    /// Enter a PIN and let the submit delay elapse.
    pub fn sign_in(&mut self, pin: &str) {
        self.type_pin(pin);
        self.advance(Duration::from_millis(100));
    }

    pub fn backend(&self) -> &ScriptedBackend {
        self.machine.backend()
    }
}
