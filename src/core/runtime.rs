//! Interactive kiosk loop.
//!
//! Owns the state machine, the wake lock and the journal. A reader thread
//! forwards terminal lines over a channel; everything else, backend calls
//! included, happens on the loop thread.

use crate::backend::KioskBackend;
use crate::core::machine::{KioskEvent, KioskMachine};
use crate::core::wake_lock::WakeLockManager;
use crate::db::journal::record_event;
use crate::errors::AppResult;
use crate::ui::{keys, render};
use crate::utils::redact;
use rusqlite::Connection;
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const MAX_WAIT: Duration = Duration::from_secs(1);

pub struct KioskRuntime<B: KioskBackend> {
    machine: KioskMachine<B>,
    wake: WakeLockManager,
    journal: Option<Connection>,
    secrets: Vec<String>,
    clear_screen: bool,
    last_tick: u64,
}

impl<B: KioskBackend> KioskRuntime<B> {
    pub fn new(machine: KioskMachine<B>, wake: WakeLockManager) -> Self {
        let last_tick = machine.clock().ticks();
        Self {
            machine,
            wake,
            journal: None,
            secrets: Vec::new(),
            clear_screen: true,
            last_tick,
        }
    }

    /// Record kiosk events into this journal connection.
    pub fn with_journal(mut self, conn: Connection) -> Self {
        self.journal = Some(conn);
        self
    }

    /// Literals masked out of journal text.
    pub fn with_secrets(mut self, secrets: Vec<String>) -> Self {
        self.secrets = secrets;
        self
    }

    /// Plain redraws, no terminal control sequences.
    pub fn without_screen_clear(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    pub fn machine(&self) -> &KioskMachine<B> {
        &self.machine
    }

    pub fn journal(&self) -> Option<&Connection> {
        self.journal.as_ref()
    }

    /// Resolve a preconfigured store before the first screen.
    pub fn preload_store(&mut self, code: &str) {
        self.machine.submit_store_code(code, Instant::now());
        self.flush_events();
    }

    /// Run until the input ends or a quit line arrives.
    pub fn run<R, W>(&mut self, input: R, out: &mut W) -> AppResult<()>
    where
        R: BufRead + Send + 'static,
        W: Write,
    {
        let lines = spawn_reader(input);
        self.wake.on_mount();
        info!("kiosk started");

        let result = self.event_loop(&lines, out);

        self.wake.on_teardown();
        info!("kiosk stopped");
        result
    }

    fn event_loop<W: Write>(&mut self, lines: &Receiver<String>, out: &mut W) -> AppResult<()> {
        loop {
            self.pump(Instant::now());
            self.draw(out)?;

            let now = Instant::now();
            let wait = self
                .machine
                .next_deadline()
                .map(|d| d.saturating_duration_since(now))
                .unwrap_or(MAX_WAIT)
                .min(MAX_WAIT);

            match lines.recv_timeout(wait) {
                Ok(line) => {
                    if keys::is_quit(&line) {
                        return Ok(());
                    }
                    self.feed_line(&line, Instant::now());
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("input closed");
                    self.pump(Instant::now());
                    return Ok(());
                }
            }
        }
    }

    /// Apply one terminal line. Expired timers fire before the input.
    pub fn feed_line(&mut self, line: &str, now: Instant) {
        self.pump(now);
        for input in keys::parse_line(line, self.machine.step_kind()) {
            self.machine.handle(input, now);
        }
        self.flush_events();
    }

    /// Fire due timers, refresh the wake lock on clock ticks, flush events.
    pub fn pump(&mut self, now: Instant) {
        self.machine.tick(now);

        let ticks = self.machine.clock().ticks();
        if ticks != self.last_tick {
            self.last_tick = ticks;
            self.wake.on_visibility_change(true);
        }

        self.flush_events();
    }

    fn draw<W: Write>(&self, out: &mut W) -> AppResult<()> {
        if self.clear_screen {
            out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        out.write_all(render::render_screen(&self.machine).as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn flush_events(&mut self) {
        let events = self.machine.take_events();
        let Some(conn) = self.journal.as_ref() else {
            return;
        };

        let secrets: Vec<&str> = self.secrets.iter().map(String::as_str).collect();
        for event in events {
            let event = scrub(event, &secrets);
            if let Err(e) = record_event(conn, &event) {
                warn!(error = %e, operation = event.operation(), "journal write failed");
            }
        }
    }
}

/// Strip credentials from free-text event fields before they are stored.
fn scrub(event: KioskEvent, secrets: &[&str]) -> KioskEvent {
    match event {
        KioskEvent::StoreRejected { code, reason } => KioskEvent::StoreRejected {
            code,
            reason: redact(&reason, secrets),
        },
        KioskEvent::PinLookupFailed { error } => KioskEvent::PinLookupFailed {
            error: redact(&error, secrets),
        },
        KioskEvent::PunchFailed {
            action,
            employee,
            error,
        } => KioskEvent::PunchFailed {
            action,
            employee,
            error: redact(&error, secrets),
        },
        KioskEvent::HoursFailed { error } => KioskEvent::HoursFailed {
            error: redact(&error, secrets),
        },
        KioskEvent::CorrectionFailed { entry_id, error } => KioskEvent::CorrectionFailed {
            entry_id,
            error: redact(&error, secrets),
        },
        other => other,
    }
}

fn spawn_reader<R: BufRead + Send + 'static>(input: R) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in input.lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
