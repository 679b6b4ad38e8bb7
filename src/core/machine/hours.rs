//! My Hours and the correction-request sub-flow.

use super::{KioskEvent, KioskMachine, Step};
use crate::backend::{HoursQuery, KioskBackend};
use crate::core::pay_period::PayPeriod;
use crate::core::timers::{IDLE_TIMEOUT, TimerKind};
use crate::models::hours::total_net_seconds;
use crate::models::{CorrectionDraft, CorrectionField, HoursEntry};
use std::time::Instant;
use tracing::warn;

const MSG_HOURS_FAILED: &str = "Could not load your hours. Please try again.";
const MSG_CORRECTION_FAILED: &str = "Could not submit the correction. Please try again.";
const MSG_ENTRY_PENDING: &str = "A correction is already pending for this entry.";
const MSG_ENTRY_OPEN: &str = "This entry is still open and cannot be corrected yet.";

/// Entries of the current pay period for the signed-in employee.
#[derive(Debug, Clone, PartialEq)]
pub struct HoursBoard {
    pub period: PayPeriod,
    pub entries: Vec<HoursEntry>,
}

impl HoursBoard {
    pub fn total_net_seconds(&self) -> i64 {
        total_net_seconds(&self.entries)
    }
}

impl<B: KioskBackend> KioskMachine<B> {
    pub(super) fn open_my_hours(&mut self, now: Instant) {
        let period = PayPeriod::containing(self.wall.now().date_naive());
        let Some(session) = self.session.as_mut() else {
            return;
        };

        session.hours = Some(HoursBoard {
            period,
            entries: Vec::new(),
        });
        self.error = None;
        self.enter(Step::MyHours, now);
        self.reload_hours(now);
    }

    pub(super) fn close_my_hours(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            session.hours = None;
        }
        self.error = None;
        self.enter(Step::Confirm, now);
    }

    /// Fetch the period's entries, newest first. The idle window restarts
    /// once the response is in.
    pub(super) fn reload_hours(&mut self, now: Instant) {
        let query = match (self.tenant.as_ref(), self.session.as_ref()) {
            (Some(tenant), Some(session)) => match session.hours.as_ref() {
                Some(board) => HoursQuery {
                    tenant_id: tenant.tenant_id.clone(),
                    employee_id: session.employee.id().to_string(),
                    source: session.employee.source(),
                    start: board.period.start,
                    end: board.period.end,
                },
                None => return,
            },
            _ => return,
        };

        let result = self.backend.my_hours(&query);
        let now = self.after_call(now);
        if self.step.is_idle_guarded() {
            self.timers.arm_once(TimerKind::Idle, now, IDLE_TIMEOUT);
        }

        let Some(board) = self.session.as_mut().and_then(|s| s.hours.as_mut()) else {
            return;
        };

        match result {
            Ok(mut entries) => {
                entries.sort_by(|a, b| b.clock_in.cmp(&a.clock_in));
                self.events.push(KioskEvent::HoursLoaded {
                    entries: entries.len(),
                });
                board.entries = entries;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "hours lookup failed");
                self.events.push(KioskEvent::HoursFailed {
                    error: e.to_string(),
                });
                board.entries.clear();
                self.error = Some(MSG_HOURS_FAILED.to_string());
            }
        }
    }

    /// Open Edit Entry for a completed entry with no correction pending.
    pub(super) fn select_entry(&mut self, index: usize, now: Instant) {
        let Some(entry) = self
            .session
            .as_ref()
            .and_then(|s| s.hours.as_ref())
            .and_then(|b| b.entries.get(index))
        else {
            return;
        };

        if !entry.can_request_correction() {
            let message = if entry.has_pending_edit {
                MSG_ENTRY_PENDING
            } else {
                MSG_ENTRY_OPEN
            };
            self.error = Some(message.to_string());
            return;
        }

        let draft = CorrectionDraft::from_entry(entry);
        self.error = None;
        self.enter(Step::EditEntry { draft }, now);
    }

    pub(super) fn edit_field(&mut self, field: CorrectionField, value: String) {
        if let Step::EditEntry { draft } = &mut self.step {
            draft.set(field, value);
            self.error = None;
        }
    }

    /// Validate and send. On failure the draft stays for another attempt.
    pub(super) fn submit_correction(&mut self, now: Instant) {
        let Step::EditEntry { draft } = &self.step else {
            return;
        };

        let request = match draft.to_request() {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };

        let (Some(tenant), Some(session)) = (self.tenant.as_ref(), self.session.as_ref()) else {
            return;
        };
        let employee = session.employee.full_name().to_string();

        let result =
            self.backend
                .submit_edit_request(&tenant.tenant_id, session.employee.id(), &request);
        let now = self.after_call(now);

        match result {
            Ok(()) => {
                self.events.push(KioskEvent::CorrectionSubmitted {
                    entry_id: request.entry_id,
                    employee,
                });
                self.error = None;
                self.enter(Step::MyHours, now);
                self.reload_hours(now);
            }
            Err(e) => {
                warn!(entry = %request.entry_id, error = %e, "correction request failed");
                self.events.push(KioskEvent::CorrectionFailed {
                    entry_id: request.entry_id,
                    error: e.to_string(),
                });
                self.error = Some(MSG_CORRECTION_FAILED.to_string());
                self.timers.arm_once(TimerKind::Idle, now, IDLE_TIMEOUT);
            }
        }
    }

    pub(super) fn cancel_correction(&mut self, now: Instant) {
        self.error = None;
        self.enter(Step::MyHours, now);
    }
}
