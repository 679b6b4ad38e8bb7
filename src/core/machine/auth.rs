//! Store resolution and PIN entry.

use super::{EmployeeSession, KioskEvent, KioskMachine, MSG_CONNECTION, MSG_RATE_LIMITED, Step};
use crate::backend::{BackendError, KioskBackend};
use crate::core::timers::{PIN_SUBMIT_DELAY, TimerKind};
use crate::models::tenant::normalize_store_code;
use std::time::Instant;
use tracing::{info, warn};

const MSG_STORE_INVALID: &str = "Enter a valid store code (letters and numbers only).";
const MSG_STORE_NOT_FOUND: &str = "Store not found. Check the code and try again.";
const MSG_PIN_NOT_RECOGNIZED: &str = "PIN not recognized. Please try again.";

impl<B: KioskBackend> KioskMachine<B> {
    /// Resolve a store code. Also used at start-up for a preconfigured store.
    pub fn submit_store_code(&mut self, raw: &str, now: Instant) {
        self.error = None;

        let Some(code) = normalize_store_code(raw) else {
            self.error = Some(MSG_STORE_INVALID.to_string());
            return;
        };

        let result = self.backend.verify_store(&code);
        let now = self.after_call(now);

        match result {
            Ok(tenant) => {
                info!(code = %code, tenant = %tenant.tenant_name, "store resolved");
                self.events.push(KioskEvent::StoreResolved {
                    code,
                    tenant_name: tenant.tenant_name.clone(),
                });
                self.tenant = Some(tenant);
                self.pin.clear();
                self.pin_shake = false;
                self.enter(Step::Pin, now);
            }
            Err(e) => {
                let message = match e {
                    BackendError::NotFound | BackendError::Rejected { .. } => MSG_STORE_NOT_FOUND,
                    BackendError::RateLimited => MSG_RATE_LIMITED,
                    BackendError::Transport(_) | BackendError::InvalidResponse(_) => {
                        MSG_CONNECTION
                    }
                };
                warn!(code = %code, error = %e, "store verification failed");
                self.events.push(KioskEvent::StoreRejected {
                    code,
                    reason: e.to_string(),
                });
                self.error = Some(message.to_string());
            }
        }
    }

    pub(super) fn change_store(&mut self, now: Instant) {
        self.tenant = None;
        self.pin.clear();
        self.pin_shake = false;
        self.error = None;
        self.events.push(KioskEvent::StoreCleared);
        self.enter(Step::StoreCode, now);
    }

    pub(super) fn press_digit(&mut self, digit: u8, now: Instant) {
        if self.tenant.is_none() {
            return;
        }

        self.error = None;
        self.pin_shake = false;

        if self.pin.push(digit) && self.pin.is_complete() {
            self.timers.arm_once(TimerKind::PinSubmit, now, PIN_SUBMIT_DELAY);
        }
    }

    pub(super) fn clear_pin(&mut self) {
        self.pin.clear();
        self.error = None;
        self.timers.disarm(TimerKind::PinSubmit);
    }

    pub(super) fn backspace_pin(&mut self) {
        self.pin.backspace();
        self.error = None;
        self.timers.disarm(TimerKind::PinSubmit);
    }

    /// Send the completed PIN. The buffer is emptied whatever the outcome.
    pub(super) fn submit_pin(&mut self, now: Instant) {
        let (Some(tenant), Some(pin)) = (self.tenant.as_ref(), self.pin.value()) else {
            return;
        };

        let result = self.backend.lookup_pin(&tenant.tenant_id, pin);
        let now = self.after_call(now);
        self.pin.clear();

        match result {
            Ok(lookup) => {
                let choice = lookup.clock.available_actions();
                info!(
                    employee = %lookup.employee.full_name(),
                    status = ?lookup.clock.status(),
                    "employee authenticated"
                );
                self.events.push(KioskEvent::EmployeeAuthenticated {
                    employee: lookup.employee.full_name().to_string(),
                    status: lookup.clock.status(),
                });
                self.session = Some(EmployeeSession {
                    employee: lookup.employee,
                    clock: lookup.clock,
                    choice,
                    hours: None,
                });
                self.error = None;
                self.pin_shake = false;
                self.enter(Step::Confirm, now);
            }
            Err(BackendError::RateLimited) => {
                self.events.push(KioskEvent::PinRateLimited);
                self.error = Some(MSG_RATE_LIMITED.to_string());
                self.pin_shake = true;
            }
            Err(e @ (BackendError::Transport(_) | BackendError::InvalidResponse(_))) => {
                warn!(error = %e, "PIN lookup failed");
                self.events.push(KioskEvent::PinLookupFailed {
                    error: e.to_string(),
                });
                self.error = Some(MSG_CONNECTION.to_string());
            }
            Err(BackendError::NotFound | BackendError::Rejected { .. }) => {
                self.events.push(KioskEvent::PinRejected);
                self.error = Some(MSG_PIN_NOT_RECOGNIZED.to_string());
                self.pin_shake = true;
            }
        }
    }
}
