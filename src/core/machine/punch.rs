//! Confirm → countdown → success.

use super::{KioskEvent, KioskMachine, Step};
use crate::backend::{KioskBackend, PunchCommand};
use crate::core::timers::{COUNTDOWN_SECS, TimerKind};
use crate::models::{ActionSlot, PunchAction};
use std::time::Instant;
use tracing::{info, warn};

const MSG_ACTION_FAILED: &str = "Action failed. Please try again.";

impl<B: KioskBackend> KioskMachine<B> {
    pub(super) fn choose_action(&mut self, slot: ActionSlot, now: Instant) {
        let Some(action) = self.session.as_ref().and_then(|s| s.choice.pick(slot)) else {
            return;
        };

        self.error = None;
        self.events.push(KioskEvent::CountdownStarted { action });
        self.enter(
            Step::Countdown {
                action,
                remaining: COUNTDOWN_SECS,
            },
            now,
        );
    }

    /// Back to confirm without anything sent.
    pub(super) fn cancel_countdown(&mut self, now: Instant) {
        if let Step::Countdown { action, .. } = self.step {
            self.events.push(KioskEvent::CountdownCancelled { action });
        }
        self.enter(Step::Confirm, now);
    }

    /// One countdown second elapsed. Reaching zero executes the action.
    pub(super) fn countdown_step(&mut self, now: Instant) {
        let Step::Countdown { action, remaining } = &mut self.step else {
            return;
        };

        *remaining = remaining.saturating_sub(1);
        if *remaining > 0 {
            return;
        }

        let action = *action;
        self.timers.disarm(TimerKind::Countdown);
        self.execute(action, now);
    }

    /// Issue the one request the action implies. Failures go back to confirm
    /// for a fresh countdown; nothing is retried here.
    fn execute(&mut self, action: PunchAction, now: Instant) {
        let command = match (self.tenant.as_ref(), self.session.as_ref()) {
            (Some(tenant), Some(session)) => {
                PunchCommand::for_action(action, tenant, &session.employee, &session.clock)
            }
            _ => None,
        };
        let employee = self
            .session
            .as_ref()
            .map(|s| s.employee.full_name().to_string())
            .unwrap_or_default();

        let outcome = match &command {
            Some(cmd) => self.backend.execute_punch(cmd).map_err(|e| e.to_string()),
            None => Err(format!("no active record for {}", action.as_str())),
        };
        let now = self.after_call(now);

        match outcome {
            Ok(()) => {
                info!(action = action.as_str(), employee = %employee, "punch recorded");
                self.events
                    .push(KioskEvent::PunchCompleted { action, employee });
                self.enter(Step::Success { action }, now);
            }
            Err(error) => {
                warn!(action = action.as_str(), error = %error, "punch failed");
                self.events.push(KioskEvent::PunchFailed {
                    action,
                    employee,
                    error,
                });
                self.error = Some(MSG_ACTION_FAILED.to_string());
                self.enter(Step::Confirm, now);
            }
        }
    }
}
