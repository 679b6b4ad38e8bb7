//! Notifications the machine emits for logging and the kiosk journal.
//! PINs never appear here.

use crate::models::{ClockStatus, PunchAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReason {
    /// Success screen elapsed after a punch.
    Completed,
    /// No touch on My Hours / Edit Entry for the idle window.
    IdleTimeout,
    /// Employee pressed Done on the confirm step.
    Dismissed,
}

impl LockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockReason::Completed => "completed",
            LockReason::IdleTimeout => "idle_timeout",
            LockReason::Dismissed => "dismissed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KioskEvent {
    StoreResolved {
        code: String,
        tenant_name: String,
    },
    StoreRejected {
        code: String,
        reason: String,
    },
    StoreCleared,
    EmployeeAuthenticated {
        employee: String,
        status: ClockStatus,
    },
    PinRejected,
    PinRateLimited,
    PinLookupFailed {
        error: String,
    },
    CountdownStarted {
        action: PunchAction,
    },
    CountdownCancelled {
        action: PunchAction,
    },
    PunchCompleted {
        action: PunchAction,
        employee: String,
    },
    PunchFailed {
        action: PunchAction,
        employee: String,
        error: String,
    },
    HoursLoaded {
        entries: usize,
    },
    HoursFailed {
        error: String,
    },
    CorrectionSubmitted {
        entry_id: String,
        employee: String,
    },
    CorrectionFailed {
        entry_id: String,
        error: String,
    },
    Locked {
        reason: LockReason,
    },
}

impl KioskEvent {
    /// Journal operation name.
    pub fn operation(&self) -> &'static str {
        match self {
            KioskEvent::StoreResolved { .. } => "store_resolved",
            KioskEvent::StoreRejected { .. } => "store_rejected",
            KioskEvent::StoreCleared => "store_cleared",
            KioskEvent::EmployeeAuthenticated { .. } => "pin_accepted",
            KioskEvent::PinRejected => "pin_rejected",
            KioskEvent::PinRateLimited => "pin_rate_limited",
            KioskEvent::PinLookupFailed { .. } => "pin_error",
            KioskEvent::CountdownStarted { .. } => "countdown",
            KioskEvent::CountdownCancelled { .. } => "countdown_cancel",
            KioskEvent::PunchCompleted { .. } => "punch",
            KioskEvent::PunchFailed { .. } => "punch_failed",
            KioskEvent::HoursLoaded { .. } => "hours",
            KioskEvent::HoursFailed { .. } => "hours_failed",
            KioskEvent::CorrectionSubmitted { .. } => "correction",
            KioskEvent::CorrectionFailed { .. } => "correction_failed",
            KioskEvent::Locked { .. } => "lock",
        }
    }

    /// Journal target and message.
    pub fn describe(&self) -> (String, String) {
        match self {
            KioskEvent::StoreResolved { code, tenant_name } => {
                (code.clone(), format!("Store resolved: {tenant_name}"))
            }
            KioskEvent::StoreRejected { code, reason } => (code.clone(), reason.clone()),
            KioskEvent::StoreCleared => (String::new(), "Operator changed store".into()),
            KioskEvent::EmployeeAuthenticated { employee, status } => {
                (employee.clone(), format!("Authenticated ({status:?})"))
            }
            KioskEvent::PinRejected => (String::new(), "PIN not recognized".into()),
            KioskEvent::PinRateLimited => (String::new(), "Too many attempts".into()),
            KioskEvent::PinLookupFailed { error } => (String::new(), error.clone()),
            KioskEvent::CountdownStarted { action } => {
                (action.as_str().into(), "Countdown started".into())
            }
            KioskEvent::CountdownCancelled { action } => {
                (action.as_str().into(), "Countdown cancelled".into())
            }
            KioskEvent::PunchCompleted { action, employee } => {
                (action.as_str().into(), format!("{employee}: {}", action.success_message()))
            }
            KioskEvent::PunchFailed {
                action,
                employee,
                error,
            } => (action.as_str().into(), format!("{employee}: {error}")),
            KioskEvent::HoursLoaded { entries } => {
                (String::new(), format!("{entries} entries loaded"))
            }
            KioskEvent::HoursFailed { error } => (String::new(), error.clone()),
            KioskEvent::CorrectionSubmitted { entry_id, employee } => {
                (entry_id.clone(), format!("Correction requested by {employee}"))
            }
            KioskEvent::CorrectionFailed { entry_id, error } => (entry_id.clone(), error.clone()),
            KioskEvent::Locked { reason } => (reason.as_str().into(), "Returned to PIN".into()),
        }
    }
}
