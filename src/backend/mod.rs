//! Backend contract consumed by the kiosk core.
//!
//! The kiosk never talks to the hosted data store directly; every call goes
//! through [`KioskBackend`]. [`HttpBackend`] is the production binding, tests
//! script their own implementations.

pub mod http;
pub mod wire;

pub use http::HttpBackend;

use crate::models::{
    ClockState, EditRequest, EmployeeIdentity, EmployeeSource, HoursEntry, PunchAction,
    TenantContext,
};
use chrono::NaiveDate;
use thiserror::Error;

/// Outcome classes the kiosk distinguishes when a backend call fails.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("not found")]
    NotFound,
    #[error("rate limited")]
    RateLimited,
    #[error("rejected with status {status}")]
    Rejected { status: u16 },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Employee and punch state resolved from a PIN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchLookup {
    pub employee: EmployeeIdentity,
    pub clock: ClockState,
}

/// The single request a punch action turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PunchCommand {
    ClockIn {
        tenant_id: String,
        employee_id: String,
        source: EmployeeSource,
        employee_name: String,
    },
    ClockOut {
        tenant_id: String,
        employee_id: String,
        entry_id: String,
    },
    BreakStart {
        tenant_id: String,
        employee_id: String,
        entry_id: String,
    },
    BreakEnd {
        break_id: String,
    },
}

impl PunchCommand {
    /// Build the request for `action` from the current session.
    ///
    /// Returns `None` when the clock state lacks the id the action needs,
    /// which the status → action mapping rules out in practice.
    pub fn for_action(
        action: PunchAction,
        tenant: &TenantContext,
        employee: &EmployeeIdentity,
        clock: &ClockState,
    ) -> Option<Self> {
        let tenant_id = tenant.tenant_id.clone();
        let employee_id = employee.id().to_string();

        match action {
            PunchAction::ClockIn => Some(PunchCommand::ClockIn {
                tenant_id,
                employee_id,
                source: employee.source(),
                employee_name: employee.full_name().to_string(),
            }),
            PunchAction::ClockOut => Some(PunchCommand::ClockOut {
                tenant_id,
                employee_id,
                entry_id: clock.active_entry_id()?.to_string(),
            }),
            PunchAction::BreakStart => Some(PunchCommand::BreakStart {
                tenant_id,
                employee_id,
                entry_id: clock.active_entry_id()?.to_string(),
            }),
            PunchAction::BreakEnd => Some(PunchCommand::BreakEnd {
                break_id: clock.active_break_id()?.to_string(),
            }),
        }
    }
}

/// Scope of a My Hours request. Dates are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoursQuery {
    pub tenant_id: String,
    pub employee_id: String,
    pub source: EmployeeSource,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Request/response calls the kiosk depends on.
///
/// Every method blocks until the backend answers; the kiosk issues them one
/// at a time.
pub trait KioskBackend {
    /// Exchange a normalized store code for the tenant it belongs to.
    fn verify_store(&self, code: &str) -> Result<TenantContext, BackendError>;

    /// Look up the employee owning `pin` within a tenant.
    fn lookup_pin(&self, tenant_id: &str, pin: &str) -> Result<PunchLookup, BackendError>;

    /// Execute one punch.
    fn execute_punch(&self, command: &PunchCommand) -> Result<(), BackendError>;

    fn my_hours(&self, query: &HoursQuery) -> Result<Vec<HoursEntry>, BackendError>;

    fn submit_edit_request(
        &self,
        tenant_id: &str,
        employee_id: &str,
        request: &EditRequest,
    ) -> Result<(), BackendError>;
}

impl<B: KioskBackend + ?Sized> KioskBackend for Box<B> {
    fn verify_store(&self, code: &str) -> Result<TenantContext, BackendError> {
        (**self).verify_store(code)
    }

    fn lookup_pin(&self, tenant_id: &str, pin: &str) -> Result<PunchLookup, BackendError> {
        (**self).lookup_pin(tenant_id, pin)
    }

    fn execute_punch(&self, command: &PunchCommand) -> Result<(), BackendError> {
        (**self).execute_punch(command)
    }

    fn my_hours(&self, query: &HoursQuery) -> Result<Vec<HoursEntry>, BackendError> {
        (**self).my_hours(query)
    }

    fn submit_edit_request(
        &self,
        tenant_id: &str,
        employee_id: &str,
        request: &EditRequest,
    ) -> Result<(), BackendError> {
        (**self).submit_edit_request(tenant_id, employee_id, request)
    }
}
