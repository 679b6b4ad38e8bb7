//! JSON bodies exchanged with the kiosk endpoints (camelCase on the wire).

use super::{BackendError, HoursQuery, PunchCommand, PunchLookup};
use crate::models::{
    ClockState, ClockStatus, EditRequest, EmployeeIdentity, EmployeeProfile, EmployeeSource,
    TenantContext,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct VerifyBody<'a> {
    pub code: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyReply {
    pub tenant_id: String,
    pub tenant_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl From<VerifyReply> for TenantContext {
    fn from(r: VerifyReply) -> Self {
        TenantContext {
            tenant_id: r.tenant_id,
            tenant_name: r.tenant_name,
            logo_url: r.logo_url.filter(|u| !u.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchBody<'a> {
    pub tenant_id: &'a str,
    pub pin: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeReply {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub source: EmployeeSource,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchReply {
    pub employee: EmployeeReply,
    pub status: ClockStatus,
    #[serde(default)]
    pub active_entry_id: Option<String>,
    #[serde(default)]
    pub clock_in_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub active_break_id: Option<String>,
    #[serde(default)]
    pub break_start_time: Option<DateTime<Utc>>,
}

impl TryFrom<PunchReply> for PunchLookup {
    type Error = BackendError;

    fn try_from(r: PunchReply) -> Result<Self, Self::Error> {
        let clock = ClockState::from_parts(
            r.status,
            r.active_entry_id,
            r.clock_in_time,
            r.active_break_id,
            r.break_start_time,
        )
        .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        let employee = EmployeeIdentity::new(
            r.employee.source,
            EmployeeProfile {
                id: r.employee.id,
                full_name: r.employee.full_name,
                avatar_url: r.employee.avatar_url,
                role: r.employee.role,
            },
        );

        Ok(PunchLookup { employee, clock })
    }
}

/// Endpoint path and JSON body for one punch command.
pub fn punch_request(command: &PunchCommand) -> (&'static str, serde_json::Value) {
    match command {
        PunchCommand::ClockIn {
            tenant_id,
            employee_id,
            source,
            employee_name,
        } => (
            "clock-in",
            serde_json::json!({
                "tenantId": tenant_id,
                "employeeId": employee_id,
                "source": source.as_str(),
                "employeeName": employee_name,
            }),
        ),
        PunchCommand::ClockOut {
            tenant_id,
            employee_id,
            entry_id,
        } => (
            "clock-out",
            serde_json::json!({
                "tenantId": tenant_id,
                "employeeId": employee_id,
                "entryId": entry_id,
            }),
        ),
        PunchCommand::BreakStart {
            tenant_id,
            employee_id,
            entry_id,
        } => (
            "break-start",
            serde_json::json!({
                "tenantId": tenant_id,
                "employeeId": employee_id,
                "entryId": entry_id,
            }),
        ),
        PunchCommand::BreakEnd { break_id } => {
            ("break-end", serde_json::json!({ "breakId": break_id }))
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyHoursBody<'a> {
    pub tenant_id: &'a str,
    pub employee_id: &'a str,
    pub source: EmployeeSource,
    pub start: String,
    pub end: String,
}

impl<'a> From<&'a HoursQuery> for MyHoursBody<'a> {
    fn from(q: &'a HoursQuery) -> Self {
        MyHoursBody {
            tenant_id: &q.tenant_id,
            employee_id: &q.employee_id,
            source: q.source,
            start: q.start.format("%Y-%m-%d").to_string(),
            end: q.end.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequestBody<'a> {
    pub tenant_id: &'a str,
    pub employee_id: &'a str,
    pub entry_id: &'a str,
    pub corrected_clock_in: Option<String>,
    pub corrected_clock_out: Option<String>,
    pub reason: &'a str,
}

impl<'a> EditRequestBody<'a> {
    pub fn new(tenant_id: &'a str, employee_id: &'a str, request: &'a EditRequest) -> Self {
        EditRequestBody {
            tenant_id,
            employee_id,
            entry_id: &request.entry_id,
            corrected_clock_in: request.corrected_clock_in.map(|t| t.to_rfc3339()),
            corrected_clock_out: request.corrected_clock_out.map(|t| t.to_rfc3339()),
            reason: &request.reason,
        }
    }
}
