use super::hours::HoursEntry;
use crate::utils::date::parse_date;
use crate::utils::time::parse_time;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use thiserror::Error;

/// Correction request sent for a completed entry. Never read back by the kiosk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditRequest {
    pub entry_id: String,
    pub corrected_clock_in: Option<DateTime<Utc>>,
    pub corrected_clock_out: Option<DateTime<Utc>>,
    pub reason: String,
}

/// Editable field on the Edit Entry step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionField {
    ClockInDate,
    ClockInTime,
    ClockOutDate,
    ClockOutTime,
    Reason,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorrectionError {
    #[error("Please enter a reason for the correction")]
    MissingReason,
    #[error("Invalid date: {0} (use YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Invalid time: {0} (use HH:MM)")]
    InvalidTime(String),
    #[error("Clock-out must be after clock-in")]
    OutBeforeIn,
}

/// Form state of the Edit Entry step: local date and time fields as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionDraft {
    pub entry_id: String,
    pub clock_in_date: String,
    pub clock_in_time: String,
    pub clock_out_date: String,
    pub clock_out_time: String,
    pub reason: String,
}

fn split_local(at: DateTime<Utc>) -> (String, String) {
    let local = at.with_timezone(&Local);
    (
        local.format("%Y-%m-%d").to_string(),
        local.format("%H:%M").to_string(),
    )
}

impl CorrectionDraft {
    /// Pre-fill from the entry's recorded punches.
    pub fn from_entry(entry: &HoursEntry) -> Self {
        let (clock_in_date, clock_in_time) = split_local(entry.clock_in);
        let (clock_out_date, clock_out_time) = entry
            .clock_out
            .map(split_local)
            .unwrap_or_default();

        Self {
            entry_id: entry.id.clone(),
            clock_in_date,
            clock_in_time,
            clock_out_date,
            clock_out_time,
            reason: String::new(),
        }
    }

    pub fn set(&mut self, field: CorrectionField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CorrectionField::ClockInDate => self.clock_in_date = value,
            CorrectionField::ClockInTime => self.clock_in_time = value,
            CorrectionField::ClockOutDate => self.clock_out_date = value,
            CorrectionField::ClockOutTime => self.clock_out_time = value,
            CorrectionField::Reason => self.reason = value,
        }
    }

    /// Validate the form and build the outbound request.
    pub fn to_request(&self) -> Result<EditRequest, CorrectionError> {
        let reason = self.reason.trim();
        if reason.is_empty() {
            return Err(CorrectionError::MissingReason);
        }

        let corrected_clock_in = combine_local(&self.clock_in_date, &self.clock_in_time)?;
        let corrected_clock_out = combine_local(&self.clock_out_date, &self.clock_out_time)?;

        if let (Some(start), Some(end)) = (corrected_clock_in, corrected_clock_out)
            && end <= start
        {
            return Err(CorrectionError::OutBeforeIn);
        }

        Ok(EditRequest {
            entry_id: self.entry_id.clone(),
            corrected_clock_in,
            corrected_clock_out,
            reason: reason.to_string(),
        })
    }
}

/// Join a local date and time field into a UTC timestamp.
/// A blank date or time yields `None` (the correction leaves that side unset).
pub fn combine_local(date: &str, time: &str) -> Result<Option<DateTime<Utc>>, CorrectionError> {
    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() || time.is_empty() {
        return Ok(None);
    }

    let d = parse_date(date).ok_or_else(|| CorrectionError::InvalidDate(date.to_string()))?;
    let t = parse_time(time).ok_or_else(|| CorrectionError::InvalidTime(time.to_string()))?;

    // Nonexistent local times (spring-forward gap) are rejected.
    let local = Local
        .from_local_datetime(&d.and_time(t))
        .earliest()
        .ok_or_else(|| CorrectionError::InvalidTime(time.to_string()))?;

    Ok(Some(local.with_timezone(&Utc)))
}
