use super::punch_action::ActionChoice;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Punch status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockStatus {
    ClockedOut,
    ClockedIn,
    OnBreak,
}

/// Authoritative punch state for one authenticated employee.
///
/// Only ever built from a PIN lookup response; the variant carries exactly
/// the ids the next punch request needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockState {
    ClockedOut,
    ClockedIn {
        entry_id: String,
        clock_in: Option<DateTime<Utc>>,
    },
    OnBreak {
        entry_id: String,
        clock_in: Option<DateTime<Utc>>,
        break_id: String,
        break_start: DateTime<Utc>,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockStateError {
    #[error("status {0:?} requires an active entry id")]
    MissingEntry(ClockStatus),
    #[error("status clocked_out must not carry an active entry")]
    UnexpectedEntry,
    #[error("status on_break requires an active break id and start time")]
    MissingBreak,
    #[error("status {0:?} must not carry an active break")]
    UnexpectedBreak(ClockStatus),
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ClockState {
    /// Assemble a state from the flat fields of a PIN lookup response,
    /// enforcing the entry/break presence rules for each status.
    pub fn from_parts(
        status: ClockStatus,
        active_entry_id: Option<String>,
        clock_in_time: Option<DateTime<Utc>>,
        active_break_id: Option<String>,
        break_start_time: Option<DateTime<Utc>>,
    ) -> Result<Self, ClockStateError> {
        let entry = present(active_entry_id);
        let brk = present(active_break_id);

        match status {
            ClockStatus::ClockedOut => {
                if entry.is_some() {
                    return Err(ClockStateError::UnexpectedEntry);
                }
                if brk.is_some() || break_start_time.is_some() {
                    return Err(ClockStateError::UnexpectedBreak(status));
                }
                Ok(ClockState::ClockedOut)
            }
            ClockStatus::ClockedIn => {
                let entry_id = entry.ok_or(ClockStateError::MissingEntry(status))?;
                if brk.is_some() || break_start_time.is_some() {
                    return Err(ClockStateError::UnexpectedBreak(status));
                }
                Ok(ClockState::ClockedIn {
                    entry_id,
                    clock_in: clock_in_time,
                })
            }
            ClockStatus::OnBreak => {
                let entry_id = entry.ok_or(ClockStateError::MissingEntry(status))?;
                match (brk, break_start_time) {
                    (Some(break_id), Some(break_start)) => Ok(ClockState::OnBreak {
                        entry_id,
                        clock_in: clock_in_time,
                        break_id,
                        break_start,
                    }),
                    _ => Err(ClockStateError::MissingBreak),
                }
            }
        }
    }

    pub fn status(&self) -> ClockStatus {
        match self {
            ClockState::ClockedOut => ClockStatus::ClockedOut,
            ClockState::ClockedIn { .. } => ClockStatus::ClockedIn,
            ClockState::OnBreak { .. } => ClockStatus::OnBreak,
        }
    }

    pub fn active_entry_id(&self) -> Option<&str> {
        match self {
            ClockState::ClockedOut => None,
            ClockState::ClockedIn { entry_id, .. } | ClockState::OnBreak { entry_id, .. } => {
                Some(entry_id)
            }
        }
    }

    pub fn active_break_id(&self) -> Option<&str> {
        match self {
            ClockState::OnBreak { break_id, .. } => Some(break_id),
            _ => None,
        }
    }

    pub fn available_actions(&self) -> ActionChoice {
        ActionChoice::for_status(self.status())
    }

    /// Human-readable status line, e.g. "Clocked In since 9:03am".
    pub fn describe(&self) -> String {
        match self {
            ClockState::ClockedOut => "Clocked Out".to_string(),
            ClockState::ClockedIn { clock_in, .. } => match clock_in {
                Some(at) => format!("Clocked In since {}", short_time(*at)),
                None => "Clocked In".to_string(),
            },
            ClockState::OnBreak { break_start, .. } => {
                format!("On Break since {}", short_time(*break_start))
            }
        }
    }
}

/// Local wall time as "9:03am".
pub fn short_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%-I:%M%P").to_string()
}
