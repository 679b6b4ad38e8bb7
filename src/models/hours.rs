use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One break inside a punch entry. `break_end` is absent while the break is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRecord {
    pub id: String,
    pub break_start: DateTime<Utc>,
    #[serde(default)]
    pub break_end: Option<DateTime<Utc>>,
}

impl BreakRecord {
    /// Duration in seconds; open breaks count as zero.
    pub fn completed_seconds(&self) -> i64 {
        match self.break_end {
            Some(end) => (end - self.break_start).num_seconds().max(0),
            None => 0,
        }
    }
}

/// A punch entry as shown on My Hours. Read-only on the kiosk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursEntry {
    pub id: String,
    pub clock_in: DateTime<Utc>,
    #[serde(default)]
    pub clock_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub breaks: Vec<BreakRecord>,
    #[serde(default)]
    pub has_pending_edit: bool,
}

impl HoursEntry {
    pub fn is_complete(&self) -> bool {
        self.clock_out.is_some()
    }

    /// Sum of completed breaks, in seconds.
    pub fn break_seconds(&self) -> i64 {
        self.breaks.iter().map(BreakRecord::completed_seconds).sum()
    }

    /// Worked seconds net of completed breaks, or `None` while the entry is open.
    pub fn net_seconds(&self) -> Option<i64> {
        let out = self.clock_out?;
        let gross = (out - self.clock_in).num_seconds();
        Some((gross - self.break_seconds()).max(0))
    }

    pub fn net_hours(&self) -> Option<f64> {
        self.net_seconds().map(|s| s as f64 / 3600.0)
    }

    /// At most one outstanding correction per entry, and only for closed entries.
    pub fn can_request_correction(&self) -> bool {
        self.is_complete() && !self.has_pending_edit
    }
}

/// Total net seconds across the completed entries of a list.
pub fn total_net_seconds(entries: &[HoursEntry]) -> i64 {
    entries.iter().filter_map(HoursEntry::net_seconds).sum()
}
