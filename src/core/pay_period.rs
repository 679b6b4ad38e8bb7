//! Semi-monthly pay period: the 1st through the 15th, or the 16th through
//! the last day of the month.

use crate::utils::date::last_day_of_month;
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PayPeriod {
    /// The period containing `today`.
    pub fn containing(today: NaiveDate) -> Self {
        if today.day() <= 15 {
            PayPeriod {
                start: today.with_day(1).unwrap_or(today),
                end: today.with_day(15).unwrap_or(today),
            }
        } else {
            PayPeriod {
                start: today.with_day(16).unwrap_or(today),
                end: last_day_of_month(today),
            }
        }
    }

    /// "Oct 16 - Oct 31"
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %-d"),
            self.end.format("%b %-d")
        )
    }
}
