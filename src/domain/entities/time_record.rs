//! Clock-in/clock-out entries and their approval status.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{JobsiteId, TimeRecordId, UserId};

/// Approval state of a time record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl RecordStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "denied" => Ok(Self::Denied),
            other => Err(format!("unknown record status `{other}`")),
        }
    }
}

/// Rounds to two decimals.
#[must_use]
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Worked hours for a same-day shift, never negative.
#[must_use]
pub fn shift_hours(start: NaiveTime, end: NaiveTime, break_hours: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let span = (end - start).num_minutes() as f64 / 60.0;
    round_hours((span - break_hours).max(0.0))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeRecord {
    pub id: TimeRecordId,
    pub employee_id: UserId,
    pub jobsite_id: JobsiteId,
    pub date: NaiveDate,
    #[serde(with = "crate::domain::serde_utils::hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::domain::serde_utils::hh_mm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub break_hours: f64,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub reviewed_by: Option<UserId>,
    #[serde(default)]
    pub review_note: Option<String>,
}

impl TimeRecord {
    /// Hours worked, computed from the clock times and break.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        shift_hours(self.start_time, self.end_time, self.break_hours)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, RecordStatus::Pending)
    }

    #[must_use]
    pub fn belongs_to(&self, user_id: UserId) -> bool {
        self.employee_id == user_id
    }
}
