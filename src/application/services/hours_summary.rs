//! Hour totals over a set of time records.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::domain::entities::{JobsiteId, RecordStatus, TimeRecord, UserId, round_hours};

/// ISO year and week number.
pub type IsoWeek = (i32, u32);

/// Aggregated hours. Denied time is tracked separately and excluded from
/// every other total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoursSummary {
    pub record_count: usize,
    pub approved_hours: f64,
    pub pending_hours: f64,
    pub denied_hours: f64,
    pub by_employee: BTreeMap<UserId, f64>,
    pub by_jobsite: BTreeMap<JobsiteId, f64>,
    pub by_week: BTreeMap<IsoWeek, f64>,
}

impl HoursSummary {
    #[must_use]
    pub fn from_records(records: &[TimeRecord]) -> Self {
        let mut summary = Self {
            record_count: records.len(),
            ..Self::default()
        };

        for record in records {
            let hours = record.total_hours();
            match record.status {
                RecordStatus::Denied => {
                    summary.denied_hours += hours;
                    continue;
                }
                RecordStatus::Approved => summary.approved_hours += hours,
                RecordStatus::Pending => summary.pending_hours += hours,
            }

            *summary.by_employee.entry(record.employee_id).or_default() += hours;
            *summary.by_jobsite.entry(record.jobsite_id).or_default() += hours;
            let week = record.date.iso_week();
            *summary
                .by_week
                .entry((week.year(), week.week()))
                .or_default() += hours;
        }

        summary.round();
        summary
    }

    /// Approved plus pending hours.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        round_hours(self.approved_hours + self.pending_hours)
    }

    /// Hours that have cleared review.
    #[must_use]
    pub const fn payable_hours(&self) -> f64 {
        self.approved_hours
    }

    fn round(&mut self) {
        self.approved_hours = round_hours(self.approved_hours);
        self.pending_hours = round_hours(self.pending_hours);
        self.denied_hours = round_hours(self.denied_hours);
        for hours in self
            .by_employee
            .values_mut()
            .chain(self.by_jobsite.values_mut())
            .chain(self.by_week.values_mut())
        {
            *hours = round_hours(*hours);
        }
    }
}
