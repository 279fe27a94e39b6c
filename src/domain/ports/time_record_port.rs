//! Time record port for logging and reviewing hours.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::domain::entities::{
    AuthToken, JobsiteId, RecordStatus, TimeRecord, TimeRecordId, UserId, shift_hours,
};
use crate::domain::errors::ApiError;

/// Criteria for listing time records. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeRecordFilter {
    pub employee_id: Option<UserId>,
    pub jobsite_id: Option<JobsiteId>,
    pub status: Option<RecordStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TimeRecordFilter {
    #[must_use]
    pub const fn for_employee(mut self, employee_id: UserId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    #[must_use]
    pub const fn for_jobsite(mut self, jobsite_id: JobsiteId) -> Self {
        self.jobsite_id = Some(jobsite_id);
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to an inclusive date range.
    #[must_use]
    pub const fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Applies the same criteria locally.
    #[must_use]
    pub fn matches(&self, record: &TimeRecord) -> bool {
        self.employee_id.is_none_or(|id| record.employee_id == id)
            && self.jobsite_id.is_none_or(|id| record.jobsite_id == id)
            && self.status.is_none_or(|status| record.status == status)
            && self.from.is_none_or(|from| record.date >= from)
            && self.to.is_none_or(|to| record.date <= to)
    }
}

/// Payload for creating or updating a time record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeRecordDraft {
    pub employee_id: UserId,
    pub jobsite_id: JobsiteId,
    pub date: NaiveDate,
    #[serde(with = "crate::domain::serde_utils::hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::domain::serde_utils::hh_mm")]
    pub end_time: NaiveTime,
    pub break_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TimeRecordDraft {
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        shift_hours(self.start_time, self.end_time, self.break_hours)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Deny,
}

impl ReviewDecision {
    /// Status a record ends up in after this decision.
    #[must_use]
    pub const fn resulting_status(self) -> RecordStatus {
        match self {
            Self::Approve => RecordStatus::Approved,
            Self::Deny => RecordStatus::Denied,
        }
    }
}

/// Supervisor decision on a pending record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub decision: ReviewDecision,
    pub note: Option<String>,
}

/// Port for time record resources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimeRecordPort: Send + Sync {
    /// Lists records matching the filter.
    async fn list_time_records(
        &self,
        token: &AuthToken,
        filter: &TimeRecordFilter,
    ) -> Result<Vec<TimeRecord>, ApiError>;

    async fn get_time_record(
        &self,
        token: &AuthToken,
        record_id: TimeRecordId,
    ) -> Result<TimeRecord, ApiError>;

    async fn create_time_record(
        &self,
        token: &AuthToken,
        draft: &TimeRecordDraft,
    ) -> Result<TimeRecord, ApiError>;

    async fn update_time_record(
        &self,
        token: &AuthToken,
        record_id: TimeRecordId,
        draft: &TimeRecordDraft,
    ) -> Result<TimeRecord, ApiError>;

    async fn delete_time_record(
        &self,
        token: &AuthToken,
        record_id: TimeRecordId,
    ) -> Result<(), ApiError>;

    /// Approves or denies a pending record.
    async fn review_time_record(
        &self,
        token: &AuthToken,
        record_id: TimeRecordId,
        review: &Review,
    ) -> Result<TimeRecord, ApiError>;
}
