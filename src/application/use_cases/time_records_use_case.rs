//! Logging, listing and reviewing time records.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::application::dto::Session;
use crate::application::forms::{ReviewForm, TimeRecordForm};
use crate::application::services::HoursSummary;
use crate::domain::entities::{
    AuthToken, Jobsite, JobsiteId, Permissions, RecordStatus, TimeRecord, TimeRecordId,
};
use crate::domain::errors::{ActionError, ApiError, ValidationErrors};
use crate::domain::ports::{JobsitePort, TimeRecordFilter, TimeRecordPort};

#[derive(Clone)]
pub struct TimeRecordsUseCase {
    records: Arc<dyn TimeRecordPort>,
    jobsites: Arc<dyn JobsitePort>,
}

impl TimeRecordsUseCase {
    #[must_use]
    pub const fn new(records: Arc<dyn TimeRecordPort>, jobsites: Arc<dyn JobsitePort>) -> Self {
        Self { records, jobsites }
    }

    /// Records the session user may see, narrowed by `filter`.
    ///
    /// Employees only ever get their own records; supervisors additionally
    /// see records on jobsites they supervise.
    ///
    /// # Errors
    /// Returns `Forbidden` if the user may not view time, or the backend error.
    pub async fn list(
        &self,
        session: &Session,
        filter: TimeRecordFilter,
    ) -> Result<Vec<TimeRecord>, ActionError> {
        let domain = session.domain();
        let own_id = session.user.id();

        if domain.can_view_all_time() {
            return Ok(self
                .records
                .list_time_records(&session.token, &filter)
                .await?);
        }

        let permissions = domain.permissions();
        let filter = if permissions.contains(Permissions::VIEW_JOBSITE_TIME) {
            filter
        } else if permissions.contains(Permissions::VIEW_OWN_TIME) {
            if filter.employee_id.is_some_and(|id| id != own_id) {
                return Err(ActionError::forbidden("view another employee's time"));
            }
            filter.for_employee(own_id)
        } else {
            return Err(ActionError::forbidden("view time records"));
        };

        let records = self
            .records
            .list_time_records(&session.token, &filter)
            .await?;
        let sites = self.jobsite_map(&session.token).await?;

        let total = records.len();
        let visible: Vec<TimeRecord> = records
            .into_iter()
            .filter(|record| domain.can_view_record(record, sites.get(&record.jobsite_id)))
            .collect();

        if visible.len() < total {
            debug!(
                hidden = total - visible.len(),
                "Dropped records outside the user's visibility"
            );
        }

        Ok(visible)
    }

    /// A single record, if the session user may see it.
    ///
    /// # Errors
    /// Returns `Forbidden` or the backend error.
    pub async fn get(&self, session: &Session, record_id: TimeRecordId) -> Result<TimeRecord, ActionError> {
        let record = self
            .records
            .get_time_record(&session.token, record_id)
            .await?;
        let domain = session.domain();
        if domain.can_view_all_time() || domain.can_view_record(&record, None) {
            return Ok(record);
        }

        let jobsite = match self
            .jobsites
            .get_jobsite(&session.token, record.jobsite_id)
            .await
        {
            Ok(site) => Some(site),
            Err(ApiError::NotFound { .. }) => None,
            Err(e) => return Err(e.into()),
        };
        if domain.can_view_record(&record, jobsite.as_ref()) {
            Ok(record)
        } else {
            Err(ActionError::forbidden("view this time record"))
        }
    }

    /// Pending records on jobsites the session user may review.
    ///
    /// # Errors
    /// Returns `Forbidden` if the user cannot review time, or the backend error.
    pub async fn pending_for_review(&self, session: &Session) -> Result<Vec<TimeRecord>, ActionError> {
        Self::require_reviewer(session)?;
        let domain = session.domain();

        let filter = TimeRecordFilter::default().with_status(RecordStatus::Pending);
        let records = self
            .records
            .list_time_records(&session.token, &filter)
            .await?;
        let sites = self.jobsite_map(&session.token).await?;

        Ok(records
            .into_iter()
            .filter(|record| {
                sites
                    .get(&record.jobsite_id)
                    .is_some_and(|site| domain.can_review_record(record, site))
            })
            .collect())
    }

    /// Logs a new entry for the session user.
    ///
    /// # Errors
    /// Returns field errors, `Forbidden`, or the backend error.
    pub async fn log(
        &self,
        session: &Session,
        form: &TimeRecordForm,
        today: NaiveDate,
    ) -> Result<TimeRecord, ActionError> {
        if !session.domain().can_log_time() {
            return Err(ActionError::forbidden("log time"));
        }

        let draft = form.validate(session.user.id(), today)?;
        self.ensure_open_jobsite(&session.token, draft.jobsite_id)
            .await?;

        let record = self
            .records
            .create_time_record(&session.token, &draft)
            .await?;

        info!(
            record_id = %record.id,
            jobsite_id = %record.jobsite_id,
            hours = record.total_hours(),
            "Logged time record"
        );
        Ok(record)
    }

    /// Replaces the fields of an existing entry, keeping its owner.
    ///
    /// # Errors
    /// Returns field errors, `Forbidden`, or the backend error.
    pub async fn update(
        &self,
        session: &Session,
        record_id: TimeRecordId,
        form: &TimeRecordForm,
        today: NaiveDate,
    ) -> Result<TimeRecord, ActionError> {
        let existing = self
            .records
            .get_time_record(&session.token, record_id)
            .await?;
        if !session.domain().can_edit_record(&existing) {
            return Err(ActionError::forbidden("edit this time record"));
        }

        let draft = form.validate(existing.employee_id, today)?;
        if draft.jobsite_id != existing.jobsite_id {
            self.ensure_open_jobsite(&session.token, draft.jobsite_id)
                .await?;
        }

        let record = self
            .records
            .update_time_record(&session.token, record_id, &draft)
            .await?;
        info!(record_id = %record.id, "Updated time record");
        Ok(record)
    }

    /// # Errors
    /// Returns `Forbidden` or the backend error.
    pub async fn delete(&self, session: &Session, record_id: TimeRecordId) -> Result<(), ActionError> {
        let existing = self
            .records
            .get_time_record(&session.token, record_id)
            .await?;
        if !session.domain().can_delete_record(&existing) {
            return Err(ActionError::forbidden("delete this time record"));
        }

        self.records
            .delete_time_record(&session.token, record_id)
            .await?;
        info!(record_id = %record_id, "Deleted time record");
        Ok(())
    }

    /// Approves or denies a pending record.
    ///
    /// # Errors
    /// Returns field errors, `Forbidden`, or the backend error.
    pub async fn review(
        &self,
        session: &Session,
        record_id: TimeRecordId,
        form: &ReviewForm,
    ) -> Result<TimeRecord, ActionError> {
        Self::require_reviewer(session)?;
        let review = form.validate()?;

        let record = self
            .records
            .get_time_record(&session.token, record_id)
            .await?;
        if !record.is_pending() {
            return Err(ValidationErrors::single(
                "status",
                format!("record is already {}", record.status),
            )
            .into());
        }

        let jobsite = self
            .jobsites
            .get_jobsite(&session.token, record.jobsite_id)
            .await?;
        if !session.domain().can_review_record(&record, &jobsite) {
            warn!(
                record_id = %record_id,
                user_id = %session.user.id(),
                "Review refused by role check"
            );
            return Err(ActionError::forbidden("review this time record"));
        }

        let reviewed = self
            .records
            .review_time_record(&session.token, record_id, &review)
            .await?;
        info!(
            record_id = %record_id,
            status = %reviewed.status,
            "Reviewed time record"
        );
        Ok(reviewed)
    }

    /// Hour totals over the records [`Self::list`] returns.
    ///
    /// # Errors
    /// Same as [`Self::list`].
    pub async fn summary(
        &self,
        session: &Session,
        filter: TimeRecordFilter,
    ) -> Result<HoursSummary, ActionError> {
        let records = self.list(session, filter).await?;
        Ok(HoursSummary::from_records(&records))
    }

    async fn jobsite_map(&self, token: &AuthToken) -> Result<HashMap<JobsiteId, Jobsite>, ApiError> {
        Ok(self
            .jobsites
            .list_jobsites(token)
            .await?
            .into_iter()
            .map(|site| (site.id, site))
            .collect())
    }

    fn require_reviewer(session: &Session) -> Result<(), ActionError> {
        let domain = session.domain();
        if domain.permissions().contains(Permissions::REVIEW_TIME) || domain.is_admin() {
            Ok(())
        } else {
            Err(ActionError::forbidden("review time records"))
        }
    }

    async fn ensure_open_jobsite(
        &self,
        token: &AuthToken,
        jobsite_id: JobsiteId,
    ) -> Result<(), ActionError> {
        match self.jobsites.get_jobsite(token, jobsite_id).await {
            Ok(site) if site.active => Ok(()),
            Ok(_) => Err(ValidationErrors::single("jobsite_id", "jobsite is inactive").into()),
            Err(ApiError::NotFound { .. }) => {
                Err(ValidationErrors::single("jobsite_id", "no such jobsite").into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
