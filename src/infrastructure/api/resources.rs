//! Resource endpoints: users, roles, jobsites and time records.

use async_trait::async_trait;
use reqwest::Method;

use super::ApiClient;
use super::dto::{ReviewBody, RolesBody};
use crate::domain::entities::{
    AuthToken, Jobsite, JobsiteId, Role, RoleName, TimeRecord, TimeRecordId, User, UserId,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    DirectoryPort, JobsiteDraft, JobsitePort, Review, ReviewDecision, TimeRecordDraft,
    TimeRecordFilter, TimeRecordPort, UserDraft,
};

/// Query pairs for a record filter; unset criteria are omitted.
#[must_use]
pub fn filter_query(filter: &TimeRecordFilter) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(id) = filter.employee_id {
        query.push(("employee_id", id.to_string()));
    }
    if let Some(id) = filter.jobsite_id {
        query.push(("jobsite_id", id.to_string()));
    }
    if let Some(status) = filter.status {
        query.push(("status", status.as_str().to_string()));
    }
    if let Some(from) = filter.from {
        query.push(("from", from.format("%Y-%m-%d").to_string()));
    }
    if let Some(to) = filter.to {
        query.push(("to", to.format("%Y-%m-%d").to_string()));
    }
    query
}

#[async_trait]
impl DirectoryPort for ApiClient {
    async fn list_users(&self, token: &AuthToken) -> Result<Vec<User>, ApiError> {
        let request = self.request(Method::GET, "/users", Some(token));
        self.fetch(request, "users").await
    }

    async fn get_user(&self, token: &AuthToken, user_id: UserId) -> Result<User, ApiError> {
        let request = self.request(Method::GET, &format!("/users/{user_id}"), Some(token));
        self.fetch(request, &format!("user {user_id}")).await
    }

    async fn create_user(&self, token: &AuthToken, draft: &UserDraft) -> Result<User, ApiError> {
        let request = self.request(Method::POST, "/users", Some(token)).json(draft);
        self.fetch(request, "user").await
    }

    async fn update_user(
        &self,
        token: &AuthToken,
        user_id: UserId,
        draft: &UserDraft,
    ) -> Result<User, ApiError> {
        let request = self
            .request(Method::PUT, &format!("/users/{user_id}"), Some(token))
            .json(draft);
        self.fetch(request, &format!("user {user_id}")).await
    }

    async fn delete_user(&self, token: &AuthToken, user_id: UserId) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &format!("/users/{user_id}"), Some(token));
        self.execute(request, &format!("user {user_id}")).await
    }

    async fn set_roles(
        &self,
        token: &AuthToken,
        user_id: UserId,
        roles: Vec<RoleName>,
    ) -> Result<User, ApiError> {
        let request = self
            .request(Method::PUT, &format!("/users/{user_id}/roles"), Some(token))
            .json(&RolesBody { roles: &roles });
        self.fetch(request, &format!("user {user_id}")).await
    }

    async fn list_roles(&self, token: &AuthToken) -> Result<Vec<Role>, ApiError> {
        let request = self.request(Method::GET, "/roles", Some(token));
        self.fetch(request, "roles").await
    }
}

#[async_trait]
impl JobsitePort for ApiClient {
    async fn list_jobsites(&self, token: &AuthToken) -> Result<Vec<Jobsite>, ApiError> {
        let request = self.request(Method::GET, "/jobsites", Some(token));
        self.fetch(request, "jobsites").await
    }

    async fn get_jobsite(
        &self,
        token: &AuthToken,
        jobsite_id: JobsiteId,
    ) -> Result<Jobsite, ApiError> {
        let request = self.request(Method::GET, &format!("/jobsites/{jobsite_id}"), Some(token));
        self.fetch(request, &format!("jobsite {jobsite_id}")).await
    }

    async fn create_jobsite(
        &self,
        token: &AuthToken,
        draft: &JobsiteDraft,
    ) -> Result<Jobsite, ApiError> {
        let request = self.request(Method::POST, "/jobsites", Some(token)).json(draft);
        self.fetch(request, "jobsite").await
    }

    async fn update_jobsite(
        &self,
        token: &AuthToken,
        jobsite_id: JobsiteId,
        draft: &JobsiteDraft,
    ) -> Result<Jobsite, ApiError> {
        let request = self
            .request(Method::PUT, &format!("/jobsites/{jobsite_id}"), Some(token))
            .json(draft);
        self.fetch(request, &format!("jobsite {jobsite_id}")).await
    }

    async fn delete_jobsite(
        &self,
        token: &AuthToken,
        jobsite_id: JobsiteId,
    ) -> Result<(), ApiError> {
        let request = self.request(
            Method::DELETE,
            &format!("/jobsites/{jobsite_id}"),
            Some(token),
        );
        self.execute(request, &format!("jobsite {jobsite_id}")).await
    }
}

#[async_trait]
impl TimeRecordPort for ApiClient {
    async fn list_time_records(
        &self,
        token: &AuthToken,
        filter: &TimeRecordFilter,
    ) -> Result<Vec<TimeRecord>, ApiError> {
        let request = self
            .request(Method::GET, "/time-records", Some(token))
            .query(&filter_query(filter));
        self.fetch(request, "time records").await
    }

    async fn get_time_record(
        &self,
        token: &AuthToken,
        record_id: TimeRecordId,
    ) -> Result<TimeRecord, ApiError> {
        let request = self.request(
            Method::GET,
            &format!("/time-records/{record_id}"),
            Some(token),
        );
        self.fetch(request, &format!("time record {record_id}")).await
    }

    async fn create_time_record(
        &self,
        token: &AuthToken,
        draft: &TimeRecordDraft,
    ) -> Result<TimeRecord, ApiError> {
        let request = self
            .request(Method::POST, "/time-records", Some(token))
            .json(draft);
        self.fetch(request, "time record").await
    }

    async fn update_time_record(
        &self,
        token: &AuthToken,
        record_id: TimeRecordId,
        draft: &TimeRecordDraft,
    ) -> Result<TimeRecord, ApiError> {
        let request = self
            .request(
                Method::PUT,
                &format!("/time-records/{record_id}"),
                Some(token),
            )
            .json(draft);
        self.fetch(request, &format!("time record {record_id}")).await
    }

    async fn delete_time_record(
        &self,
        token: &AuthToken,
        record_id: TimeRecordId,
    ) -> Result<(), ApiError> {
        let request = self.request(
            Method::DELETE,
            &format!("/time-records/{record_id}"),
            Some(token),
        );
        self.execute(request, &format!("time record {record_id}")).await
    }

    async fn review_time_record(
        &self,
        token: &AuthToken,
        record_id: TimeRecordId,
        review: &Review,
    ) -> Result<TimeRecord, ApiError> {
        let action = match review.decision {
            ReviewDecision::Approve => "approve",
            ReviewDecision::Deny => "deny",
        };
        let request = self
            .request(
                Method::POST,
                &format!("/time-records/{record_id}/{action}"),
                Some(token),
            )
            .json(&ReviewBody {
                note: review.note.as_deref(),
            });
        self.fetch(request, &format!("time record {record_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RecordStatus;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_filter_has_no_query() {
        assert!(filter_query(&TimeRecordFilter::default()).is_empty());
    }

    #[test]
    fn test_filter_query_pairs() {
        let filter = TimeRecordFilter::default()
            .for_employee(UserId(7))
            .with_status(RecordStatus::Pending)
            .between(NaiveDate::from_ymd_opt(2026, 3, 2), None);

        assert_eq!(
            filter_query(&filter),
            vec![
                ("employee_id", "7".to_string()),
                ("status", "pending".to_string()),
                ("from", "2026-03-02".to_string()),
            ]
        );
    }
}
