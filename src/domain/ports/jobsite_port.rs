use async_trait::async_trait;
use serde::Serialize;

use crate::domain::entities::{AuthToken, Jobsite, JobsiteId, UserId};
use crate::domain::errors::ApiError;

/// Payload for creating or updating a jobsite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobsiteDraft {
    pub name: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub supervisor_ids: Vec<UserId>,
}

/// Port for jobsite resources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobsitePort: Send + Sync {
    async fn list_jobsites(&self, token: &AuthToken) -> Result<Vec<Jobsite>, ApiError>;

    async fn get_jobsite(
        &self,
        token: &AuthToken,
        jobsite_id: JobsiteId,
    ) -> Result<Jobsite, ApiError>;

    async fn create_jobsite(
        &self,
        token: &AuthToken,
        draft: &JobsiteDraft,
    ) -> Result<Jobsite, ApiError>;

    async fn update_jobsite(
        &self,
        token: &AuthToken,
        jobsite_id: JobsiteId,
        draft: &JobsiteDraft,
    ) -> Result<Jobsite, ApiError>;

    async fn delete_jobsite(&self, token: &AuthToken, jobsite_id: JobsiteId)
    -> Result<(), ApiError>;
}
