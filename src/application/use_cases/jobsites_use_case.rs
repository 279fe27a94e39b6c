//! Jobsite listing and administration.

use std::sync::Arc;

use tracing::info;

use crate::application::dto::Session;
use crate::application::forms::JobsiteForm;
use crate::domain::entities::{Jobsite, JobsiteId};
use crate::domain::errors::{ActionError, ApiError};
use crate::domain::ports::JobsitePort;

#[derive(Clone)]
pub struct JobsitesUseCase {
    jobsites: Arc<dyn JobsitePort>,
}

impl JobsitesUseCase {
    #[must_use]
    pub const fn new(jobsites: Arc<dyn JobsitePort>) -> Self {
        Self { jobsites }
    }

    /// Jobsites sorted by name. Only administrators see inactive ones.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn list(&self, session: &Session) -> Result<Vec<Jobsite>, ActionError> {
        let show_inactive = session.domain().can_manage_jobsites();
        let mut sites: Vec<Jobsite> = self
            .jobsites
            .list_jobsites(&session.token)
            .await?
            .into_iter()
            .filter(|site| show_inactive || site.active)
            .collect();
        sites.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(sites)
    }

    /// # Errors
    /// Returns the backend error, or `NotFound` for inactive sites hidden from non-admins.
    pub async fn get(&self, session: &Session, jobsite_id: JobsiteId) -> Result<Jobsite, ActionError> {
        let site = self.jobsites.get_jobsite(&session.token, jobsite_id).await?;
        if !site.active && !session.domain().can_manage_jobsites() {
            return Err(ApiError::not_found(format!("jobsite {jobsite_id}")).into());
        }
        Ok(site)
    }

    /// Active jobsites the session user supervises.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn supervised(&self, session: &Session) -> Result<Vec<Jobsite>, ActionError> {
        let domain = session.domain();
        Ok(self
            .list(session)
            .await?
            .into_iter()
            .filter(|site| site.active && domain.supervises(site))
            .collect())
    }

    /// # Errors
    /// Returns field errors, `Forbidden`, or the backend error.
    pub async fn create(&self, session: &Session, form: &JobsiteForm) -> Result<Jobsite, ActionError> {
        Self::require_admin(session)?;
        let draft = form.validate()?;
        let site = self.jobsites.create_jobsite(&session.token, &draft).await?;
        info!(jobsite_id = %site.id, name = %site.name, "Created jobsite");
        Ok(site)
    }

    /// # Errors
    /// Returns field errors, `Forbidden`, or the backend error.
    pub async fn update(
        &self,
        session: &Session,
        jobsite_id: JobsiteId,
        form: &JobsiteForm,
    ) -> Result<Jobsite, ActionError> {
        Self::require_admin(session)?;
        let draft = form.validate()?;
        let site = self
            .jobsites
            .update_jobsite(&session.token, jobsite_id, &draft)
            .await?;
        info!(jobsite_id = %site.id, "Updated jobsite");
        Ok(site)
    }

    /// # Errors
    /// Returns `Forbidden` or the backend error.
    pub async fn delete(&self, session: &Session, jobsite_id: JobsiteId) -> Result<(), ActionError> {
        Self::require_admin(session)?;
        self.jobsites
            .delete_jobsite(&session.token, jobsite_id)
            .await?;
        info!(jobsite_id = %jobsite_id, "Deleted jobsite");
        Ok(())
    }

    fn require_admin(session: &Session) -> Result<(), ActionError> {
        if session.domain().can_manage_jobsites() {
            Ok(())
        } else {
            Err(ActionError::forbidden("manage jobsites"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::TokenSource;
    use crate::domain::entities::{AuthToken, RoleName, User, UserId};
    use crate::domain::ports::mocks::MockJobsitePort;

    fn session(role: RoleName) -> Session {
        Session::new(
            AuthToken::new_unchecked("session-token-for-tests"),
            User::new(2_u64, "Sam", "Ortiz", "sam@example.com").with_roles([role]),
            TokenSource::Keyring,
        )
    }

    fn sites() -> Vec<Jobsite> {
        vec![
            Jobsite::new(1_u64, "warehouse", "York").with_supervisors([UserId(2)]),
            Jobsite::new(2_u64, "Annex", "York").with_active(false),
            Jobsite::new(3_u64, "Bridge", "Hull"),
        ]
    }

    fn form() -> JobsiteForm {
        JobsiteForm {
            name: "Quarry".into(),
            city: "Leeds".into(),
            address: String::new(),
            supervisor_ids: "2".into(),
        }
    }

    #[tokio::test]
    async fn test_list_hides_inactive_from_non_admins() {
        let mut port = MockJobsitePort::new();
        port.expect_list_jobsites().returning(|_| Ok(sites()));
        let use_case = JobsitesUseCase::new(Arc::new(port));

        let listed = use_case.list(&session(RoleName::Employee)).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Bridge", "warehouse"]);

        let listed = use_case.list(&session(RoleName::Admin)).await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].name, "Annex");
    }

    #[tokio::test]
    async fn test_get_hides_inactive_from_non_admins() {
        let mut port = MockJobsitePort::new();
        port.expect_get_jobsite()
            .returning(|_, id| Ok(Jobsite::new(id, "Annex", "York").with_active(false)));
        let use_case = JobsitesUseCase::new(Arc::new(port));

        let error = use_case
            .get(&session(RoleName::Employee), JobsiteId(2))
            .await
            .unwrap_err();
        assert!(matches!(error, ActionError::Api(ApiError::NotFound { .. })));

        let site = use_case.get(&session(RoleName::Admin), JobsiteId(2)).await.unwrap();
        assert!(!site.active);
    }

    #[tokio::test]
    async fn test_supervised() {
        let mut port = MockJobsitePort::new();
        port.expect_list_jobsites().returning(|_| Ok(sites()));

        let supervised = JobsitesUseCase::new(Arc::new(port))
            .supervised(&session(RoleName::Supervisor))
            .await
            .unwrap();

        assert_eq!(supervised.len(), 1);
        assert_eq!(supervised[0].id, JobsiteId(1));
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let mut port = MockJobsitePort::new();
        port.expect_create_jobsite().never();

        let result = JobsitesUseCase::new(Arc::new(port))
            .create(&session(RoleName::Supervisor), &form())
            .await;

        assert!(result.unwrap_err().is_forbidden());
    }

    #[tokio::test]
    async fn test_admin_creates_jobsite() {
        let mut port = MockJobsitePort::new();
        port.expect_create_jobsite()
            .withf(|_, draft| draft.name == "Quarry" && draft.supervisor_ids == [UserId(2)])
            .returning(|_, draft| {
                Ok(Jobsite::new(9_u64, draft.name.clone(), draft.city.clone())
                    .with_supervisors(draft.supervisor_ids.clone()))
            });

        let site = JobsitesUseCase::new(Arc::new(port))
            .create(&session(RoleName::Admin), &form())
            .await
            .unwrap();

        assert_eq!(site.label(), "Quarry (Leeds)");
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let mut port = MockJobsitePort::new();
        port.expect_update_jobsite().never();

        let blank = JobsiteForm::default();
        let error = JobsitesUseCase::new(Arc::new(port))
            .update(&session(RoleName::Admin), JobsiteId(1), &blank)
            .await
            .unwrap_err();

        let errors = error.validation_errors().unwrap();
        assert!(errors.contains("name"));
        assert!(errors.contains("city"));
    }
}
