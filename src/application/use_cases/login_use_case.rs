//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{LoginRequest, LoginResponse, Session, TokenSource};
use crate::domain::errors::{ActionError, ApiError};
use crate::domain::ports::{AuthPort, TokenStoragePort};

/// Handles user authentication workflow.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn TokenStoragePort>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(
        auth_port: Arc<dyn AuthPort>,
        storage_port: Arc<dyn TokenStoragePort>,
    ) -> Self {
        Self {
            auth_port,
            storage_port,
        }
    }

    /// Executes login with provided request.
    ///
    /// # Errors
    /// Returns error if the form is invalid or the backend rejects the credentials.
    pub async fn execute(&self, request: LoginRequest) -> Result<LoginResponse, ActionError> {
        let credentials = request.form.validate().map_err(|e| {
            warn!(fields = e.len(), "Login form failed validation");
            e
        })?;

        debug!(email = %credentials.email(), "Attempting login");

        let grant = self.auth_port.login(&credentials).await.map_err(|e| {
            warn!(error = %e, "Login rejected");
            e
        })?;

        info!(
            user_id = %grant.user.id(),
            email = %grant.user.email(),
            token = %grant.token,
            "Successfully authenticated"
        );

        let token_persisted = if request.persist_token {
            match self.storage_port.store_token(&grant.token).await {
                Ok(()) => {
                    info!("Token persisted to secure storage");
                    true
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to persist token to secure storage");
                    false
                }
            }
        } else {
            debug!("Token persistence disabled, skipping storage");
            false
        };

        Ok(LoginResponse {
            session: Session::new(grant.token, grant.user, TokenSource::Login),
            token_persisted,
        })
    }

    /// Deletes the stored token.
    ///
    /// # Errors
    /// Returns error if deletion fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        debug!("Deleting token from secure storage");
        match self.storage_port.delete_token().await {
            Ok(()) => {
                info!("Token deleted from secure storage");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to delete token from secure storage");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forms::LoginForm;
    use crate::domain::ports::mocks::{MockAuthPort, MockTokenStorage};
    use tokio_test::{assert_err, assert_ok};

    fn valid_form() -> LoginForm {
        LoginForm::new("crew@example.com", "pass-word")
    }

    #[tokio::test]
    async fn test_successful_login() {
        let auth_port = Arc::new(MockAuthPort::new(true));
        let storage_port = Arc::new(MockTokenStorage::new());

        let use_case = LoginUseCase::new(auth_port, storage_port.clone());
        let response = assert_ok!(use_case.execute(LoginRequest::new(valid_form())).await);

        assert_eq!(response.session.user.email(), "test@example.com");
        assert_eq!(response.session.source, TokenSource::Login);
        assert!(response.token_persisted);
        assert!(storage_port.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_backend() {
        let auth_port = Arc::new(MockAuthPort::new(false));
        let storage_port = Arc::new(MockTokenStorage::new());

        let use_case = LoginUseCase::new(auth_port, storage_port);
        let request = LoginRequest::new(LoginForm::new("not-an-email", ""));

        let result = use_case.execute(request).await;

        let errors = result.unwrap_err();
        let errors = errors.validation_errors().unwrap();
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let auth_port = Arc::new(MockAuthPort::new(false));
        let storage_port = Arc::new(MockTokenStorage::new());

        let use_case = LoginUseCase::new(auth_port, storage_port.clone());
        let result = use_case.execute(LoginRequest::new(valid_form())).await;

        assert!(matches!(
            result,
            Err(ActionError::Api(ApiError::InvalidCredentials))
        ));
        assert!(!storage_port.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_login_without_persistence() {
        let auth_port = Arc::new(MockAuthPort::new(true));
        let storage_port = Arc::new(MockTokenStorage::new());

        let use_case = LoginUseCase::new(auth_port, storage_port.clone());
        let request = LoginRequest::new(valid_form()).without_persistence();

        let response = assert_ok!(use_case.execute(request).await);
        assert!(!response.token_persisted);
        assert!(!storage_port.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_fail_login() {
        let auth_port = Arc::new(MockAuthPort::new(true));
        let storage_port = Arc::new(MockTokenStorage::failing());

        let use_case = LoginUseCase::new(auth_port, storage_port.clone());
        let response = assert_ok!(use_case.execute(LoginRequest::new(valid_form())).await);

        assert!(!response.token_persisted);
        assert_err!(use_case.logout().await);
    }
}
