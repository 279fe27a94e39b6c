//! Restores a session from a previously issued token.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::ResolveTokenUseCase;
use crate::application::dto::{Session, TokenSource};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthPort, TokenStoragePort};

#[derive(Clone)]
pub struct SessionUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn TokenStoragePort>,
    resolve_token: ResolveTokenUseCase,
}

impl SessionUseCase {
    #[must_use]
    pub fn new(auth_port: Arc<dyn AuthPort>, storage_port: Arc<dyn TokenStoragePort>) -> Self {
        Self {
            auth_port,
            resolve_token: ResolveTokenUseCase::new(storage_port.clone()),
            storage_port,
        }
    }

    /// Resolves a token and asks the backend who it belongs to.
    ///
    /// A stored token the backend no longer accepts is removed from the keyring.
    ///
    /// # Errors
    /// Returns `NoTokenAvailable` when no source has a token, or the backend error.
    pub async fn start(&self, cli_token: Option<String>) -> Result<Session, ApiError> {
        let resolved = self
            .resolve_token
            .resolve(cli_token)
            .await
            .ok_or(ApiError::NoTokenAvailable)?;

        debug!(source = %resolved.source, "Validating token with backend");

        match self.auth_port.current_user(&resolved.token).await {
            Ok(user) => {
                info!(user_id = %user.id(), source = %resolved.source, "Session restored");
                Ok(Session::new(resolved.token, user, resolved.source))
            }
            Err(e) if e.requires_login() && resolved.source == TokenSource::Keyring => {
                warn!(error = %e, "Stored token rejected, clearing keyring");
                if let Err(delete_error) = self.storage_port.delete_token().await {
                    warn!(error = %delete_error, "Failed to clear rejected token");
                }
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
