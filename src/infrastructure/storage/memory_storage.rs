//! In-process token storage for runs that must not touch the keyring.

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::entities::AuthToken;
use crate::domain::errors::ApiError;
use crate::domain::ports::TokenStoragePort;

/// Holds the token for the lifetime of the process only.
#[derive(Default)]
pub struct MemoryTokenStorage {
    token: RwLock<Option<AuthToken>>,
}

impl MemoryTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStoragePort for MemoryTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, ApiError> {
        Ok(self.token.read().clone())
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), ApiError> {
        debug!(token = %token, "Holding token in memory");
        *self.token.write() = Some(token.clone());
        Ok(())
    }

    async fn delete_token(&self) -> Result<(), ApiError> {
        self.token.write().take();
        Ok(())
    }
}
