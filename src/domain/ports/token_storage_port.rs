//! Token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::AuthToken;
use crate::domain::errors::ApiError;

/// Port for token persistence operations.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Retrieves stored token.
    async fn get_token(&self) -> Result<Option<AuthToken>, ApiError>;

    /// Stores token securely.
    async fn store_token(&self, token: &AuthToken) -> Result<(), ApiError>;

    /// Deletes stored token.
    async fn delete_token(&self) -> Result<(), ApiError>;

    /// Checks if token exists.
    async fn has_token(&self) -> Result<bool, ApiError> {
        Ok(self.get_token().await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock token storage for testing.
    pub struct MockTokenStorage {
        token: Arc<RwLock<Option<AuthToken>>>,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl MockTokenStorage {
        /// Creates empty mock storage.
        pub fn new() -> Self {
            Self {
                token: Arc::new(RwLock::new(None)),
                fail_reads: false,
                fail_writes: false,
            }
        }

        /// Creates mock storage with token.
        pub fn with_token(token: AuthToken) -> Self {
            Self {
                token: Arc::new(RwLock::new(Some(token))),
                fail_reads: false,
                fail_writes: false,
            }
        }

        /// Creates mock storage whose writes always fail.
        pub fn failing() -> Self {
            Self {
                token: Arc::new(RwLock::new(None)),
                fail_reads: false,
                fail_writes: true,
            }
        }

        /// Creates mock storage that cannot be reached at all, like a locked keyring.
        pub fn unavailable() -> Self {
            Self {
                token: Arc::new(RwLock::new(None)),
                fail_reads: true,
                fail_writes: true,
            }
        }
    }

    impl Default for MockTokenStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl TokenStoragePort for MockTokenStorage {
        async fn get_token(&self) -> Result<Option<AuthToken>, ApiError> {
            if self.fail_reads {
                return Err(ApiError::retrieval_failed("mock keyring is locked"));
            }
            Ok(self.token.read().await.clone())
        }

        async fn store_token(&self, token: &AuthToken) -> Result<(), ApiError> {
            if self.fail_writes {
                return Err(ApiError::storage_failed("mock storage is read-only"));
            }
            *self.token.write().await = Some(token.clone());
            Ok(())
        }

        async fn delete_token(&self) -> Result<(), ApiError> {
            if self.fail_writes {
                return Err(ApiError::storage_failed("mock storage is read-only"));
            }
            *self.token.write().await = None;
            Ok(())
        }
    }
}
