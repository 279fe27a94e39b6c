//! Authentication port definition.

use std::fmt;

use async_trait::async_trait;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::entities::{AuthToken, User};
use crate::domain::errors::ApiError;

/// Email and password submitted at sign-in.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

/// Token and profile returned by a successful sign-in.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub token: AuthToken,
    pub user: User,
}

/// Port for backend authentication operations.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Exchanges credentials for a session token.
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError>;

    /// Returns the user a token belongs to.
    async fn current_user(&self, token: &AuthToken) -> Result<User, ApiError>;

    /// Checks backend availability.
    async fn health_check(&self) -> Result<(), ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::entities::RoleName;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Mock authentication port for testing.
    pub struct MockAuthPort {
        should_succeed: Arc<AtomicBool>,
        user: User,
    }

    impl MockAuthPort {
        /// Creates new mock.
        pub fn new(should_succeed: bool) -> Self {
            Self {
                should_succeed: Arc::new(AtomicBool::new(should_succeed)),
                user: User::new(1_u64, "Test", "User", "test@example.com")
                    .with_roles([RoleName::Employee]),
            }
        }

        /// Replaces the user returned on success.
        pub fn with_user(mut self, user: User) -> Self {
            self.user = user;
            self
        }

        /// Sets success behavior.
        pub fn set_should_succeed(&self, value: bool) {
            self.should_succeed.store(value, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl AuthPort for MockAuthPort {
        async fn login(&self, _credentials: &Credentials) -> Result<LoginGrant, ApiError> {
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(LoginGrant {
                    token: AuthToken::new_unchecked("mock-session-token-0001"),
                    user: self.user.clone(),
                })
            } else {
                Err(ApiError::InvalidCredentials)
            }
        }

        async fn current_user(&self, _token: &AuthToken) -> Result<User, ApiError> {
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(self.user.clone())
            } else {
                Err(ApiError::unauthorized("mock rejection"))
            }
        }

        async fn health_check(&self) -> Result<(), ApiError> {
            Ok(())
        }
    }
}
