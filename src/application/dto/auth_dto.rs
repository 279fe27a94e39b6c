//! Authentication DTOs.

use crate::application::forms::LoginForm;
use crate::domain::entities::{AuthToken, User};
use crate::domain::services::UserDomain;

/// Source of the authentication token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Token from command line flag or environment variable.
    CommandLine,
    /// Token from system keyring.
    Keyring,
    /// Token just issued by a sign-in.
    Login,
}

impl TokenSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::CommandLine => "command line / environment",
            Self::Keyring => "system keyring",
            Self::Login => "sign-in",
        }
    }
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Login request data.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    /// Submitted credentials.
    pub form: LoginForm,
    /// Whether to persist token.
    pub persist_token: bool,
}

impl LoginRequest {
    /// Creates new login request.
    #[must_use]
    pub const fn new(form: LoginForm) -> Self {
        Self {
            form,
            persist_token: true,
        }
    }

    /// Disables token persistence.
    #[must_use]
    pub const fn without_persistence(mut self) -> Self {
        self.persist_token = false;
        self
    }
}

/// Authenticated user and the token that proves it.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: AuthToken,
    pub user: User,
    pub source: TokenSource,
}

impl Session {
    #[must_use]
    pub const fn new(token: AuthToken, user: User, source: TokenSource) -> Self {
        Self {
            token,
            user,
            source,
        }
    }

    /// Permission predicates for the session's user.
    #[must_use]
    pub fn domain(&self) -> UserDomain<'_> {
        UserDomain::new(&self.user)
    }
}

/// Login response data.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// Established session.
    pub session: Session,
    /// Whether token was persisted.
    pub token_persisted: bool,
}
