//! User and role directory port.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::entities::{AuthToken, Role, RoleName, User, UserId};
use crate::domain::errors::ApiError;

/// Payload for creating or updating a user.
///
/// `password` is required on create; on update it is only sent when set.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[zeroize(skip)]
    pub roles: Vec<RoleName>,
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("roles", &self.roles)
            .finish()
    }
}

/// Port for user administration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    /// Lists all users.
    async fn list_users(&self, token: &AuthToken) -> Result<Vec<User>, ApiError>;

    /// Fetches one user.
    async fn get_user(&self, token: &AuthToken, user_id: UserId) -> Result<User, ApiError>;

    /// Creates a user.
    async fn create_user(&self, token: &AuthToken, draft: &UserDraft) -> Result<User, ApiError>;

    /// Updates a user's profile.
    async fn update_user(
        &self,
        token: &AuthToken,
        user_id: UserId,
        draft: &UserDraft,
    ) -> Result<User, ApiError>;

    /// Deletes a user.
    async fn delete_user(&self, token: &AuthToken, user_id: UserId) -> Result<(), ApiError>;

    /// Replaces the roles a user holds.
    async fn set_roles(
        &self,
        token: &AuthToken,
        user_id: UserId,
        roles: Vec<RoleName>,
    ) -> Result<User, ApiError>;

    /// Lists the roles defined on the backend.
    async fn list_roles(&self, token: &AuthToken) -> Result<Vec<Role>, ApiError>;
}
