//! Account and role administration.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::dto::Session;
use crate::application::forms::{FormMode, UserForm, parse_roles};
use crate::domain::entities::{Role, RoleName, User, UserId};
use crate::domain::errors::{ActionError, ValidationErrors};
use crate::domain::ports::DirectoryPort;

#[derive(Clone)]
pub struct UsersUseCase {
    directory: Arc<dyn DirectoryPort>,
}

impl UsersUseCase {
    #[must_use]
    pub const fn new(directory: Arc<dyn DirectoryPort>) -> Self {
        Self { directory }
    }

    /// All accounts sorted by last then first name.
    ///
    /// # Errors
    /// Returns `Forbidden` or the backend error.
    pub async fn list(&self, session: &Session) -> Result<Vec<User>, ActionError> {
        Self::require_admin(session)?;
        let mut users = self.directory.list_users(&session.token).await?;
        users.sort_by(|a, b| {
            (a.last_name().to_lowercase(), a.first_name().to_lowercase())
                .cmp(&(b.last_name().to_lowercase(), b.first_name().to_lowercase()))
        });
        Ok(users)
    }

    /// # Errors
    /// Returns `Forbidden` or the backend error.
    pub async fn get(&self, session: &Session, user_id: UserId) -> Result<User, ActionError> {
        if user_id != session.user.id() {
            Self::require_admin(session)?;
        }
        Ok(self.directory.get_user(&session.token, user_id).await?)
    }

    /// # Errors
    /// Returns field errors, `Forbidden`, or the backend error.
    pub async fn create(&self, session: &Session, form: &UserForm) -> Result<User, ActionError> {
        Self::require_admin(session)?;
        let draft = form.validate(FormMode::Create)?;
        let user = self.directory.create_user(&session.token, &draft).await?;
        info!(user_id = %user.id(), email = %user.email(), "Created user");
        Ok(user)
    }

    /// # Errors
    /// Returns field errors, `Forbidden`, or the backend error.
    pub async fn update(
        &self,
        session: &Session,
        user_id: UserId,
        form: &UserForm,
    ) -> Result<User, ActionError> {
        Self::require_admin(session)?;
        let draft = form.validate(FormMode::Update)?;
        Self::guard_own_admin_role(session, user_id, &draft.roles)?;
        let user = self
            .directory
            .update_user(&session.token, user_id, &draft)
            .await?;
        info!(user_id = %user.id(), "Updated user");
        Ok(user)
    }

    /// # Errors
    /// Returns `Forbidden` for the session's own account, or the backend error.
    pub async fn delete(&self, session: &Session, user_id: UserId) -> Result<(), ActionError> {
        Self::require_admin(session)?;
        if user_id == session.user.id() {
            warn!(user_id = %user_id, "Refusing to delete the signed-in account");
            return Err(ActionError::forbidden("delete your own account"));
        }
        self.directory.delete_user(&session.token, user_id).await?;
        info!(user_id = %user_id, "Deleted user");
        Ok(())
    }

    /// Replaces a user's roles from a comma separated list.
    ///
    /// # Errors
    /// Returns field errors, `Forbidden`, or the backend error.
    pub async fn set_roles(
        &self,
        session: &Session,
        user_id: UserId,
        roles: &str,
    ) -> Result<User, ActionError> {
        if !session.domain().can_manage_roles() {
            return Err(ActionError::forbidden("assign roles"));
        }

        let roles = parse_roles(roles);
        let mut errors = ValidationErrors::new();
        if roles.is_empty() {
            errors.add("roles", "at least one role is required");
        }
        for unknown in roles.iter().filter(|role| !role.is_known()) {
            errors.add("roles", format!("unknown role `{unknown}`"));
        }
        let roles = errors.into_result(roles)?;
        Self::guard_own_admin_role(session, user_id, &roles)?;

        let user = self
            .directory
            .set_roles(&session.token, user_id, roles)
            .await?;
        info!(user_id = %user.id(), roles = ?user.roles(), "Assigned roles");
        Ok(user)
    }

    /// # Errors
    /// Returns `Forbidden` or the backend error.
    pub async fn list_roles(&self, session: &Session) -> Result<Vec<Role>, ActionError> {
        if !session.domain().can_manage_roles() {
            return Err(ActionError::forbidden("list roles"));
        }
        Ok(self.directory.list_roles(&session.token).await?)
    }

    fn require_admin(session: &Session) -> Result<(), ActionError> {
        if session.domain().can_manage_users() {
            Ok(())
        } else {
            Err(ActionError::forbidden("manage users"))
        }
    }

    /// An administrator may not strip the Admin role from their own account.
    fn guard_own_admin_role(
        session: &Session,
        user_id: UserId,
        roles: &[RoleName],
    ) -> Result<(), ActionError> {
        if user_id == session.user.id()
            && session.user.has_role(&RoleName::Admin)
            && !roles.contains(&RoleName::Admin)
        {
            return Err(ActionError::forbidden("remove your own admin role"));
        }
        Ok(())
    }
}
