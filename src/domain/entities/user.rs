//! Workforce user entity.

use serde::{Deserialize, Serialize};

use super::{Permissions, RoleName, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    email: String,
    #[serde(default)]
    roles: Vec<RoleName>,
    #[serde(default = "default_true")]
    active: bool,
}

fn default_true() -> bool {
    true
}

impl User {
    #[must_use]
    pub fn new(
        id: impl Into<UserId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            roles: Vec::new(),
            active: true,
        }
    }

    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = RoleName>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn roles(&self) -> &[RoleName] {
        &self.roles
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn has_role(&self, role: &RoleName) -> bool {
        self.roles.contains(role)
    }

    /// Union of the grants of every role held.
    #[must_use]
    pub fn permissions(&self) -> Permissions {
        self.roles
            .iter()
            .fold(Permissions::empty(), |acc, role| acc | role.permissions())
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            ("", "") => self.email.clone(),
            (first, "") => first.to_string(),
            ("", last) => last.to_string(),
            (first, last) => format!("{first} {last}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(7_u64, "Ada", "Lovelace", "ada@example.com")
            .with_roles([RoleName::Employee]);

        assert_eq!(user.id().as_u64(), 7);
        assert_eq!(user.full_name(), "Ada Lovelace");
        assert!(user.has_role(&RoleName::Employee));
        assert!(!user.has_role(&RoleName::Admin));
        assert!(user.is_active());
    }

    #[test]
    fn test_full_name_falls_back_to_email() {
        let user = User::new(1_u64, " ", "", "crew@example.com");
        assert_eq!(user.full_name(), "crew@example.com");
    }

    #[test]
    fn test_permissions_fold_roles() {
        let user = User::new(1_u64, "A", "B", "a@b.co")
            .with_roles([RoleName::Employee, RoleName::Supervisor]);
        assert_eq!(user.permissions(), Permissions::SUPERVISOR);
    }

    #[test]
    fn test_deserialize_defaults() {
        let user: User = serde_json::from_str(
            r#"{"id":"12","first_name":"Sam","last_name":"Lee","email":"sam@example.com"}"#,
        )
        .unwrap();
        assert!(user.roles().is_empty());
        assert!(user.is_active());
        assert!(user.permissions().is_empty());
    }
}
