use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Permissions, RoleId};

/// Role names understood by the client.
///
/// Names compare case-insensitively. Anything unrecognised is kept verbatim
/// as [`RoleName::Other`] and grants nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoleName {
    Admin,
    Supervisor,
    Employee,
    Other(String),
}

impl RoleName {
    /// Parses a role name, falling back to [`RoleName::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "admin" | "administrator" => Self::Admin,
            "supervisor" => Self::Supervisor,
            "employee" => Self::Employee,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "Admin",
            Self::Supervisor => "Supervisor",
            Self::Employee => "Employee",
            Self::Other(name) => name,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Capabilities granted by holding this role.
    #[must_use]
    pub const fn permissions(&self) -> Permissions {
        match self {
            Self::Admin => Permissions::all(),
            Self::Supervisor => Permissions::SUPERVISOR,
            Self::Employee => Permissions::EMPLOYEE,
            Self::Other(_) => Permissions::empty(),
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for RoleName {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.as_str().to_string()
    }
}

/// Role resource as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("admin", RoleName::Admin ; "lowercase_admin")]
    #[test_case("Administrator", RoleName::Admin ; "long_admin")]
    #[test_case(" SUPERVISOR ", RoleName::Supervisor ; "padded_upper")]
    #[test_case("Employee", RoleName::Employee ; "employee")]
    #[test_case("Foreman", RoleName::Other("Foreman".into()) ; "unknown")]
    fn test_parse(input: &str, expected: RoleName) {
        assert_eq!(RoleName::parse(input), expected);
    }

    #[test]
    fn test_unknown_role_grants_nothing() {
        assert!(RoleName::parse("Foreman").permissions().is_empty());
    }

    #[test]
    fn test_role_deserializes_from_name() {
        let role: Role = serde_json::from_str(r#"{"id":"3","name":"supervisor"}"#).unwrap();
        assert_eq!(role.name, RoleName::Supervisor);
        assert_eq!(role.id, RoleId(3));
        assert_eq!(serde_json::to_string(&role.name).unwrap(), r#""Supervisor""#);
    }
}
