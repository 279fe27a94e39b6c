use std::fmt;

use zeroize::Zeroizing;

use super::fields::{REQUIRED, is_valid_email, max_chars, required};
use crate::domain::entities::{RoleName, User};
use crate::domain::errors::ValidationErrors;
use crate::domain::ports::UserDraft;

const NAME_MAX_CHARS: usize = 100;
const PASSWORD_MIN_CHARS: usize = 8;

/// Whether the form creates a new account or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

#[derive(Clone, Default)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Zeroizing<String>,
    /// Comma separated role names.
    pub roles: String,
}

impl UserForm {
    /// Prefills the form for editing; the password stays blank.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
            password: Zeroizing::default(),
            roles: user
                .roles()
                .iter()
                .map(RoleName::as_str)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// # Errors
    /// Returns every failing field.
    pub fn validate(&self, mode: FormMode) -> Result<UserDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let first_name = required(&mut errors, "first_name", &self.first_name);
        if let Some(name) = first_name {
            max_chars(&mut errors, "first_name", name, NAME_MAX_CHARS);
        }

        let last_name = required(&mut errors, "last_name", &self.last_name);
        if let Some(name) = last_name {
            max_chars(&mut errors, "last_name", name, NAME_MAX_CHARS);
        }

        let email = required(&mut errors, "email", &self.email);
        if let Some(email) = email
            && !is_valid_email(email)
        {
            errors.add("email", "must be a valid email address");
        }

        let password = match (mode, self.password.is_empty()) {
            (FormMode::Create, true) => {
                errors.add("password", REQUIRED);
                None
            }
            (FormMode::Update, true) => None,
            (_, false) => {
                if self.password.chars().count() < PASSWORD_MIN_CHARS {
                    errors.add(
                        "password",
                        format!("must be at least {PASSWORD_MIN_CHARS} characters"),
                    );
                }
                Some(self.password.to_string())
            }
        };

        let roles = parse_roles(&self.roles);
        if roles.is_empty() {
            errors.add("roles", "at least one role is required");
        }
        for unknown in roles.iter().filter(|role| !role.is_known()) {
            errors.add("roles", format!("unknown role `{unknown}`"));
        }

        let draft = UserDraft {
            first_name: first_name.unwrap_or_default().to_string(),
            last_name: last_name.unwrap_or_default().to_string(),
            email: email.unwrap_or_default().to_ascii_lowercase(),
            password,
            roles,
        };
        errors.into_result(draft)
    }
}

/// Parses comma separated role names, dropping blanks and duplicates.
#[must_use]
pub fn parse_roles(value: &str) -> Vec<RoleName> {
    let mut roles: Vec<RoleName> = Vec::new();
    for role in value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(RoleName::parse)
    {
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    roles
}

impl fmt::Debug for UserForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}
