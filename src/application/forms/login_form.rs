use std::fmt;

use zeroize::Zeroizing;

use super::fields::{REQUIRED, is_valid_email, required};
use crate::domain::errors::ValidationErrors;
use crate::domain::ports::Credentials;

/// Sign-in input.
#[derive(Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: Zeroizing<String>,
}

impl LoginForm {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Validates the form into credentials.
    ///
    /// # Errors
    /// Returns every failing field.
    pub fn validate(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = required(&mut errors, "email", &self.email);
        if let Some(email) = email
            && !is_valid_email(email)
        {
            errors.add("email", "must be a valid email address");
        }

        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }

        let credentials = Credentials::new(email.unwrap_or_default(), self.password.as_str());
        errors.into_result(credentials)
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}
