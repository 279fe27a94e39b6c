//! Wire-only request and response bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{RoleName, User};

#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct RolesBody<'a> {
    pub roles: &'a [RoleName],
}

#[derive(Debug, Serialize)]
pub struct ReviewBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'a str>,
}

/// Error payload; both keys are optional.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}
