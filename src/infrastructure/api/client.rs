//! Backend HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use super::dto::{ErrorResponse, LoginBody, LoginResponse};
use crate::domain::entities::{AuthToken, User};
use crate::domain::errors::{ApiError, ValidationErrors};
use crate::domain::ports::{AuthPort, Credentials, LoginGrant};

const USER_AGENT: &str = concat!("crewclock/", env!("CARGO_PKG_VERSION"));
const REQUEST_ID_HEADER: &str = "x-request-id";
const DEFAULT_RETRY_AFTER_MS: u64 = 5000;

/// REST client for the time-tracking backend.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a request, attaching the bearer token when given.
    pub(super) fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&AuthToken>,
    ) -> RequestBuilder {
        let request_id = Uuid::new_v4().to_string();
        debug!(%method, path, request_id = %request_id, "Sending request");

        let builder = self
            .client
            .request(method, format!("{}{path}", self.base_url))
            .header(REQUEST_ID_HEADER, request_id);

        match token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    /// Sends the request and decodes a JSON body.
    pub(super) async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        resource: &str,
    ) -> Result<T, ApiError> {
        let body = self.send(request, resource).await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(resource, error = %e, "Failed to decode response");
            ApiError::unexpected(format!("failed to decode {resource}: {e}"))
        })
    }

    /// Sends the request and discards any body.
    pub(super) async fn execute(
        &self,
        request: RequestBuilder,
        resource: &str,
    ) -> Result<(), ApiError> {
        self.send(request, resource).await.map(drop)
    }

    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<String, ApiError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(map_transport_error)?;

        if status.is_success() {
            return Ok(body);
        }

        let error = map_status(status, retry_after.as_deref(), &body, resource);
        warn!(status = status.as_u16(), resource, error = %error, "Request failed");
        Err(error)
    }
}

/// Maps a non-success response to an error.
#[must_use]
pub fn map_status(
    status: StatusCode,
    retry_after: Option<&str>,
    body: &str,
    resource: &str,
) -> ApiError {
    let payload: ErrorResponse = serde_json::from_str(body).unwrap_or_default();
    let message = payload
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
        });

    match status {
        StatusCode::UNAUTHORIZED => ApiError::unauthorized(message),
        StatusCode::FORBIDDEN => ApiError::forbidden(message),
        StatusCode::NOT_FOUND => ApiError::not_found(resource),
        StatusCode::CONFLICT => ApiError::Conflict { message },
        StatusCode::UNPROCESSABLE_ENTITY => {
            let errors = payload
                .errors
                .map(ValidationErrors::from)
                .filter(|errors| !errors.is_empty())
                .unwrap_or_else(|| ValidationErrors::single(resource, message));
            ApiError::Validation(errors)
        }
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
            retry_after_ms: retry_after
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map_or(DEFAULT_RETRY_AFTER_MS, |secs| secs.saturating_mul(1000)),
        },
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            ApiError::network(format!("backend temporarily unavailable ({})", status.as_u16()))
        }
        _ => ApiError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

fn map_transport_error(e: reqwest::Error) -> ApiError {
    warn!(error = %e, "Failed to reach backend");
    if e.is_timeout() {
        ApiError::network("request timed out")
    } else if e.is_connect() {
        ApiError::network("failed to connect to backend")
    } else {
        ApiError::network(e.to_string())
    }
}

#[async_trait]
impl AuthPort for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
        debug!(email = %credentials.email(), "Signing in");

        let request = self
            .request(Method::POST, "/auth/login", None)
            .json(&LoginBody {
                email: credentials.email(),
                password: credentials.password(),
            });

        let response: LoginResponse = self
            .fetch(request, "session")
            .await
            .map_err(|e| match e {
                ApiError::Unauthorized { .. } => ApiError::InvalidCredentials,
                other => other,
            })?;

        let token = AuthToken::new(response.token)
            .ok_or_else(|| ApiError::invalid_format("backend issued a malformed token"))?;

        debug!(user_id = %response.user.id(), token = %token, "Signed in");
        Ok(LoginGrant {
            token,
            user: response.user,
        })
    }

    async fn current_user(&self, token: &AuthToken) -> Result<User, ApiError> {
        let request = self.request(Method::GET, "/auth/me", Some(token));
        self.fetch(request, "current user").await
    }

    async fn health_check(&self) -> Result<(), ApiError> {
        let request = self.request(Method::GET, "/health", None);
        self.execute(request, "health").await
    }
}
