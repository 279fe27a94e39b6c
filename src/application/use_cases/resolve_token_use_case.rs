//! Picks the bearer token a command runs with.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::dto::TokenSource;
use crate::domain::entities::AuthToken;
use crate::domain::ports::TokenStoragePort;

/// A token and where it was found.
#[derive(Debug, Clone)]
pub struct ResolvedToken {
    pub token: AuthToken,
    pub source: TokenSource,
}

impl ResolvedToken {
    #[must_use]
    pub const fn new(token: AuthToken, source: TokenSource) -> Self {
        Self { token, source }
    }
}

/// Chooses between the session saved by `crewclock login` and a token
/// handed over through `--token` or `CREWCLOCK_TOKEN`.
///
/// The saved session wins, so a crew member who signed in keeps their own
/// identity even when a shared token is exported in the shell. A keyring
/// that cannot be read is reported and skipped.
#[derive(Clone)]
pub struct ResolveTokenUseCase {
    saved_sessions: Arc<dyn TokenStoragePort>,
}

impl ResolveTokenUseCase {
    #[must_use]
    pub const fn new(saved_sessions: Arc<dyn TokenStoragePort>) -> Self {
        Self { saved_sessions }
    }

    /// `None` when neither source holds a usable token.
    pub async fn resolve(&self, cli_token: Option<String>) -> Option<ResolvedToken> {
        let resolved = match self.saved_sessions.get_token().await {
            Ok(Some(token)) => Some(ResolvedToken::new(token, TokenSource::Keyring)),
            Ok(None) => Self::from_cli(cli_token),
            Err(e) => {
                warn!(error = %e, "Saved session unavailable, trying --token");
                Self::from_cli(cli_token)
            }
        };

        match &resolved {
            Some(found) => {
                debug!(source = %found.source, token = %found.token, "Resolved session token");
            }
            None => debug!("No saved session and no --token given"),
        }
        resolved
    }

    fn from_cli(cli_token: Option<String>) -> Option<ResolvedToken> {
        let raw = cli_token.filter(|raw| !raw.trim().is_empty())?;
        match AuthToken::new(raw) {
            Some(token) => Some(ResolvedToken::new(token, TokenSource::CommandLine)),
            None => {
                warn!("Ignoring --token / CREWCLOCK_TOKEN: not a well-formed bearer token");
                None
            }
        }
    }
}
