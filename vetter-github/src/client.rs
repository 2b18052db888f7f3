//! GitHub API client using octocrab

use crate::{Error, Result};
use octocrab::Octocrab;
use tracing::{debug, info};
use vetter_core::{ReviewerIdentity, Secrets};

/// Authenticated GitHub client
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Create a client from the configured token
    ///
    /// Token is loaded from (in priority order):
    /// 1. GITHUB_TOKEN environment variable
    /// 2. ~/.config/vetter/secrets.toml
    pub fn new() -> Result<Self> {
        let secrets = Secrets::load().map_err(|e| Error::Auth(e.to_string()))?;

        let token = secrets.github_token().ok_or_else(|| {
            Error::Auth(
                "GitHub token not found. Set GITHUB_TOKEN environment variable \
                 or add token to ~/.config/vetter/secrets.toml"
                    .to_string(),
            )
        })?;

        Self::with_token(token)
    }

    /// Create a client for an explicit token
    pub fn with_token(token: impl Into<String>) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        Ok(Self { client })
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    /// Fetch the profile of the user the token belongs to
    pub async fn current_reviewer(&self) -> Result<ReviewerIdentity> {
        debug!("Fetching authenticated GitHub user");

        let user = self.client.current().user().await.map_err(|e| match e {
            octocrab::Error::GitHub { source, .. } if source.message.contains("Bad credentials") => {
                Error::Auth("Invalid GitHub token".to_string())
            }
            other => Error::Api(other),
        })?;

        info!(login = %user.login, "Signed in to GitHub");

        Ok(ReviewerIdentity::new(user.login)
            .with_id(user.node_id)
            .with_url(user.html_url.to_string())
            .with_avatar_url(user.avatar_url.to_string()))
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient").finish_non_exhaustive()
    }
}
