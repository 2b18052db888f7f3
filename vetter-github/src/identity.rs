//! Reviewer identity backed by a GitHub sign-in

use tracing::warn;
use vetter_core::{IdentityProvider, ReviewerIdentity};

use crate::{GitHubClient, Result};

/// Identity of the GitHub user a token belongs to
///
/// The profile is fetched once at sign-in; lookups afterwards are synchronous.
#[derive(Debug, Clone, Default)]
pub struct GitHubIdentity {
    reviewer: Option<ReviewerIdentity>,
}

impl GitHubIdentity {
    /// Sign in with the given client
    pub async fn sign_in(client: &GitHubClient) -> Result<Self> {
        let reviewer = client.current_reviewer().await?;
        Ok(Self::from_reviewer(reviewer))
    }

    /// Sign in if a token is configured, otherwise stay signed out
    pub async fn sign_in_or_anonymous() -> Self {
        let client = match GitHubClient::new() {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "GitHub sign-in unavailable");
                return Self::default();
            }
        };

        match Self::sign_in(&client).await {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "GitHub sign-in failed");
                Self::default()
            }
        }
    }

    pub fn from_reviewer(reviewer: ReviewerIdentity) -> Self {
        Self {
            reviewer: Some(reviewer),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.reviewer.is_some()
    }
}

impl IdentityProvider for GitHubIdentity {
    fn current_reviewer(&self) -> Option<ReviewerIdentity> {
        self.reviewer.clone()
    }
}
