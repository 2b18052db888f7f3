//! Collaborators a review submission hands work to
//!
//! The submission flow never reaches for ambient state: the reviewer
//! identity, the content-addressed store, the review-recording call and the
//! panel are all passed in as trait objects.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Request, ReviewerIdentity};
use crate::Result;

/// Source of the currently signed-in reviewer
pub trait IdentityProvider: Send + Sync {
    /// The signed-in reviewer, or `None` when nobody is signed in
    fn current_reviewer(&self) -> Option<ReviewerIdentity>;
}

/// Content-addressed persistence for application records
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store a record and return the reference it can be fetched by
    async fn store(&self, record: &Request) -> Result<String>;
}

/// The five values a review is recorded with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    /// Repository id, hex encoded
    pub repo_id_hex: String,
    pub issue_number: u64,
    /// Address of the contributor whose application was reviewed
    pub contributor_addr: String,
    /// Reference of the stored record that carries the review
    pub content_hash: String,
    pub approved: bool,
}

/// Remote call that records a review decision
#[async_trait]
pub trait ReviewRecorder: Send + Sync {
    async fn record(&self, entry: &ReviewEntry) -> Result<()>;
}

/// Lifecycle of the panel hosting the review form
pub trait PanelController: Send + Sync {
    /// Close the panel; must not block
    fn close(&self);
}

/// Identity fixed at construction, e.g. from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    reviewer: Option<ReviewerIdentity>,
}

impl StaticIdentity {
    pub fn new(reviewer: ReviewerIdentity) -> Self {
        Self {
            reviewer: Some(reviewer),
        }
    }

    /// An identity provider with nobody signed in
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_reviewer(&self) -> Option<ReviewerIdentity> {
        self.reviewer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_identity() {
        let identity = StaticIdentity::new(ReviewerIdentity::new("alice"));
        assert_eq!(identity.current_reviewer().unwrap().login, "alice");
        assert!(StaticIdentity::anonymous().current_reviewer().is_none());
    }

    #[test]
    fn test_review_entry_serializes_fields() {
        let entry = ReviewEntry {
            repo_id_hex: "0x01".to_string(),
            issue_number: 3,
            contributor_addr: "0xabc".to_string(),
            content_hash: "deadbeef".to_string(),
            approved: false,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["issue_number"], 3);
        assert_eq!(value["approved"], false);
    }
}
