//! SQLite-backed review collaborators
//!
//! [`SqliteContentStore`] and [`SqliteReviewRecorder`] plug the local
//! database into [`vetter_core::ReviewSubmitter`].

use async_trait::async_trait;
use tracing::info;
use vetter_core::{ContentStore, Request, ReviewEntry, ReviewRecorder};

use crate::db::Database;
use crate::repos::{ContentObjectRepository, ReviewLedgerRepository};

/// Content store writing application records to `content_objects`
#[derive(Debug, Clone)]
pub struct SqliteContentStore {
    db: Database,
}

impl SqliteContentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentStore for SqliteContentStore {
    async fn store(&self, record: &Request) -> vetter_core::Result<String> {
        let body = serde_json::to_string(record)?;
        ContentObjectRepository::new(self.db.pool())
            .put(&body)
            .await
            .map_err(|e| vetter_core::Error::Store(e.to_string()))
    }
}

/// Review recorder appending to the local `application_reviews` ledger
#[derive(Debug, Clone)]
pub struct SqliteReviewRecorder {
    db: Database,
}

impl SqliteReviewRecorder {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRecorder for SqliteReviewRecorder {
    async fn record(&self, entry: &ReviewEntry) -> vetter_core::Result<()> {
        let recorded = ReviewLedgerRepository::new(self.db.pool())
            .record(entry)
            .await
            .map_err(|e| vetter_core::Error::Record(e.to_string()))?;
        info!(id = recorded.id, hash = %recorded.content_hash, "Appended review to ledger");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::DatabaseConfig;
    use tempfile::TempDir;
    use vetter_core::{
        Issue, PanelController, ReviewSession, ReviewSubmitter, ReviewerIdentity, StaticIdentity,
    };

    struct NoPanel;

    impl PanelController for NoPanel {
        fn close(&self) {}
    }

    const ISSUE: &str = r#"{
        "repoId": "abc",
        "number": 4,
        "requestsData": [
            {
                "contributorAddr": "0xb4124cEB3451635DAcedd11767f004d8a28c6eE7",
                "requestIPFSHash": "QmR9AjJ5Smhah5SnziqvZctosqpkCsTwbmPEgE1FydNXEe",
                "workplan": "app1", "hours": "1", "eta": "-", "ack1": true, "ack2": true,
                "user": { "login": "rkzel" },
                "bountySize": 3
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_submit_through_sqlite() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(DatabaseConfig::new(temp_dir.path().join("test.db")))
            .await
            .unwrap();

        let submitter = ReviewSubmitter::new(
            Arc::new(StaticIdentity::new(ReviewerIdentity::new("alice"))),
            Arc::new(SqliteContentStore::new(db.clone())),
            Arc::new(SqliteReviewRecorder::new(db.clone())),
            Arc::new(NoPanel),
        );

        let issue: Issue = serde_json::from_str(ISSUE).unwrap();
        let mut session = ReviewSession::new(issue, 0, false).unwrap();
        session.set_feedback("go ahead");
        let submission = submitter.submit(session, true).await.unwrap();

        let stored: Request = ContentObjectRepository::new(db.pool())
            .get_json(&submission.content_hash)
            .await
            .unwrap();
        assert_eq!(stored, submission.record);
        assert_eq!(stored.application().extra["bountySize"], 3);
        assert_eq!(stored.review().unwrap().feedback, "go ahead");

        let ledger = ReviewLedgerRepository::new(db.pool())
            .list_for_issue("0x616263", 4)
            .await
            .unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].content_hash, submission.content_hash);
        assert!(ledger[0].approved);
    }

    #[tokio::test]
    async fn test_store_is_content_addressed() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(DatabaseConfig::new(temp_dir.path().join("test.db")))
            .await
            .unwrap();
        let store = SqliteContentStore::new(db);

        let issue: Issue = serde_json::from_str(ISSUE).unwrap();
        let request = &issue.requests_data[0];
        let first = store.store(request).await.unwrap();
        let second = store.store(request).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }
}
