//! Append-only ledger of review decisions

use chrono::Utc;
use sqlx::SqlitePool;
use vetter_core::ReviewEntry;

use crate::error::{Error, Result};
use crate::models::LedgerEntry;

/// Repository for recorded review decisions
pub struct ReviewLedgerRepository<'a> {
    pool: &'a SqlitePool,
}

fn issue_number_param(issue_number: u64) -> Result<i64> {
    i64::try_from(issue_number)
        .map_err(|_| Error::InvalidData(format!("issue number {} is too large", issue_number)))
}

impl<'a> ReviewLedgerRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a decision
    pub async fn record(&self, entry: &ReviewEntry) -> Result<LedgerEntry> {
        let result = sqlx::query(
            r#"
            INSERT INTO application_reviews (
                repo_id_hex, issue_number, contributor_addr, content_hash, approved, recorded_at
            )
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.repo_id_hex)
        .bind(issue_number_param(entry.issue_number)?)
        .bind(&entry.contributor_addr)
        .bind(&entry.content_hash)
        .bind(entry.approved)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<LedgerEntry> {
        sqlx::query_as::<_, LedgerEntry>("SELECT * FROM application_reviews WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("review {}", id)))
    }

    /// All decisions for an issue, oldest first
    pub async fn list_for_issue(
        &self,
        repo_id_hex: &str,
        issue_number: u64,
    ) -> Result<Vec<LedgerEntry>> {
        sqlx::query_as::<_, LedgerEntry>(
            "SELECT * FROM application_reviews WHERE repo_id_hex = ? AND issue_number = ? ORDER BY id",
        )
        .bind(repo_id_hex)
        .bind(issue_number_param(issue_number)?)
        .fetch_all(self.pool)
        .await
        .map_err(Into::into)
    }

    /// Most recent decision for one contributor on an issue
    pub async fn latest_for_contributor(
        &self,
        repo_id_hex: &str,
        issue_number: u64,
        contributor_addr: &str,
    ) -> Result<Option<LedgerEntry>> {
        sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT * FROM application_reviews
            WHERE repo_id_hex = ? AND issue_number = ? AND contributor_addr = ?
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(repo_id_hex)
        .bind(issue_number_param(issue_number)?)
        .bind(contributor_addr)
        .fetch_optional(self.pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, DatabaseConfig};
    use crate::repos::ContentObjectRepository;
    use tempfile::TempDir;

    async fn setup_test_db() -> (Database, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Database::open(DatabaseConfig::new(&db_path)).await.unwrap();
        (db, temp_dir)
    }

    async fn entry(db: &Database, contributor: &str, issue_number: u64, approved: bool) -> ReviewEntry {
        let body = format!("{{\"contributorAddr\":\"{}\",\"approved\":{}}}", contributor, approved);
        let content_hash = ContentObjectRepository::new(db.pool())
            .put(&body)
            .await
            .unwrap();
        ReviewEntry {
            repo_id_hex: "0x616263".to_string(),
            issue_number,
            contributor_addr: contributor.to_string(),
            content_hash,
            approved,
        }
    }

    #[tokio::test]
    async fn test_record_and_list() {
        let (db, _temp) = setup_test_db().await;
        let repo = ReviewLedgerRepository::new(db.pool());

        let first = entry(&db, "0xaaa", 7, true).await;
        let second = entry(&db, "0xbbb", 7, false).await;
        let other_issue = entry(&db, "0xaaa", 8, true).await;

        let recorded = repo.record(&first).await.unwrap();
        assert_eq!(recorded.contributor_addr, "0xaaa");
        assert_eq!(recorded.issue_number, 7);
        assert!(recorded.approved);
        assert_eq!(recorded.content_hash, first.content_hash);

        repo.record(&second).await.unwrap();
        repo.record(&other_issue).await.unwrap();

        let entries = repo.list_for_issue("0x616263", 7).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].contributor_addr, "0xaaa");
        assert_eq!(entries[1].contributor_addr, "0xbbb");
        assert!(!entries[1].approved);
    }

    #[tokio::test]
    async fn test_latest_for_contributor() {
        let (db, _temp) = setup_test_db().await;
        let repo = ReviewLedgerRepository::new(db.pool());

        repo.record(&entry(&db, "0xaaa", 7, false).await).await.unwrap();
        repo.record(&entry(&db, "0xaaa", 7, true).await).await.unwrap();

        let latest = repo
            .latest_for_contributor("0x616263", 7, "0xaaa")
            .await
            .unwrap()
            .unwrap();
        assert!(latest.approved);

        assert!(repo
            .latest_for_contributor("0x616263", 7, "0xccc")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_record_requires_stored_content() {
        let (db, _temp) = setup_test_db().await;
        let repo = ReviewLedgerRepository::new(db.pool());

        let dangling = ReviewEntry {
            repo_id_hex: "0x01".to_string(),
            issue_number: 1,
            contributor_addr: "0xaaa".to_string(),
            content_hash: "missing".to_string(),
            approved: true,
        };
        assert!(matches!(repo.record(&dangling).await, Err(Error::Sqlx(_))));
    }
}
