//! Data models for database records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored record, addressed by the SHA-256 of its body
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContentObject {
    /// Lowercase hex SHA-256 of `body`
    pub hash: String,
    /// JSON text of the record
    pub body: String,
    /// When the body was first stored
    pub created_at: DateTime<Utc>,
}

/// One recorded review decision
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LedgerEntry {
    pub id: i64,
    pub repo_id_hex: String,
    pub issue_number: i64,
    pub contributor_addr: String,
    /// Reference of the reviewed record in `content_objects`
    pub content_hash: String,
    pub approved: bool,
    pub recorded_at: DateTime<Utc>,
}
