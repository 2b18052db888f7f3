//! Content-addressed object storage

use chrono::Utc;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::ContentObject;

/// Hex SHA-256 of a body, used as its address
pub fn content_hash(body: &[u8]) -> String {
    format!("{:x}", Sha256::digest(body))
}

/// Repository for content-addressed records
pub struct ContentObjectRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContentObjectRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a body and return its hash
    ///
    /// Storing the same body twice keeps the first row.
    pub async fn put(&self, body: &str) -> Result<String> {
        let hash = content_hash(body.as_bytes());

        let result = sqlx::query(
            "INSERT OR IGNORE INTO content_objects (hash, body, created_at) VALUES (?, ?, ?)",
        )
        .bind(&hash)
        .bind(body)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        debug!(
            hash = %hash,
            new = result.rows_affected() > 0,
            "Stored content object"
        );
        Ok(hash)
    }

    /// Fetch a stored object by hash
    pub async fn get(&self, hash: &str) -> Result<ContentObject> {
        sqlx::query_as::<_, ContentObject>("SELECT * FROM content_objects WHERE hash = ?")
            .bind(hash)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("content object {}", hash)))
    }

    /// Fetch a stored object and decode its JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, hash: &str) -> Result<T> {
        let object = self.get(hash).await?;
        Ok(serde_json::from_str(&object.body)?)
    }
}
