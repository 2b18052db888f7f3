//! Database layer for vetter
//!
//! Provides a content-addressed store for application records and a ledger
//! of recorded review decisions, both in one SQLite file.

pub mod db;
pub mod error;
pub mod models;
pub mod repos;
pub mod store;

pub use db::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use models::{ContentObject, LedgerEntry};
pub use repos::{content_hash, ContentObjectRepository, ReviewLedgerRepository};
pub use store::{SqliteContentStore, SqliteReviewRecorder};
