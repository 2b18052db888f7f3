//! Repository modules for database operations

pub mod objects;
pub mod reviews;

pub use objects::{content_hash, ContentObjectRepository};
pub use reviews::ReviewLedgerRepository;
