//! Vetter GitHub - reviewer sign-in through GitHub
//!
//! This crate resolves the reviewer signing a decision from a GitHub
//! personal access token.

mod client;
mod error;
mod identity;

pub use client::GitHubClient;
pub use error::{Error, Result};
pub use identity::GitHubIdentity;
