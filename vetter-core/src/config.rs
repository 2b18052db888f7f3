//! Configuration management for vetter
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (VETTER_*)
//! 3. Config file (~/.config/vetter/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::ReviewerIdentity;
use crate::review::ClosePanel;
use crate::{Error, Result};

/// Reviewer profile used when no GitHub sign-in is available
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewerConfig {
    /// Reviewer login; unset means "ask GitHub"
    pub login: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub avatar_url: Option<String>,
}

/// Local database settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Path to the SQLite file (default: ~/.cache/vetter/vetter.db)
    pub path: Option<PathBuf>,
}

/// Review panel behavior
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// When the panel closes during a submission
    pub close_panel: ClosePanel,
    /// Open every session without decision controls
    pub read_only: bool,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub reviewer: ReviewerConfig,
    pub database: DatabaseSettings,
    pub review: ReviewConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/vetter/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vetter").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - VETTER_REVIEWER: reviewer login
    /// - VETTER_DB_PATH: database file
    /// - VETTER_CLOSE_PANEL: `immediately` or `after_record`
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(login) = std::env::var("VETTER_REVIEWER") {
            self.reviewer.login = Some(login);
        }

        if let Ok(path) = std::env::var("VETTER_DB_PATH") {
            self.database.path = Some(PathBuf::from(path));
        }

        if let Ok(value) = std::env::var("VETTER_CLOSE_PANEL") {
            match value.parse() {
                Ok(policy) => self.review.close_panel = policy,
                Err(e) => warn!(error = %e, "Ignoring VETTER_CLOSE_PANEL"),
            }
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, reviewer: Option<String>, db_path: Option<PathBuf>) -> Self {
        if let Some(login) = reviewer {
            self.reviewer.login = Some(login);
        }

        if let Some(path) = db_path {
            self.database.path = Some(path);
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(reviewer: Option<String>, db_path: Option<PathBuf>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(reviewer, db_path))
    }

    /// Reviewer identity described by the configuration, if a login is set
    pub fn reviewer_identity(&self) -> Option<ReviewerIdentity> {
        let login = self.reviewer.login.as_deref()?.trim();
        if login.is_empty() {
            return None;
        }

        let mut identity = ReviewerIdentity::new(login);
        if let Some(name) = &self.reviewer.name {
            identity = identity.with_name(name.as_str());
        }
        if let Some(url) = &self.reviewer.url {
            identity = identity.with_url(url.as_str());
        }
        if let Some(avatar_url) = &self.reviewer.avatar_url {
            identity = identity.with_avatar_url(avatar_url.as_str());
        }
        Some(identity)
    }
}
