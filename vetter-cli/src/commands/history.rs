//! History command - list recorded decisions for an issue

use anyhow::Context;
use clap::Args;
use vetter_core::review::repo_id_hex;
use vetter_core::{Config, Request};
use vetter_db::{
    ContentObjectRepository, Database, DatabaseConfig, LedgerEntry, ReviewLedgerRepository,
};

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Repository identifier, as in the issue's `repoId`
    pub repo_id: String,

    /// Issue number
    pub issue_number: u64,

    /// Also load each stored record and print the reviewer and feedback
    #[arg(long)]
    pub details: bool,
}

impl HistoryArgs {
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let repo_hex = repo_id_hex(&self.repo_id);
        let db_config = DatabaseConfig::from_optional_path(config.database.path.clone());
        if verbose {
            tracing::info!(path = %db_config.path.display(), repo = %repo_hex, "Opening ledger");
        }

        let db = Database::open(db_config.clone())
            .await
            .with_context(|| format!("Failed to open database {}", db_config.path.display()))?;

        let entries = ReviewLedgerRepository::new(db.pool())
            .list_for_issue(&repo_hex, self.issue_number)
            .await?;

        println!("Review History: {} #{}", self.repo_id, self.issue_number);
        println!("==============");
        println!();

        if entries.is_empty() {
            println!("No reviews recorded.");
            db.close().await;
            return Ok(());
        }

        let objects = ContentObjectRepository::new(db.pool());
        for entry in &entries {
            println!("{}", format_entry(entry));
            if self.details {
                match objects.get_json::<Request>(&entry.content_hash).await {
                    Ok(record) => {
                        if let Some(review) = record.review() {
                            let reviewer = review
                                .user
                                .as_ref()
                                .map(|u| u.login.as_str())
                                .unwrap_or("(unknown)");
                            println!("    reviewer: {}", reviewer);
                            println!("    feedback: {}", review.feedback);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(
                            hash = %entry.content_hash,
                            error = %e,
                            "Stored record unreadable"
                        );
                    }
                }
            }
        }

        println!();
        println!("{} review(s)", entries.len());
        db.close().await;
        Ok(())
    }
}

fn format_entry(entry: &LedgerEntry) -> String {
    format!(
        "#{:<4} {}  {:<8} {}  {}",
        entry.id,
        entry.recorded_at.format("%Y-%m-%d %H:%M"),
        if entry.approved { "accepted" } else { "rejected" },
        entry.contributor_addr,
        entry.content_hash
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_entry() {
        let entry = LedgerEntry {
            id: 3,
            repo_id_hex: "0x616263".to_string(),
            issue_number: 9,
            contributor_addr: "0x2".to_string(),
            content_hash: "abcd".to_string(),
            approved: false,
            recorded_at: chrono::Utc.with_ymd_and_hms(2020, 1, 21, 23, 0, 0).unwrap(),
        };

        assert_eq!(
            format_entry(&entry),
            "#3    2020-01-21 23:00  rejected 0x2  abcd"
        );
    }
}
