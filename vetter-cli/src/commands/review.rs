//! Review command - accept or reject one application

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use vetter_core::review::repo_id_hex;
use vetter_core::{
    Config, IdentityProvider, Issue, PanelController, ReviewSubmitter, StaticIdentity, Submission,
};
use vetter_db::{
    Database, DatabaseConfig, ReviewLedgerRepository, SqliteContentStore, SqliteReviewRecorder,
};
use vetter_github::GitHubIdentity;

use super::{load_issue, open_session, KindArg};

/// Arguments for the review command
#[derive(Args, Debug)]
#[command(group(
    clap::ArgGroup::new("decision")
        .required(true)
        .args(["accept", "reject"]),
))]
pub struct ReviewArgs {
    /// Issue JSON file with its applications
    pub issue: PathBuf,

    /// Application to review, as an index into the issue's applications
    #[arg(short = 'i', long)]
    pub request_index: usize,

    /// Category tab to switch to after opening
    #[arg(short = 't', long = "type", value_enum)]
    pub kind: Option<KindArg>,

    /// Applicant to review within the category
    #[arg(short, long)]
    pub applicant: Option<usize>,

    /// Accept the application
    #[arg(long)]
    pub accept: bool,

    /// Reject the application
    #[arg(long)]
    pub reject: bool,

    /// Feedback for the applicant
    #[arg(short, long)]
    pub feedback: Option<String>,

    /// Write the issue with the reviewed application to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Panel stand-in that reports when the review form goes away
#[derive(Debug, Default)]
struct TerminalPanel;

impl PanelController for TerminalPanel {
    fn close(&self) {
        tracing::debug!("Review panel closed");
    }
}

impl ReviewArgs {
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let approved = self.accept;

        println!("Vetter Review");
        println!("=============");
        println!();

        let issue = load_issue(&self.issue)?;
        let mut session = open_session(
            issue,
            self.request_index,
            config.review.read_only,
            self.kind,
            self.applicant,
        )?;
        if let Some(feedback) = &self.feedback {
            session.set_feedback(feedback.as_str());
        }

        let position = session.active_position()?;
        let issue = session.issue().clone();
        let contributor = session.active_request()?.contributor_addr().to_string();
        {
            let active = session.active_request()?;
            println!("Issue: #{}", issue.number);
            println!("Applicant: {}", active.applicant().display_name());
            println!("Decision: {}", if approved { "Accept" } else { "Reject" });
            println!();
        }

        let identity = resolve_identity(config).await;
        if verbose {
            tracing::info!(
                reviewer = ?identity.current_reviewer().map(|r| r.login),
                "Resolved reviewer"
            );
        }

        let db_config = DatabaseConfig::from_optional_path(config.database.path.clone());
        let db = Database::open(db_config.clone())
            .await
            .with_context(|| format!("Failed to open database {}", db_config.path.display()))?;

        let repo_hex = repo_id_hex(&issue.repo_id);
        if let Some(previous) = ReviewLedgerRepository::new(db.pool())
            .latest_for_contributor(&repo_hex, issue.number, &contributor)
            .await?
        {
            tracing::warn!(
                id = previous.id,
                contributor = %contributor,
                "Contributor already has a recorded decision"
            );
            println!(
                "Note: {} was already {} on {} (ledger #{})",
                contributor,
                if previous.approved { "accepted" } else { "rejected" },
                previous.recorded_at.format("%Y-%m-%d %H:%M"),
                previous.id
            );
            println!();
        }

        let submitter = ReviewSubmitter::new(
            identity,
            Arc::new(SqliteContentStore::new(db.clone())),
            Arc::new(SqliteReviewRecorder::new(db.clone())),
            Arc::new(TerminalPanel),
        )
        .with_close_panel(config.review.close_panel);

        let result = submitter.submit(session, approved).await;
        db.close().await;
        let submission = result?;

        println!("Stored record: {}", submission.content_hash);
        println!(
            "Recorded: {} for {} on issue #{}",
            if submission.entry.approved { "accepted" } else { "rejected" },
            submission.entry.contributor_addr,
            submission.entry.issue_number
        );

        if let Some(output) = &self.output {
            write_updated_issue(output, issue, position, &submission)?;
            println!("Updated issue written to {}", output.display());
        }

        Ok(())
    }
}

/// Reviewer identity: the configured login wins over a GitHub sign-in
async fn resolve_identity(config: &Config) -> Arc<dyn IdentityProvider> {
    match config.reviewer_identity() {
        Some(reviewer) => Arc::new(StaticIdentity::new(reviewer)),
        None => Arc::new(GitHubIdentity::sign_in_or_anonymous().await),
    }
}

/// Replace the reviewed application in the issue and write it as JSON
fn write_updated_issue(
    path: &Path,
    mut issue: Issue,
    position: usize,
    submission: &Submission,
) -> anyhow::Result<()> {
    let slot = issue
        .requests_data
        .get_mut(position)
        .ok_or_else(|| anyhow::anyhow!("Application {} is no longer in the issue", position))?;
    *slot = submission.record.clone();

    let json = serde_json::to_string_pretty(&issue)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write issue file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vetter_core::{Request, ReviewEntry, ReviewerIdentity};

    const ISSUE: &str = r#"{
        "id": "MDU6SXNzdWU1NDg1ODEzNDg=",
        "repoId": "abc",
        "number": 9,
        "url": "https://github.com/org/repo/issues/9",
        "requestsData": [
            { "contributorAddr": "0x1", "requestIPFSHash": "Qm1", "workplan": "one",
              "hours": "1", "eta": "-", "user": { "login": "ann" } },
            { "contributorAddr": "0x2", "requestIPFSHash": "Qm2", "workplan": "two",
              "hours": "2", "eta": "-", "user": { "login": "ben" } }
        ]
    }"#;

    #[test]
    fn test_write_updated_issue() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let issue: Issue = serde_json::from_str(ISSUE).unwrap();

        let review = vetter_core::review::build_review(
            "ok",
            true,
            ReviewerIdentity::new("alice"),
            chrono::Utc::now(),
        );
        let record = issue.requests_data[1].with_review(review);
        let submission = Submission {
            record: record.clone(),
            content_hash: "hash".to_string(),
            entry: ReviewEntry {
                repo_id_hex: "0x616263".to_string(),
                issue_number: 9,
                contributor_addr: "0x2".to_string(),
                content_hash: "hash".to_string(),
                approved: true,
            },
        };

        write_updated_issue(&path, issue, 1, &submission).unwrap();

        let written = load_issue(&path).unwrap();
        assert_eq!(written.extra["url"], "https://github.com/org/repo/issues/9");
        assert_eq!(written.extra["id"], "MDU6SXNzdWU1NDg1ODEzNDg=");
        assert!(!written.requests_data[0].is_reviewed());
        assert_eq!(written.requests_data[1], record);
        assert!(matches!(written.requests_data[1], Request::Reviewed { .. }));
    }

    #[tokio::test]
    async fn test_resolve_identity_from_config() {
        let mut config = Config::default();
        config.reviewer.login = Some("alice".to_string());

        let identity = resolve_identity(&config).await;
        assert_eq!(identity.current_reviewer().unwrap().login, "alice");
    }
}
