//! Review submission
//!
//! Builds the review payload, attaches it to a copy of the active
//! application, stores the merged record and records the decision.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use num_bigint::{BigInt, Sign};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::selection::ReviewSession;
use crate::collab::{ContentStore, IdentityProvider, PanelController, ReviewEntry, ReviewRecorder};
use crate::model::{Request, Review, ReviewerIdentity};
use crate::{Error, Result};

/// When the review panel is closed during a submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosePanel {
    /// Close as soon as the decision is made, before any write
    #[default]
    Immediately,
    /// Close only once the decision has been recorded
    AfterRecord,
}

impl std::fmt::Display for ClosePanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClosePanel::Immediately => write!(f, "immediately"),
            ClosePanel::AfterRecord => write!(f, "after_record"),
        }
    }
}

impl std::str::FromStr for ClosePanel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "immediately" => Ok(ClosePanel::Immediately),
            "after_record" | "after-record" => Ok(ClosePanel::AfterRecord),
            other => Err(Error::Config(format!(
                "Unknown close_panel value '{}'. Expected immediately or after_record",
                other
            ))),
        }
    }
}

/// Format a timestamp the way stored reviews carry it: `2020-01-21T23:00:00.000Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Assemble a review payload
pub fn build_review(
    feedback: &str,
    approved: bool,
    reviewer: ReviewerIdentity,
    now: DateTime<Utc>,
) -> Review {
    Review {
        feedback: feedback.to_string(),
        approved,
        user: Some(reviewer),
        review_date: iso_timestamp(now),
        extra: serde_json::Map::new(),
    }
}

/// Hex-encode a repository id for the review-recording call
///
/// Follows web3 `toHex` for strings: a 40-digit address is lowercased with a
/// `0x` prefix, any other `0x`/`0X` string passes through unchanged, decimal
/// integers of any size are encoded as numbers (negative ones as `-0x..`)
/// and anything else is encoded as UTF-8 bytes.
pub fn repo_id_hex(repo_id: &str) -> String {
    let unprefixed = repo_id
        .strip_prefix("0x")
        .or_else(|| repo_id.strip_prefix("0X"));

    let address = unprefixed.unwrap_or(repo_id);
    if address.len() == 40 && address.chars().all(|c| c.is_ascii_hexdigit()) {
        return format!("0x{}", address.to_ascii_lowercase());
    }

    if unprefixed.is_some() {
        return repo_id.to_string();
    }

    if let Some(number) = decimal(repo_id) {
        let sign = if number.sign() == Sign::Minus { "-" } else { "" };
        return format!("{}0x{}", sign, number.magnitude().to_str_radix(16));
    }

    let encoded: String = repo_id.bytes().map(|b| format!("{:02x}", b)).collect();
    format!("0x{}", encoded)
}

fn decimal(value: &str) -> Option<BigInt> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigInt::parse_bytes(value.as_bytes(), 10)
}

/// Outcome of a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// The application with the new review attached
    pub record: Request,
    /// Reference returned by the content store
    pub content_hash: String,
    /// Values handed to the review recorder
    pub entry: ReviewEntry,
}

/// Submits accept/reject decisions through explicit collaborators
pub struct ReviewSubmitter {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn ContentStore>,
    recorder: Arc<dyn ReviewRecorder>,
    panel: Arc<dyn PanelController>,
    close_panel: ClosePanel,
}

impl ReviewSubmitter {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn ContentStore>,
        recorder: Arc<dyn ReviewRecorder>,
        panel: Arc<dyn PanelController>,
    ) -> Self {
        Self {
            identity,
            store,
            recorder,
            panel,
            close_panel: ClosePanel::default(),
        }
    }

    /// Set when the panel is closed
    pub fn with_close_panel(mut self, close_panel: ClosePanel) -> Self {
        self.close_panel = close_panel;
        self
    }

    /// Accept or reject the session's active application
    pub async fn submit(&self, session: ReviewSession, approved: bool) -> Result<Submission> {
        self.submit_at(session, approved, Utc::now()).await
    }

    /// Accept or reject the active application with an explicit decision time
    ///
    /// The session is consumed: nothing can be selected after a decision.
    /// Preconditions (writable session, pending application, signed-in
    /// reviewer) are checked before the panel is closed or anything is written.
    /// The store write and the record call run strictly in that order.
    pub async fn submit_at(
        &self,
        session: ReviewSession,
        approved: bool,
        now: DateTime<Utc>,
    ) -> Result<Submission> {
        if session.is_read_only() {
            return Err(Error::ReadOnly);
        }
        let active = session.active_request()?;
        if active.is_reviewed() {
            return Err(Error::AlreadyReviewed(active.applicant().login.clone()));
        }
        let reviewer = self
            .identity
            .current_reviewer()
            .ok_or(Error::NotAuthenticated)?;

        if self.close_panel == ClosePanel::Immediately {
            self.panel.close();
        }

        let issue = session.issue();
        let review = build_review(session.feedback(), approved, reviewer, now);
        let record = active.with_review(review);

        let content_hash = self.store.store(&record).await?;
        info!(
            issue = issue.number,
            contributor = %active.contributor_addr(),
            hash = %content_hash,
            "Stored reviewed application"
        );

        let entry = ReviewEntry {
            repo_id_hex: repo_id_hex(&issue.repo_id),
            issue_number: issue.number,
            contributor_addr: active.contributor_addr().to_string(),
            content_hash: content_hash.clone(),
            approved,
        };
        self.recorder.record(&entry).await?;
        info!(
            issue = issue.number,
            contributor = %entry.contributor_addr,
            approved,
            "Recorded application review"
        );

        if self.close_panel == ClosePanel::AfterRecord {
            self.panel.close();
        }

        Ok(Submission {
            record,
            content_hash,
            entry,
        })
    }
}

impl std::fmt::Debug for ReviewSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewSubmitter")
            .field("close_panel", &self.close_panel)
            .finish_non_exhaustive()
    }
}
