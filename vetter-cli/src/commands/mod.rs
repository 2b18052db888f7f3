//! CLI command implementations

pub mod history;
pub mod review;
pub mod show;

pub use history::HistoryArgs;
pub use review::ReviewArgs;
pub use show::ShowArgs;

use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use vetter_core::{Issue, RequestKind, ReviewSession};

/// Category tab selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Applications without a decision
    Available,
    /// Applications with a recorded decision
    Reviewed,
}

impl From<KindArg> for RequestKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Available => RequestKind::AvailableForReview,
            KindArg::Reviewed => RequestKind::Reviewed,
        }
    }
}

/// Read an issue and its applications from a JSON file
pub fn load_issue(path: &Path) -> anyhow::Result<Issue> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read issue file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse issue file {}", path.display()))
}

/// Open a session and apply the tab/applicant choices given on the command line
pub fn open_session(
    issue: Issue,
    request_index: usize,
    read_only: bool,
    kind: Option<KindArg>,
    applicant: Option<usize>,
) -> anyhow::Result<ReviewSession> {
    let mut session = ReviewSession::new(issue, request_index, read_only)?;

    if let Some(kind) = kind {
        let kind = RequestKind::from(kind);
        let index = session
            .classification()
            .index_of(kind)
            .ok_or_else(|| anyhow::anyhow!("No applications are {}", kind.label().to_lowercase()))?;
        session.select_type(index)?;
    }

    if let Some(applicant) = applicant {
        session.select_request(applicant)?;
    }

    Ok(session)
}
