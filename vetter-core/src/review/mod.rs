//! Reviewing work-plan applications
//!
//! This module classifies an issue's applications, tracks which one the
//! reviewer is looking at, and submits accept/reject decisions.

pub mod classify;
pub mod selection;
pub mod submission;
pub mod view;

pub use classify::{classify, Classification, Presence, RequestKind};
pub use selection::{ReviewSession, Selection};
pub use submission::{
    build_review, iso_timestamp, repo_id_hex, ClosePanel, ReviewSubmitter, Submission,
};
pub use view::{ApplicationView, PanelView, ReviewStatus, NO_FEEDBACK};
