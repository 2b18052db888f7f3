//! Vetter Core - reviewing work-plan applications
//!
//! This crate holds the application records, the classifier and selection
//! state behind the review panel, and the submission flow that stores a
//! reviewed application and records the decision.

pub mod collab;
pub mod config;
pub mod error;
pub mod model;
pub mod review;
pub mod secrets;

pub use collab::{
    ContentStore, IdentityProvider, PanelController, ReviewEntry, ReviewRecorder, StaticIdentity,
};
pub use config::Config;
pub use error::{Error, Result};
pub use model::{Applicant, Application, Issue, Request, Review, ReviewerIdentity};
pub use review::{
    ApplicationView, ClosePanel, PanelView, RequestKind, ReviewSession, ReviewSubmitter,
    Submission,
};
pub use secrets::Secrets;
