//! Display shaping for the active application

use serde::Serialize;

use super::selection::ReviewSession;
use crate::model::Request;
use crate::Result;

/// Text shown when a review carries no feedback
pub const NO_FEEDBACK: &str = "No feedback was provided";

/// Decision details of a reviewed application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewStatus {
    pub approved: bool,
    pub review_date: String,
    /// Feedback text, or [`NO_FEEDBACK`]
    pub feedback: String,
    pub reviewer: Option<String>,
}

impl ReviewStatus {
    pub fn verdict(&self) -> &'static str {
        if self.approved {
            "Accepted"
        } else {
            "Rejected"
        }
    }
}

/// Everything the review panel shows for one application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationView {
    pub applicant_name: String,
    pub applicant_login: String,
    pub applicant_url: Option<String>,
    pub application_date: Option<String>,
    pub workplan: String,
    pub hours: String,
    pub eta: String,
    pub status: Option<ReviewStatus>,
}

impl ApplicationView {
    pub fn from_request(request: &Request) -> Self {
        let application = request.application();
        let applicant = &application.user;

        let status = request.review().map(|review| ReviewStatus {
            approved: review.approved,
            review_date: review.review_date.clone(),
            feedback: if review.feedback.is_empty() {
                NO_FEEDBACK.to_string()
            } else {
                review.feedback.clone()
            },
            reviewer: review.user.as_ref().map(|u| u.login.clone()),
        });

        Self {
            applicant_name: applicant.display_name().to_string(),
            applicant_login: applicant.login.clone(),
            applicant_url: applicant.url().map(str::to_string),
            application_date: applicant.application_date().map(str::to_string),
            workplan: application.workplan.clone(),
            hours: application.hours.clone(),
            eta: application.eta.clone(),
            status,
        }
    }
}

/// The whole panel: selectors, the active application and whether the
/// decision form is offered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub issue_number: u64,
    pub issue_title: Option<String>,
    pub type_labels: Vec<&'static str>,
    pub type_index: usize,
    pub applicants: Vec<String>,
    pub applicant_index: usize,
    pub application: ApplicationView,
    pub decision_enabled: bool,
}

impl PanelView {
    pub fn from_session(session: &ReviewSession) -> Result<Self> {
        let selection = session.selection();
        let issue = session.issue();
        Ok(Self {
            issue_number: issue.number,
            issue_title: issue.title().map(str::to_string),
            type_labels: session.labels(),
            type_index: selection.type_index(),
            applicants: session
                .applicant_logins()
                .into_iter()
                .map(str::to_string)
                .collect(),
            applicant_index: selection.request_index(),
            application: ApplicationView::from_request(session.active_request()?),
            decision_enabled: session.accepts_decision(),
        })
    }
}
