//! Selection state for the review panel
//!
//! A [`ReviewSession`] holds one issue's applications, which category tab is
//! active and which application inside that category is shown. It is the
//! only mutable state of the panel besides the reviewer's feedback text.

use tracing::debug;

use super::classify::{classify, Classification, RequestKind};
use crate::model::{Issue, Request};
use crate::{Error, Result};

/// Active category tab and active application within it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    type_index: usize,
    request_index: usize,
}

impl Selection {
    pub fn new(type_index: usize, request_index: usize) -> Self {
        Self {
            type_index,
            request_index,
        }
    }

    pub fn type_index(&self) -> usize {
        self.type_index
    }

    pub fn request_index(&self) -> usize {
        self.request_index
    }

    /// Switch category tab; the application index always restarts at 0
    pub fn select_type(&mut self, index: usize) {
        self.type_index = index;
        self.request_index = 0;
    }

    /// Switch application within the current category
    pub fn select_request(&mut self, index: usize) {
        self.request_index = index;
    }
}

/// One reviewer's view over an issue's applications
#[derive(Debug, Clone)]
pub struct ReviewSession {
    issue: Issue,
    classification: Classification,
    selection: Selection,
    feedback: String,
    read_only: bool,
}

impl ReviewSession {
    /// Open a session on the application at `request_index` of the issue
    ///
    /// The category tab is chosen from the linked application's review state,
    /// and the application index points at it inside that category.
    pub fn new(issue: Issue, request_index: usize, read_only: bool) -> Result<Self> {
        let len = issue.requests_data.len();
        if len == 0 {
            return Err(Error::NoRequests(issue.number));
        }
        let start = issue
            .requests_data
            .get(request_index)
            .ok_or(Error::RequestIndexOutOfRange {
                index: request_index,
                len,
            })?;

        let classification = classify(&issue.requests_data);
        let type_index = classification.default_type_index(start);
        let kind = RequestKind::of(start);
        let position = issue.requests_data[..request_index]
            .iter()
            .filter(|r| kind.matches(r))
            .count();

        debug!(
            issue = issue.number,
            request_index,
            type_index,
            position,
            "Opened review session"
        );

        Ok(Self {
            issue,
            classification,
            selection: Selection::new(type_index, position),
            feedback: String::new(),
            read_only,
        })
    }

    pub fn issue(&self) -> &Issue {
        &self.issue
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Labels for the category selector
    pub fn labels(&self) -> Vec<&'static str> {
        self.classification.labels()
    }

    /// The category currently shown
    pub fn active_kind(&self) -> RequestKind {
        // type_index is only ever set through bounds-checked paths
        self.classification
            .kind_at(self.selection.type_index())
            .unwrap_or(RequestKind::AvailableForReview)
    }

    /// Applications in the active category, in submission order
    pub fn filtered_requests(&self) -> Vec<&Request> {
        let kind = self.active_kind();
        self.issue
            .requests_data
            .iter()
            .filter(|r| kind.matches(r))
            .collect()
    }

    /// Logins for the applicant selector of the active category
    pub fn applicant_logins(&self) -> Vec<&str> {
        self.filtered_requests()
            .into_iter()
            .map(|r| r.applicant().login.as_str())
            .collect()
    }

    /// The application currently shown
    pub fn active_request(&self) -> Result<&Request> {
        let filtered = self.filtered_requests();
        let index = self.selection.request_index();
        filtered
            .get(index)
            .copied()
            .ok_or(Error::RequestIndexOutOfRange {
                index,
                len: filtered.len(),
            })
    }

    /// Position of the active application in the issue's full list
    pub fn active_position(&self) -> Result<usize> {
        let kind = self.active_kind();
        let index = self.selection.request_index();
        self.issue
            .requests_data
            .iter()
            .enumerate()
            .filter(|(_, r)| kind.matches(r))
            .nth(index)
            .map(|(position, _)| position)
            .ok_or(Error::RequestIndexOutOfRange {
                index,
                len: self.filtered_requests().len(),
            })
    }

    /// Switch category tab
    pub fn select_type(&mut self, index: usize) -> Result<()> {
        let len = self.classification.kinds().len();
        if index >= len {
            return Err(Error::TypeIndexOutOfRange { index, len });
        }
        self.selection.select_type(index);
        debug!(type_index = index, kind = %self.active_kind(), "Selected type");
        Ok(())
    }

    /// Switch application within the active category
    pub fn select_request(&mut self, index: usize) -> Result<()> {
        let len = self.filtered_requests().len();
        if index >= len {
            return Err(Error::RequestIndexOutOfRange { index, len });
        }
        self.selection.select_request(index);
        debug!(request_index = index, "Selected request");
        Ok(())
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn set_feedback(&mut self, feedback: impl Into<String>) {
        self.feedback = feedback.into();
    }

    /// Whether accept/reject controls are offered for the active application
    pub fn accepts_decision(&self) -> bool {
        !self.read_only && matches!(self.active_request(), Ok(r) if !r.is_reviewed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{mixed_issue, reviewed, unreviewed};

    fn workplan(request: &Request) -> &str {
        &request.application().workplan
    }

    #[test]
    fn test_selection_select_type_resets_request_index() {
        let mut selection = Selection::new(0, 3);
        selection.select_type(1);
        assert_eq!(selection.type_index(), 1);
        assert_eq!(selection.request_index(), 0);

        selection.select_request(2);
        selection.select_type(1);
        assert_eq!(selection.request_index(), 0);
    }

    #[test]
    fn test_deep_link_to_reviewed_request() {
        let session = ReviewSession::new(mixed_issue(), 2, false).unwrap();

        assert_eq!(session.labels(), vec!["Available for review", "Reviewed"]);
        assert_eq!(session.selection().type_index(), 1);
        assert_eq!(session.selection().request_index(), 0);
        assert_eq!(session.active_kind(), RequestKind::Reviewed);
        assert_eq!(workplan(session.active_request().unwrap()), "app3");
    }

    #[test]
    fn test_deep_link_to_unreviewed_then_switch_type() {
        let mut session = ReviewSession::new(mixed_issue(), 0, false).unwrap();
        assert_eq!(session.selection().type_index(), 0);
        assert_eq!(session.active_kind(), RequestKind::AvailableForReview);
        assert_eq!(workplan(session.active_request().unwrap()), "app1");

        session.select_type(1).unwrap();
        assert_eq!(session.selection().request_index(), 0);
        assert_eq!(workplan(session.active_request().unwrap()), "app3");
    }

    #[test]
    fn test_deep_link_to_second_pending_request() {
        let session = ReviewSession::new(mixed_issue(), 1, false).unwrap();
        assert_eq!(session.selection().request_index(), 1);
        assert_eq!(workplan(session.active_request().unwrap()), "app2");
    }

    #[test]
    fn test_select_request_within_category() {
        let mut session = ReviewSession::new(mixed_issue(), 0, false).unwrap();
        session.select_request(1).unwrap();
        assert_eq!(workplan(session.active_request().unwrap()), "app2");
        assert_eq!(session.applicant_logins(), vec!["rkzel", "rkzel2"]);
    }

    #[test]
    fn test_active_position_maps_back_to_issue() {
        let mut session = ReviewSession::new(mixed_issue(), 0, false).unwrap();
        session.select_request(1).unwrap();
        assert_eq!(session.active_position().unwrap(), 1);

        session.select_type(1).unwrap();
        assert_eq!(session.active_position().unwrap(), 2);
    }

    #[test]
    fn test_select_request_out_of_range() {
        let mut session = ReviewSession::new(mixed_issue(), 2, false).unwrap();
        let err = session.select_request(1).unwrap_err();
        assert!(matches!(
            err,
            Error::RequestIndexOutOfRange { index: 1, len: 1 }
        ));
        assert_eq!(session.selection().request_index(), 0);
    }

    #[test]
    fn test_select_type_out_of_range_keeps_state() {
        let issue = Issue {
            requests_data: vec![unreviewed("a", "x")],
            ..mixed_issue()
        };
        let mut session = ReviewSession::new(issue, 0, false).unwrap();
        assert!(session.select_type(1).is_err());
        assert_eq!(session.selection().type_index(), 0);
    }

    #[test]
    fn test_filtered_requests_partition_input() {
        let issue = Issue {
            requests_data: vec![
                reviewed("r1", "a"),
                unreviewed("u1", "b"),
                reviewed("r2", "c"),
                unreviewed("u2", "d"),
            ],
            ..mixed_issue()
        };
        let mut session = ReviewSession::new(issue.clone(), 1, false).unwrap();

        let pending: Vec<_> = session.filtered_requests().into_iter().cloned().collect();
        session.select_type(1).unwrap();
        let done: Vec<_> = session.filtered_requests().into_iter().cloned().collect();

        assert!(pending.iter().all(|r| !r.is_reviewed()));
        assert!(done.iter().all(Request::is_reviewed));
        assert_eq!(pending.len() + done.len(), issue.requests_data.len());
        for request in &issue.requests_data {
            let in_pending = pending.contains(request);
            let in_done = done.contains(request);
            assert!(in_pending ^ in_done);
        }
    }

    #[test]
    fn test_new_rejects_bad_start_index() {
        let err = ReviewSession::new(mixed_issue(), 3, false).unwrap_err();
        assert!(matches!(
            err,
            Error::RequestIndexOutOfRange { index: 3, len: 3 }
        ));
    }

    #[test]
    fn test_new_rejects_empty_issue() {
        let issue = Issue {
            requests_data: Vec::new(),
            ..mixed_issue()
        };
        assert!(matches!(
            ReviewSession::new(issue, 0, false),
            Err(Error::NoRequests(7))
        ));
    }

    #[test]
    fn test_accepts_decision() {
        let mut session = ReviewSession::new(mixed_issue(), 0, false).unwrap();
        assert!(session.accepts_decision());

        session.select_type(1).unwrap();
        assert!(!session.accepts_decision());

        let read_only = ReviewSession::new(mixed_issue(), 0, true).unwrap();
        assert!(!read_only.accepts_decision());
    }

    #[test]
    fn test_feedback_text() {
        let mut session = ReviewSession::new(mixed_issue(), 0, false).unwrap();
        assert_eq!(session.feedback(), "");
        session.set_feedback("great work");
        assert_eq!(session.feedback(), "great work");
    }
}
