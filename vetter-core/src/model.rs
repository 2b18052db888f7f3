//! Issue, application and review records
//!
//! These types mirror the JSON records kept in the content-addressed store.
//! A request is serialized as a flat object whose optional `review` key marks
//! it as reviewed; in Rust the two states are distinct enum variants.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An issue together with every application submitted for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Repository identifier as known to the project registry
    #[serde(rename = "repoId")]
    pub repo_id: String,
    /// Issue number within the repository
    pub number: u64,
    /// Applications in submission order
    #[serde(rename = "requestsData", default)]
    pub requests_data: Vec<Request>,
    /// Every other issue field (`id`, `title`, `url`, ...), kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Issue {
    /// Issue title, when the record carries one
    pub fn title(&self) -> Option<&str> {
        text(&self.extra, "title")
    }
}

fn text<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// The person who applied to work on an issue
///
/// Only `login` is interpreted; the rest of the profile (`id`, `name`,
/// `url`, `avatarUrl`, `applicationDate`, ...) is kept exactly as received,
/// explicit nulls included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub login: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Applicant {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            fields: Map::new(),
        }
    }

    /// Set a profile field by its wire name
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        text(&self.fields, "id")
    }

    pub fn name(&self) -> Option<&str> {
        text(&self.fields, "name")
    }

    pub fn url(&self) -> Option<&str> {
        text(&self.fields, "url")
    }

    pub fn avatar_url(&self) -> Option<&str> {
        text(&self.fields, "avatarUrl")
    }

    pub fn application_date(&self) -> Option<&str> {
        text(&self.fields, "applicationDate")
    }

    /// Name shown for the applicant: the profile name, or the login when unset
    pub fn display_name(&self) -> &str {
        match self.name() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.login,
        }
    }
}

/// The fields every application carries, reviewed or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Chain address the contributor applied from
    #[serde(rename = "contributorAddr")]
    pub contributor_addr: String,
    /// Content reference of the originally stored submission
    #[serde(rename = "requestIPFSHash")]
    pub request_ipfs_hash: String,
    pub workplan: String,
    /// Estimated hours, as entered
    pub hours: String,
    /// Estimated completion date, or `-` when none was given
    pub eta: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack1: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack2: Option<bool>,
    pub user: Applicant,
    /// Fields this crate does not interpret; kept so stored records round-trip
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A signed-in reviewer's profile
///
/// Stored like [`Applicant`]: `login` plus the remaining profile fields
/// under their wire names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerIdentity {
    pub login: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ReviewerIdentity {
    /// Create an identity with only a login
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            fields: Map::new(),
        }
    }

    fn with_text(mut self, key: &str, value: String) -> Self {
        self.fields.insert(key.to_string(), Value::String(value));
        self
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_text("id", id.into())
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with_text("name", name.into())
    }

    pub fn with_url(self, url: impl Into<String>) -> Self {
        self.with_text("url", url.into())
    }

    pub fn with_avatar_url(self, avatar_url: impl Into<String>) -> Self {
        self.with_text("avatarUrl", avatar_url.into())
    }

    pub fn id(&self) -> Option<&str> {
        text(&self.fields, "id")
    }

    pub fn name(&self) -> Option<&str> {
        text(&self.fields, "name")
    }

    pub fn url(&self) -> Option<&str> {
        text(&self.fields, "url")
    }

    pub fn avatar_url(&self) -> Option<&str> {
        text(&self.fields, "avatarUrl")
    }
}

/// A reviewer's decision on an application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub feedback: String,
    pub approved: bool,
    /// Reviewer who made the decision; absent on some older records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ReviewerIdentity>,
    /// ISO-8601 timestamp of the decision
    pub review_date: String,
    /// Fields this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One application for an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RequestRecord", into = "RequestRecord")]
pub enum Request {
    /// Waiting for a decision
    Unreviewed(Application),
    /// A decision has been attached
    Reviewed {
        application: Application,
        review: Review,
    },
}

/// Flat wire shape of a request
#[derive(Serialize, Deserialize)]
struct RequestRecord {
    #[serde(flatten)]
    application: Application,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    review: Option<Review>,
}

impl From<RequestRecord> for Request {
    fn from(record: RequestRecord) -> Self {
        match record.review {
            Some(review) => Request::Reviewed {
                application: record.application,
                review,
            },
            None => Request::Unreviewed(record.application),
        }
    }
}

impl From<Request> for RequestRecord {
    fn from(request: Request) -> Self {
        match request {
            Request::Unreviewed(application) => RequestRecord {
                application,
                review: None,
            },
            Request::Reviewed {
                application,
                review,
            } => RequestRecord {
                application,
                review: Some(review),
            },
        }
    }
}

impl Request {
    /// The application fields, regardless of review state
    pub fn application(&self) -> &Application {
        match self {
            Request::Unreviewed(application) => application,
            Request::Reviewed { application, .. } => application,
        }
    }

    /// The attached review, if any
    pub fn review(&self) -> Option<&Review> {
        match self {
            Request::Unreviewed(_) => None,
            Request::Reviewed { review, .. } => Some(review),
        }
    }

    pub fn is_reviewed(&self) -> bool {
        matches!(self, Request::Reviewed { .. })
    }

    pub fn contributor_addr(&self) -> &str {
        &self.application().contributor_addr
    }

    pub fn applicant(&self) -> &Applicant {
        &self.application().user
    }

    /// A copy of this request with `review` attached
    ///
    /// Any review already present on the copy is replaced; `self` is untouched.
    pub fn with_review(&self, review: Review) -> Request {
        Request::Reviewed {
            application: self.application().clone(),
            review,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    fn application(workplan: &str, hours: &str, login: &str) -> Application {
        Application {
            contributor_addr: "0xb4124cEB3451635DAcedd11767f004d8a28c6eE7".to_string(),
            request_ipfs_hash: "QmR9AjJ5Smhah5SnziqvZctosqpkCsTwbmPEgE1FydNXEe".to_string(),
            workplan: workplan.to_string(),
            hours: hours.to_string(),
            eta: "2020-01-21T23:00:00.000Z".to_string(),
            ack1: Some(true),
            ack2: Some(true),
            user: Applicant::new(login)
                .with_field("id", "MDQ6VXNlcjM0NDUyMTMx")
                .with_field("url", "https://github.com/rkzel")
                .with_field("applicationDate", "2020-01-13T09:40:08.065Z"),
            extra: Map::new(),
        }
    }

    pub fn unreviewed(workplan: &str, login: &str) -> Request {
        Request::Unreviewed(application(workplan, "1", login))
    }

    pub fn reviewed(workplan: &str, login: &str) -> Request {
        Request::Reviewed {
            application: application(workplan, "3", login),
            review: Review {
                feedback: "haha".to_string(),
                approved: true,
                user: None,
                review_date: "2020-01-21T23:00:00.000Z".to_string(),
                extra: Map::new(),
            },
        }
    }

    /// Two pending applications followed by one reviewed application
    pub fn mixed_issue() -> Issue {
        Issue {
            repo_id: "MDEwOlJlcG9zaXRvcnkyMjk3NjY2Mjc=".to_string(),
            number: 7,
            requests_data: vec![
                unreviewed("app1", "rkzel"),
                unreviewed("app2", "rkzel2"),
                reviewed("app3", "rkzel3"),
            ],
            extra: Map::from_iter([("title".to_string(), Value::from("Add dark mode"))]),
        }
    }
}
