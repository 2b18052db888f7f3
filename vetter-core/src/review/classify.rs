//! Partitioning applications into review categories
//!
//! Applications are either available for review or already reviewed. The
//! category selector only offers the categories that actually occur for an
//! issue, always in the canonical order.

use serde::{Deserialize, Serialize};

use crate::model::Request;

/// A category of application shown as one tab of the type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    /// No decision yet
    AvailableForReview,
    /// A decision has been recorded
    Reviewed,
}

impl RequestKind {
    /// Every category, in the order the selector lists them
    pub const CANONICAL: [RequestKind; 2] = [RequestKind::AvailableForReview, RequestKind::Reviewed];

    /// Label shown in the type selector
    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::AvailableForReview => "Available for review",
            RequestKind::Reviewed => "Reviewed",
        }
    }

    /// The category a request belongs to
    pub fn of(request: &Request) -> Self {
        match request {
            Request::Unreviewed(_) => RequestKind::AvailableForReview,
            Request::Reviewed { .. } => RequestKind::Reviewed,
        }
    }

    /// Check whether a request belongs to this category
    pub fn matches(&self, request: &Request) -> bool {
        Self::of(request) == *self
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which categories occur in a request list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presence {
    pub unreviewed: bool,
    pub reviewed: bool,
}

impl Presence {
    fn contains(&self, kind: RequestKind) -> bool {
        match kind {
            RequestKind::AvailableForReview => self.unreviewed,
            RequestKind::Reviewed => self.reviewed,
        }
    }
}

/// The categories present in a request list, in selector order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    presence: Presence,
    kinds: Vec<RequestKind>,
}

/// Classify a request list
pub fn classify(requests: &[Request]) -> Classification {
    let presence = requests
        .iter()
        .fold(Presence::default(), |mut presence, request| {
            match RequestKind::of(request) {
                RequestKind::AvailableForReview => presence.unreviewed = true,
                RequestKind::Reviewed => presence.reviewed = true,
            }
            presence
        });

    let kinds = RequestKind::CANONICAL
        .into_iter()
        .filter(|kind| presence.contains(*kind))
        .collect();

    Classification { presence, kinds }
}

impl Classification {
    pub fn presence(&self) -> Presence {
        self.presence
    }

    /// Categories offered by the selector
    pub fn kinds(&self) -> &[RequestKind] {
        &self.kinds
    }

    /// Selector labels, e.g. `["Available for review", "Reviewed"]`
    pub fn labels(&self) -> Vec<&'static str> {
        self.kinds.iter().map(RequestKind::label).collect()
    }

    /// Category at a selector slot
    pub fn kind_at(&self, index: usize) -> Option<RequestKind> {
        self.kinds.get(index).copied()
    }

    /// Selector slot of a category, if it is offered
    pub fn index_of(&self, kind: RequestKind) -> Option<usize> {
        self.kinds.iter().position(|k| *k == kind)
    }

    /// Whether the selector has only one choice
    pub fn is_single(&self) -> bool {
        self.kinds.len() == 1
    }

    /// Selector slot to open on when a specific request is linked to
    ///
    /// A reviewed request lands on the "Reviewed" tab wherever it sits; anything
    /// else lands on the first tab.
    pub fn default_type_index(&self, start: &Request) -> usize {
        match RequestKind::of(start) {
            RequestKind::Reviewed => self.index_of(RequestKind::Reviewed).unwrap_or(0),
            RequestKind::AvailableForReview => 0,
        }
    }
}
