//! Issue and timeline model
//!
//! Already-normalized records the SLO computations run over. Timeline events
//! must be in chronological order; the replay relies on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry of an issue timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// When the event happened
    pub created_at: DateTime<Utc>,
    /// What happened
    pub kind: EventKind,
}

impl TimelineEvent {
    pub fn new(created_at: DateTime<Utc>, kind: EventKind) -> Self {
        Self { created_at, kind }
    }
}

/// Kind of timeline event, carrying only the payload the SLO clock needs
///
/// Event kinds the clock never reacts to have no variant; they are dropped
/// when GitHub records are normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Pull request left draft state
    ReadyForReview,
    /// Pull request went back to draft state
    ConvertToDraft,
    /// A label was added
    Labeled { label: String },
    /// A label was removed
    Unlabeled { label: String },
    /// Issue or pull request was closed
    Closed,
    /// Issue or pull request was reopened
    Reopened,
    /// Plain comment
    Comment { author: Option<String> },
    /// Pull request review
    Review { author: Option<String> },
    /// Pull request review thread
    ReviewThread { author: Option<String> },
}

impl EventKind {
    /// Author of a response event (comment, review, review thread)
    ///
    /// Returns `None` for events that are not responses; the inner option is
    /// the (possibly absent) author identity.
    pub fn response_author(&self) -> Option<Option<&str>> {
        match self {
            EventKind::Comment { author }
            | EventKind::Review { author }
            | EventKind::ReviewThread { author } => Some(author.as_deref()),
            _ => None,
        }
    }
}

/// An issue or pull request as seen by the SLO computations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// When the issue was opened
    pub created_at: DateTime<Utc>,
    /// Login of the reporter, absent for deleted accounts
    pub author: Option<String>,
    /// Whether the pull request is currently a draft (always false for issues)
    pub is_draft: bool,
    /// Names of the labels currently on the issue
    pub labels: Vec<String>,
    /// Timeline in chronological order
    pub timeline: Vec<TimelineEvent>,
}

impl Issue {
    /// Create an issue without author, labels or events
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            author: None,
            is_draft: false,
            labels: Vec::new(),
            timeline: Vec::new(),
        }
    }

    /// Set the author login
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the current labels
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Mark as draft
    pub fn draft(mut self, is_draft: bool) -> Self {
        self.is_draft = is_draft;
        self
    }

    /// Append a timeline event
    pub fn push_event(mut self, created_at: DateTime<Utc>, kind: EventKind) -> Self {
        self.timeline.push(TimelineEvent::new(created_at, kind));
        self
    }
}
