//! GitHub GraphQL records
//!
//! These types mirror the shape of the GraphQL responses the caller fetches
//! (`labels.nodes`, `timelineItems.nodes`, `__typename`, ...). They are kept
//! separate from the [`Issue`] model so the SLO computations never see
//! partially-populated records; the `TryFrom<IssueOrPr>` impl does the
//! normalization.

use crate::labels::has_labels;
use crate::timeline::{EventKind, Issue, TimelineEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure while normalizing a GraphQL record
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("{typename} timeline item #{index} has no createdAt")]
    MissingTimestamp { typename: &'static str, index: usize },
}

/// GraphQL connection wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection<T> {
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// A label reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelNode {
    pub name: String,
}

/// A GitHub user, bot or organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub login: String,
}

/// An issue or pull request as returned by the GraphQL API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueOrPr {
    pub created_at: DateTime<Utc>,

    /// Null for deleted accounts
    #[serde(default)]
    pub author: Option<Actor>,

    /// Only pull requests carry this field
    #[serde(default)]
    pub is_draft: bool,

    #[serde(default)]
    pub labels: Connection<LabelNode>,

    #[serde(default)]
    pub timeline_items: Connection<TimelineItem>,
}

/// One timeline node, discriminated by `__typename`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename", rename_all_fields = "camelCase")]
pub enum TimelineItem {
    ReadyForReviewEvent {
        created_at: Option<DateTime<Utc>>,
    },
    ConvertToDraftEvent {
        created_at: Option<DateTime<Utc>>,
    },
    LabeledEvent {
        created_at: Option<DateTime<Utc>>,
        label: LabelNode,
    },
    UnlabeledEvent {
        created_at: Option<DateTime<Utc>>,
        label: LabelNode,
    },
    ClosedEvent {
        created_at: Option<DateTime<Utc>>,
    },
    ReopenedEvent {
        created_at: Option<DateTime<Utc>>,
    },
    IssueComment {
        created_at: Option<DateTime<Utc>>,
        #[serde(default)]
        author: Option<Actor>,
    },
    PullRequestReview {
        created_at: Option<DateTime<Utc>>,
        #[serde(default)]
        author: Option<Actor>,
    },
    PullRequestReviewThread {
        created_at: Option<DateTime<Utc>>,
        #[serde(default)]
        author: Option<Actor>,
    },
    /// Any typename the SLO clock does not react to, dropped on
    /// normalization
    #[serde(other)]
    Other,
}

impl TimelineItem {
    /// GraphQL typename of this node, `"Other"` for inert typenames
    pub fn typename(&self) -> &'static str {
        match self {
            TimelineItem::ReadyForReviewEvent { .. } => "ReadyForReviewEvent",
            TimelineItem::ConvertToDraftEvent { .. } => "ConvertToDraftEvent",
            TimelineItem::LabeledEvent { .. } => "LabeledEvent",
            TimelineItem::UnlabeledEvent { .. } => "UnlabeledEvent",
            TimelineItem::ClosedEvent { .. } => "ClosedEvent",
            TimelineItem::ReopenedEvent { .. } => "ReopenedEvent",
            TimelineItem::IssueComment { .. } => "IssueComment",
            TimelineItem::PullRequestReview { .. } => "PullRequestReview",
            TimelineItem::PullRequestReviewThread { .. } => "PullRequestReviewThread",
            TimelineItem::Other => "Other",
        }
    }

    /// Convert into a timeline event
    ///
    /// Returns `Ok(None)` for inert typenames.
    fn into_event(self, index: usize) -> Result<Option<TimelineEvent>, RecordError> {
        let typename = self.typename();
        let login = |author: Option<Actor>| author.map(|actor| actor.login);

        let (created_at, kind) = match self {
            TimelineItem::ReadyForReviewEvent { created_at } => {
                (created_at, EventKind::ReadyForReview)
            }
            TimelineItem::ConvertToDraftEvent { created_at } => {
                (created_at, EventKind::ConvertToDraft)
            }
            TimelineItem::LabeledEvent { created_at, label } => {
                (created_at, EventKind::Labeled { label: label.name })
            }
            TimelineItem::UnlabeledEvent { created_at, label } => {
                (created_at, EventKind::Unlabeled { label: label.name })
            }
            TimelineItem::ClosedEvent { created_at } => (created_at, EventKind::Closed),
            TimelineItem::ReopenedEvent { created_at } => (created_at, EventKind::Reopened),
            TimelineItem::IssueComment { created_at, author } => (
                created_at,
                EventKind::Comment {
                    author: login(author),
                },
            ),
            TimelineItem::PullRequestReview { created_at, author } => (
                created_at,
                EventKind::Review {
                    author: login(author),
                },
            ),
            TimelineItem::PullRequestReviewThread { created_at, author } => (
                created_at,
                EventKind::ReviewThread {
                    author: login(author),
                },
            ),
            TimelineItem::Other => return Ok(None),
        };

        let created_at = created_at.ok_or(RecordError::MissingTimestamp { typename, index })?;
        Ok(Some(TimelineEvent::new(created_at, kind)))
    }
}

impl IssueOrPr {
    /// Names of the labels currently on the issue
    pub fn label_names(&self) -> Vec<String> {
        self.labels.nodes.iter().map(|l| l.name.clone()).collect()
    }
}

impl TryFrom<IssueOrPr> for Issue {
    type Error = RecordError;

    fn try_from(record: IssueOrPr) -> Result<Self, Self::Error> {
        let labels = record.label_names();
        let mut timeline = Vec::with_capacity(record.timeline_items.nodes.len());
        for (index, item) in record.timeline_items.nodes.into_iter().enumerate() {
            if let Some(event) = item.into_event(index)? {
                timeline.push(event);
            }
        }

        Ok(Issue {
            created_at: record.created_at,
            author: record.author.map(|actor| actor.login),
            is_draft: record.is_draft,
            labels,
            timeline,
        })
    }
}

/// A repository record, only its defined labels matter here
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub labels: Connection<LabelNode>,
}

impl Repository {
    /// Whether the repository defines all priority labels
    pub fn has_slo_labels(&self) -> bool {
        let names: Vec<&str> = self.labels.nodes.iter().map(|l| l.name.as_str()).collect();
        has_labels(&names)
    }
}
