//! SLO accounting for GitHub issues and pull requests
//!
//! This crate decides whether an issue is subject to a service-level
//! objective, which priority tier applies, and how much wall-clock time the
//! SLO clock has been running since the issue was opened.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   labels, draft    ┌──────────────┐
//! │  IssueOrPr   │ ─────────────────► │  which_slo() │ ──► SloTier
//! │ (GraphQL)    │                    └──────────────┘
//! └──────────────┘
//!        │ TryFrom                    ┌──────────────┐
//!        ▼                            │   SloClock   │
//! ┌──────────────┐   timeline, now    │ (Running /   │
//! │    Issue     │ ─────────────────► │  Paused{..}) │ ──► elapsed TimeDelta
//! └──────────────┘                    └──────────────┘
//!                                            │
//!                                            ▼
//!                                 evaluate() vs SloThresholds ──► SloStatus
//! ```
//!
//! Everything here is a pure function of its inputs. Fetching issues and
//! rendering reports is left to the caller.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use gh_slo::{count_slo_time, which_slo, EventKind, Issue, SloTier, NEEDS_REPORTER_FEEDBACK};
//!
//! let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let issue = Issue::new(created)
//!     .with_author("reporter")
//!     .push_event(
//!         Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
//!         EventKind::Labeled { label: NEEDS_REPORTER_FEEDBACK.to_string() },
//!     );
//!
//! assert_eq!(which_slo(issue.is_draft, &issue.labels), SloTier::Triage);
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
//! assert_eq!(count_slo_time(&issue, now).num_days(), 1);
//! ```

pub mod clock;
pub mod github;
pub mod labels;
pub mod status;
pub mod tier;
pub mod timeline;

pub use clock::{
    count_slo_time, count_slo_time_exact, round_up_to_days, whole_days, PauseReason, SloClock,
};
pub use github::{Actor, Connection, IssueOrPr, LabelNode, RecordError, Repository, TimelineItem};
pub use labels::{
    has_labels, missing_labels, NEEDS_REPORTER_FEEDBACK, PRIORITY_EVENTUALLY, PRIORITY_IMPORTANT,
    PRIORITY_LABELS, PRIORITY_URGENT,
};
pub use status::{evaluate, SloReport, SloStatus, SloThresholds, ThresholdError};
pub use tier::{which_slo, SloTier};
pub use timeline::{EventKind, Issue, TimelineEvent};
