//! SLO clock
//!
//! Replays an issue timeline and sums the wall-clock time during which the
//! SLO clock was running. The clock is a small state machine:
//!
//! ```text
//!            pause(r), set was empty
//!   Running ───────────────────────────► Paused { reasons }
//!      ▲                                      │  pause(r) / unpause(r)
//!      │   unpause(r), set becomes empty      │  while set stays non-empty
//!      └──────────────────────────────────────┘
//! ```
//!
//! Entering `Paused` folds the current running interval into the total;
//! leaving it starts a new interval at the event's timestamp.

use crate::labels::NEEDS_REPORTER_FEEDBACK;
use crate::timeline::{EventKind, Issue, TimelineEvent};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Why the SLO clock is currently stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PauseReason {
    /// Pull request is a draft
    Draft,
    /// Waiting on the reporter (`Needs Reporter Feedback`)
    NeedFeedback,
    /// Issue or pull request is closed
    Closed,
}

impl fmt::Display for PauseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            PauseReason::Draft => "draft",
            PauseReason::NeedFeedback => "need-feedback",
            PauseReason::Closed => "closed",
        })
    }
}

/// Replay state for a single issue
///
/// The clock starts running at issue creation with no pause reasons.
#[derive(Debug, Clone)]
pub struct SloClock {
    /// Running time folded in so far
    time_used: TimeDelta,
    /// Active pause reasons; the clock runs iff this is empty
    paused_by: BTreeSet<PauseReason>,
    /// Start of the current running interval
    slo_start: DateTime<Utc>,
    /// Set once the first draft status change was seen
    draft_changed: bool,
}

impl SloClock {
    /// Start a running clock at `created_at`
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            time_used: TimeDelta::zero(),
            paused_by: BTreeSet::new(),
            slo_start: created_at,
            draft_changed: false,
        }
    }

    /// Whether the clock is currently running
    pub fn is_running(&self) -> bool {
        self.paused_by.is_empty()
    }

    /// Active pause reasons
    pub fn paused_by(&self) -> impl Iterator<Item = PauseReason> + '_ {
        self.paused_by.iter().copied()
    }

    /// Running time folded in so far, excluding the open interval
    pub fn time_used(&self) -> TimeDelta {
        self.time_used
    }

    /// Add a pause reason at `at`
    ///
    /// If the clock was running, the interval up to `at` is folded in first.
    pub fn pause(&mut self, reason: PauseReason, at: DateTime<Utc>) {
        if self.is_running() {
            if at < self.slo_start {
                log::warn!(
                    "timeline event at {} precedes running interval start {}",
                    at,
                    self.slo_start
                );
            }
            self.time_used = self.time_used + (at - self.slo_start);
            log::trace!("clock stopped at {} ({}), used {}", at, reason, self.time_used);
        }
        self.paused_by.insert(reason);
    }

    /// Remove a pause reason at `at`
    ///
    /// Removing an inactive reason is a no-op. Removing the last active one
    /// starts a new running interval at `at`.
    pub fn unpause(&mut self, reason: PauseReason, at: DateTime<Utc>) {
        if self.paused_by.remove(&reason) && self.is_running() {
            self.slo_start = at;
            log::trace!("clock resumed at {} ({} cleared)", at, reason);
        }
    }

    /// Apply one timeline event
    ///
    /// `issue_author` is the reporter's login; responses from anyone else
    /// clear a pending feedback wait.
    pub fn apply(&mut self, event: &TimelineEvent, issue_author: Option<&str>) {
        let at = event.created_at;
        match &event.kind {
            EventKind::ReadyForReview => {
                if !self.draft_changed {
                    // Created as a draft: nothing before this point counts.
                    self.draft_changed = true;
                    self.time_used = TimeDelta::zero();
                    self.paused_by.insert(PauseReason::Draft);
                    log::trace!("created as draft, discarding time before {}", at);
                }
                self.unpause(PauseReason::Draft, at);
            }
            EventKind::ConvertToDraft => {
                self.draft_changed = true;
                self.pause(PauseReason::Draft, at);
            }
            EventKind::Labeled { label } if label == NEEDS_REPORTER_FEEDBACK => {
                self.pause(PauseReason::NeedFeedback, at);
            }
            EventKind::Unlabeled { label } if label == NEEDS_REPORTER_FEEDBACK => {
                self.unpause(PauseReason::NeedFeedback, at);
            }
            EventKind::Closed => self.pause(PauseReason::Closed, at),
            EventKind::Reopened => self.unpause(PauseReason::Closed, at),
            kind => {
                if let Some(responder) = kind.response_author() {
                    if is_outside_response(responder, issue_author) {
                        self.unpause(PauseReason::NeedFeedback, at);
                    }
                }
            }
        }
    }

    /// Stop replaying and return the total running time up to `now`
    pub fn finish(self, now: DateTime<Utc>) -> TimeDelta {
        if self.is_running() {
            self.time_used + (now - self.slo_start)
        } else {
            self.time_used
        }
    }
}

/// A response counts as coming from outside unless both logins are known
/// and equal; an absent identity never matches anything.
fn is_outside_response(responder: Option<&str>, issue_author: Option<&str>) -> bool {
    match (responder, issue_author) {
        (Some(responder), Some(author)) => responder != author,
        _ => true,
    }
}

/// Running time of the SLO clock between issue creation and `now`, unrounded
///
/// Timeline events must be in chronological order and not precede
/// `issue.created_at`.
pub fn count_slo_time_exact(issue: &Issue, now: DateTime<Utc>) -> TimeDelta {
    let mut clock = SloClock::new(issue.created_at);
    let author = issue.author.as_deref();
    for event in &issue.timeline {
        clock.apply(event, author);
    }
    clock.finish(now)
}

/// Running time of the SLO clock between issue creation and `now`,
/// rounded up to whole days
pub fn count_slo_time(issue: &Issue, now: DateTime<Utc>) -> TimeDelta {
    round_up_to_days(count_slo_time_exact(issue, now))
}

/// Number of days, counting any partial day as a full one
pub fn whole_days(elapsed: TimeDelta) -> i64 {
    let days = elapsed.num_days();
    if elapsed > TimeDelta::days(days) {
        days + 1
    } else {
        days
    }
}

/// Round up to the next whole day boundary
pub fn round_up_to_days(elapsed: TimeDelta) -> TimeDelta {
    TimeDelta::days(whole_days(elapsed))
}
