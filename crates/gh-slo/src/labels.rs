//! Well-known label names
//!
//! Only these names carry meaning for SLO tracking. Any other label on an
//! issue is ignored.

/// Issue must be handled with the shortest turnaround
pub const PRIORITY_URGENT: &str = "Priority: Urgent";

/// Issue matters but is not an emergency
pub const PRIORITY_IMPORTANT: &str = "Priority: Important";

/// Issue is accepted but has no deadline, exempt from SLO tracking
pub const PRIORITY_EVENTUALLY: &str = "Priority: Eventually";

/// Maintainers are waiting on the reporter; the SLO clock is paused
pub const NEEDS_REPORTER_FEEDBACK: &str = "Needs Reporter Feedback";

/// The priority labels a repository must define before SLOs apply to it
pub const PRIORITY_LABELS: [&str; 3] = [PRIORITY_URGENT, PRIORITY_IMPORTANT, PRIORITY_EVENTUALLY];

/// Check whether a repository defines every priority label
///
/// Repositories without them have not opted into SLO tracking, so callers
/// should skip them entirely.
pub fn has_labels<S: AsRef<str>>(repo_labels: &[S]) -> bool {
    missing_labels(repo_labels).is_empty()
}

/// Priority labels the repository does not define yet
pub fn missing_labels<S: AsRef<str>>(repo_labels: &[S]) -> Vec<&'static str> {
    PRIORITY_LABELS
        .into_iter()
        .filter(|wanted| !repo_labels.iter().any(|label| label.as_ref() == *wanted))
        .collect()
}
