//! Threshold evaluation
//!
//! Compares the elapsed SLO time of an issue against the deadline of its
//! tier.

use crate::clock::count_slo_time;
use crate::tier::{which_slo, SloTier};
use crate::timeline::Issue;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A threshold that cannot be used as a deadline
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("thresholds.{field} must be positive, got {days}")]
    NotPositive { field: &'static str, days: i64 },
    #[error("thresholds.{field} is out of range, got {days}")]
    OutOfRange { field: &'static str, days: i64 },
}

/// Per-tier deadlines, in days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SloThresholds {
    /// Days until an untriaged issue must receive a priority
    #[serde(default = "default_triage_days")]
    pub triage_days: i64,

    /// Days until an important issue must be resolved
    #[serde(default = "default_important_days")]
    pub important_days: i64,

    /// Days until an urgent issue must be resolved
    #[serde(default = "default_urgent_days")]
    pub urgent_days: i64,
}

fn default_triage_days() -> i64 {
    7
}

fn default_important_days() -> i64 {
    91
}

fn default_urgent_days() -> i64 {
    14
}

impl Default for SloThresholds {
    fn default() -> Self {
        Self {
            triage_days: default_triage_days(),
            important_days: default_important_days(),
            urgent_days: default_urgent_days(),
        }
    }
}

impl SloThresholds {
    /// Deadline for a tier, `None` if the tier is exempt
    ///
    /// Unvalidated values are clamped: non-positive counts give a zero
    /// deadline, counts beyond the `TimeDelta` range give `TimeDelta::MAX`.
    pub fn limit(&self, tier: SloTier) -> Option<TimeDelta> {
        let days = match tier {
            SloTier::None => return None,
            SloTier::Triage => self.triage_days,
            SloTier::Important => self.important_days,
            SloTier::Urgent => self.urgent_days,
        };
        Some(TimeDelta::try_days(days.max(0)).unwrap_or(TimeDelta::MAX))
    }

    /// Check every threshold is a positive, representable day count
    pub fn validate(&self) -> Result<(), ThresholdError> {
        for (field, days) in [
            ("triage_days", self.triage_days),
            ("important_days", self.important_days),
            ("urgent_days", self.urgent_days),
        ] {
            if days <= 0 {
                return Err(ThresholdError::NotPositive { field, days });
            }
            if TimeDelta::try_days(days).is_none() {
                return Err(ThresholdError::OutOfRange { field, days });
            }
        }
        Ok(())
    }
}

/// Outcome of comparing elapsed time against the tier deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SloStatus {
    /// Not subject to an SLO
    Exempt,
    /// Deadline not reached yet
    Within {
        #[serde(with = "days")]
        remaining: TimeDelta,
    },
    /// Deadline reached or passed
    Breached {
        #[serde(with = "days")]
        overdue: TimeDelta,
    },
}

impl SloStatus {
    pub fn is_breached(&self) -> bool {
        matches!(self, SloStatus::Breached { .. })
    }

    /// Short label for reports
    pub fn label(&self) -> &'static str {
        match self {
            SloStatus::Exempt => "exempt",
            SloStatus::Within { .. } => "ok",
            SloStatus::Breached { .. } => "breached",
        }
    }
}

/// Classification and elapsed time of one issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SloReport {
    pub tier: SloTier,
    /// Elapsed SLO time in whole days, zero for exempt issues
    #[serde(with = "days")]
    pub elapsed: TimeDelta,
    pub status: SloStatus,
}

/// Classify `issue`, measure its SLO time and compare it with `thresholds`
///
/// Exempt issues are not replayed at all.
pub fn evaluate(issue: &Issue, now: DateTime<Utc>, thresholds: &SloThresholds) -> SloReport {
    let tier = which_slo(issue.is_draft, &issue.labels);
    let Some(limit) = thresholds.limit(tier) else {
        return SloReport {
            tier,
            elapsed: TimeDelta::zero(),
            status: SloStatus::Exempt,
        };
    };

    let elapsed = count_slo_time(issue, now);
    let status = if elapsed >= limit {
        SloStatus::Breached {
            overdue: elapsed - limit,
        }
    } else {
        SloStatus::Within {
            remaining: limit - elapsed,
        }
    };

    SloReport {
        tier,
        elapsed,
        status,
    }
}

/// Serialize durations as a whole number of days
mod days {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_days())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let days = i64::deserialize(deserializer)?;
        TimeDelta::try_days(days).ok_or_else(|| serde::de::Error::custom("day count out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{PRIORITY_EVENTUALLY, PRIORITY_URGENT};
    use crate::timeline::EventKind;
    use chrono::TimeZone;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap() + TimeDelta::days(n)
    }

    #[test]
    fn test_default_thresholds() {
        let thresholds = SloThresholds::default();
        assert_eq!(thresholds.limit(SloTier::None), None);
        assert_eq!(thresholds.limit(SloTier::Triage), Some(TimeDelta::days(7)));
        assert_eq!(thresholds.limit(SloTier::Urgent), Some(TimeDelta::days(14)));
        assert_eq!(
            thresholds.limit(SloTier::Important),
            Some(TimeDelta::days(91))
        );
    }

    #[test]
    fn test_validate_thresholds() {
        assert_eq!(SloThresholds::default().validate(), Ok(()));

        let zero = SloThresholds {
            urgent_days: 0,
            ..SloThresholds::default()
        };
        assert_eq!(
            zero.validate(),
            Err(ThresholdError::NotPositive {
                field: "urgent_days",
                days: 0
            })
        );

        let huge = SloThresholds {
            important_days: 200_000_000_000,
            ..SloThresholds::default()
        };
        let err = huge.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "thresholds.important_days is out of range, got 200000000000"
        );
    }

    #[test]
    fn test_unvalidated_thresholds_do_not_panic() {
        let thresholds = SloThresholds {
            triage_days: 200_000_000_000,
            important_days: -5,
            urgent_days: i64::MAX,
        };
        assert_eq!(thresholds.limit(SloTier::Triage), Some(TimeDelta::MAX));
        assert_eq!(thresholds.limit(SloTier::Important), Some(TimeDelta::zero()));

        let report = evaluate(&Issue::new(day(0)), day(1), &thresholds);
        assert_eq!(report.tier, SloTier::Triage);
        assert!(!report.status.is_breached());

        let important = Issue::new(day(0)).with_labels([crate::labels::PRIORITY_IMPORTANT]);
        let report = evaluate(&important, day(1), &thresholds);
        assert_eq!(
            report.status,
            SloStatus::Breached {
                overdue: TimeDelta::days(1)
            }
        );
    }

    #[test]
    fn test_exempt_issue() {
        let issue = Issue::new(day(0)).with_labels([PRIORITY_EVENTUALLY]);
        let report = evaluate(&issue, day(400), &SloThresholds::default());
        assert_eq!(report.tier, SloTier::None);
        assert_eq!(report.elapsed, TimeDelta::zero());
        assert_eq!(report.status, SloStatus::Exempt);
    }

    #[test]
    fn test_within_deadline() {
        let issue = Issue::new(day(0));
        let report = evaluate(&issue, day(3), &SloThresholds::default());
        assert_eq!(report.tier, SloTier::Triage);
        assert_eq!(report.elapsed, TimeDelta::days(3));
        assert_eq!(
            report.status,
            SloStatus::Within {
                remaining: TimeDelta::days(4)
            }
        );
        assert!(!report.status.is_breached());
    }

    #[test]
    fn test_reaching_deadline_is_breach() {
        let issue = Issue::new(day(0));
        let report = evaluate(&issue, day(7), &SloThresholds::default());
        assert_eq!(
            report.status,
            SloStatus::Breached {
                overdue: TimeDelta::zero()
            }
        );
    }

    #[test]
    fn test_paused_time_does_not_count_towards_deadline() {
        let issue = Issue::new(day(0))
            .with_labels([PRIORITY_URGENT])
            .push_event(day(1), EventKind::Closed)
            .push_event(day(20), EventKind::Reopened);
        let report = evaluate(&issue, day(30), &SloThresholds::default());
        assert_eq!(report.tier, SloTier::Urgent);
        assert_eq!(report.elapsed, TimeDelta::days(11));
        assert_eq!(report.status.label(), "ok");
    }

    #[test]
    fn test_report_serialization() {
        let report = SloReport {
            tier: SloTier::Urgent,
            elapsed: TimeDelta::days(16),
            status: SloStatus::Breached {
                overdue: TimeDelta::days(2),
            },
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"tier":"urgent","elapsed":16,"status":{"state":"breached","overdue":2}}"#
        );

        let deserialized: SloReport = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, report);
    }
}
