//! SLO priority tiers
//!
//! Maps the label set of an issue to the tier whose deadline applies.

use crate::labels::{
    NEEDS_REPORTER_FEEDBACK, PRIORITY_EVENTUALLY, PRIORITY_IMPORTANT, PRIORITY_URGENT,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SLO tier of an issue, ordered by urgency
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SloTier {
    /// Not tracked at all (draft, deferred or waiting on the reporter)
    #[default]
    None,
    /// Untriaged issue, must receive a priority label
    Triage,
    /// Labeled `Priority: Important`
    Important,
    /// Labeled `Priority: Urgent`
    Urgent,
}

impl SloTier {
    /// Whether the SLO clock applies to issues in this tier
    pub fn is_tracked(&self) -> bool {
        !matches!(self, SloTier::None)
    }

    /// Lowercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            SloTier::None => "none",
            SloTier::Triage => "triage",
            SloTier::Important => "important",
            SloTier::Urgent => "urgent",
        }
    }
}

impl fmt::Display for SloTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classify an issue into its SLO tier
///
/// First match wins:
/// 1. draft, `Priority: Eventually` or `Needs Reporter Feedback` → [`SloTier::None`]
/// 2. `Priority: Urgent` → [`SloTier::Urgent`]
/// 3. `Priority: Important` → [`SloTier::Important`]
/// 4. anything else → [`SloTier::Triage`]
pub fn which_slo<S: AsRef<str>>(is_draft: bool, labels: &[S]) -> SloTier {
    let has = |wanted: &str| labels.iter().any(|label| label.as_ref() == wanted);

    if is_draft || has(PRIORITY_EVENTUALLY) || has(NEEDS_REPORTER_FEEDBACK) {
        return SloTier::None;
    }
    if has(PRIORITY_URGENT) {
        return SloTier::Urgent;
    }
    if has(PRIORITY_IMPORTANT) {
        return SloTier::Important;
    }
    SloTier::Triage
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [&str; 4] = [
        PRIORITY_URGENT,
        PRIORITY_IMPORTANT,
        PRIORITY_EVENTUALLY,
        NEEDS_REPORTER_FEEDBACK,
    ];

    /// Every subset of the well-known labels, plus an inert one
    fn label_combinations() -> Vec<Vec<&'static str>> {
        (0..1u32 << ALL.len())
            .map(|mask| {
                let mut labels: Vec<&str> = ALL
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << *i) != 0)
                    .map(|(_, l)| *l)
                    .collect();
                labels.push("bug");
                labels
            })
            .collect()
    }

    #[test]
    fn test_empty_labels_is_triage() {
        let labels: Vec<String> = Vec::new();
        assert_eq!(which_slo(false, &labels), SloTier::Triage);
    }

    #[test]
    fn test_unrelated_labels_is_triage() {
        assert_eq!(which_slo(false, &["bug", "enhancement"]), SloTier::Triage);
    }

    #[test]
    fn test_urgent_and_important() {
        assert_eq!(which_slo(false, &[PRIORITY_URGENT]), SloTier::Urgent);
        assert_eq!(which_slo(false, &[PRIORITY_IMPORTANT]), SloTier::Important);
        assert_eq!(
            which_slo(false, &[PRIORITY_IMPORTANT, PRIORITY_URGENT]),
            SloTier::Urgent
        );
    }

    #[test]
    fn test_eventually_always_none() {
        for mut labels in label_combinations() {
            labels.push(PRIORITY_EVENTUALLY);
            assert_eq!(which_slo(false, &labels), SloTier::None, "{labels:?}");
            assert_eq!(which_slo(true, &labels), SloTier::None, "{labels:?}");
        }
    }

    #[test]
    fn test_draft_always_none() {
        for labels in label_combinations() {
            assert_eq!(which_slo(true, &labels), SloTier::None, "{labels:?}");
        }
    }

    #[test]
    fn test_precedence_holds_for_every_combination() {
        for labels in label_combinations() {
            let has = |wanted: &str| labels.iter().any(|l| *l == wanted);
            let expected = if has(PRIORITY_EVENTUALLY) || has(NEEDS_REPORTER_FEEDBACK) {
                SloTier::None
            } else if has(PRIORITY_URGENT) {
                SloTier::Urgent
            } else if has(PRIORITY_IMPORTANT) {
                SloTier::Important
            } else {
                SloTier::Triage
            };
            assert_eq!(which_slo(false, &labels), expected, "{labels:?}");
        }
    }

    #[test]
    fn test_tier_ordering() {
        assert!(SloTier::Urgent > SloTier::Important);
        assert!(SloTier::Important > SloTier::Triage);
        assert!(SloTier::Triage > SloTier::None);
        assert!(!SloTier::None.is_tracked());
        assert!(SloTier::Triage.is_tracked());
    }

    #[test]
    fn test_tier_serde() {
        let tiers = vec![
            (SloTier::None, "\"none\""),
            (SloTier::Triage, "\"triage\""),
            (SloTier::Important, "\"important\""),
            (SloTier::Urgent, "\"urgent\""),
        ];

        for (tier, expected_json) in tiers {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, expected_json);
            assert_eq!(format!("\"{tier}\""), expected_json);
        }
    }
}
