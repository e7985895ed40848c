//! Report building and rendering

use crate::input::{Entry, Input};
use chrono::{DateTime, Utc};
use gh_slo::{evaluate, whole_days, Issue, SloReport, SloStatus, SloThresholds};
use serde::Serialize;
use std::fmt::Write;

/// One reported issue
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub report: SloReport,
}

/// Evaluate every entry
///
/// Entries that cannot be normalized are logged and skipped.
pub fn build(input: Input, now: DateTime<Utc>, thresholds: &SloThresholds) -> Vec<Row> {
    input
        .entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let Entry {
                number,
                title,
                record,
            } = entry;
            match Issue::try_from(record) {
                Ok(issue) => Some(Row {
                    number,
                    title,
                    report: evaluate(&issue, now, thresholds),
                }),
                Err(e) => {
                    let id = number.map_or_else(|| format!("entry {}", index), |n| format!("#{}", n));
                    log::warn!("Skipping {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

/// Render rows as an aligned text table
pub fn render_table(rows: &[Row]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<10} {:>8} {:<24} TITLE",
        "NUMBER", "TIER", "DAYS", "STATUS"
    );

    for row in rows {
        let number = row
            .number
            .map_or_else(|| "-".to_string(), |n| format!("#{}", n));
        let label = row.report.status.label();
        let status = match row.report.status {
            SloStatus::Exempt => label.to_string(),
            SloStatus::Within { remaining } => {
                format!("{} ({}d left)", label, whole_days(remaining))
            }
            SloStatus::Breached { overdue } => {
                format!("{} ({}d over)", label, whole_days(overdue))
            }
        };
        let _ = writeln!(
            out,
            "{:<8} {:<10} {:>8} {:<24} {}",
            number,
            row.report.tier,
            whole_days(row.report.elapsed),
            status,
            row.title.as_deref().unwrap_or("")
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn input() -> Input {
        Input::from_json(
            r#"[
                {
                    "number": 1,
                    "title": "Untriaged",
                    "createdAt": "2024-01-01T00:00:00Z",
                    "labels": { "nodes": [] },
                    "timelineItems": { "nodes": [] }
                },
                {
                    "number": 2,
                    "title": "Deferred",
                    "createdAt": "2024-01-01T00:00:00Z",
                    "labels": { "nodes": [ { "name": "Priority: Eventually" } ] }
                },
                {
                    "number": 3,
                    "createdAt": "2024-01-01T00:00:00Z",
                    "timelineItems": { "nodes": [ { "__typename": "ReopenedEvent" } ] }
                }
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_build_skips_broken_records() {
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        let rows = build(input(), now, &SloThresholds::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, Some(1));
        assert!(rows[0].report.status.is_breached());
        assert_eq!(rows[1].report.status, SloStatus::Exempt);
    }

    #[test]
    fn test_render_table() {
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        let rows = build(input(), now, &SloThresholds::default());
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NUMBER"));
        assert!(lines[1].contains("triage"));
        assert!(lines[1].contains("breached (3d over)"));
        assert!(lines[1].ends_with("Untriaged"));
        assert!(lines[2].contains("exempt"));
    }

    #[test]
    fn test_render_table_within_deadline() {
        let now = Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap();
        let rows = build(input(), now, &SloThresholds::default());
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[1].contains("ok (4d left)"));
    }

    #[test]
    fn test_row_serialization() {
        let now = Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap();
        let rows = build(input(), now, &SloThresholds::default());
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["number"], 1);
        assert_eq!(json["tier"], "triage");
        assert_eq!(json["elapsed"], 3);
        assert_eq!(json["status"]["state"], "within");
        assert_eq!(json["status"]["remaining"], 4);
    }
}
