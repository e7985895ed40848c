//! Input decoding
//!
//! Accepts the JSON a GraphQL query over issues and pull requests produces:
//! a single issue, an array of issues, or a whole repository with its
//! defined labels and `issues` / `pullRequests` connections.

use anyhow::{Context, Result};
use gh_slo::{Connection, IssueOrPr, Repository};
use serde::Deserialize;
use std::path::Path;

/// An issue record plus the identifying fields used in reports
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub number: Option<u64>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(flatten)]
    pub record: IssueOrPr,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryDump {
    #[serde(flatten)]
    repository: Repository,

    #[serde(default)]
    issues: Connection<Entry>,

    #[serde(default)]
    pull_requests: Connection<Entry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawInput {
    Repository { repository: RepositoryDump },
    Many(Vec<Entry>),
    One(Box<Entry>),
}

/// Decoded input
#[derive(Debug)]
pub struct Input {
    /// Repository record, only present for repository dumps
    pub repository: Option<Repository>,
    pub entries: Vec<Entry>,
}

impl Input {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawInput = serde_json::from_str(json)
            .context("Input is neither an issue, an issue array nor a repository object")?;

        Ok(match raw {
            RawInput::Repository { repository } => {
                let mut entries = repository.issues.nodes;
                entries.extend(repository.pull_requests.nodes);
                Input {
                    repository: Some(repository.repository),
                    entries,
                }
            }
            RawInput::Many(entries) => Input {
                repository: None,
                entries,
            },
            RawInput::One(entry) => Input {
                repository: None,
                entries: vec![*entry],
            },
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid input file {}", path.display()))
    }
}
