use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gh-slo-report",
    about = "Classify GitHub issues into SLO tiers and measure elapsed SLO time",
    version
)]
pub struct Cli {
    /// GraphQL JSON: one issue, an array of issues, or a `repository` object
    pub input: PathBuf,

    /// Instant to measure up to (RFC 3339), defaults to the current time
    #[arg(long, env = "GH_SLO_NOW")]
    pub now: Option<DateTime<Utc>>,

    /// Config file, defaults to .gh-slo.toml lookup
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Include exempt issues in the output
    #[arg(long)]
    pub all: bool,

    /// Exit with status 1 if any issue breached its SLO
    #[arg(long)]
    pub fail_on_breach: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
