use anyhow::Result;
use clap::Parser;
use gh_slo::missing_labels;
use gh_slo_config::AppConfig;
use std::process::ExitCode;

mod cli;
mod input;
mod logger;
mod report;

use cli::Cli;
use input::Input;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    log::debug!("Starting gh-slo-report");

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    log::debug!("Thresholds: {:?}", config.thresholds);

    let input = Input::from_path(&cli.input)?;

    if let Some(repository) = &input.repository {
        let names: Vec<&str> = repository
            .labels
            .nodes
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        let missing = missing_labels(&names);
        if !missing.is_empty() {
            log::warn!("Repository is missing priority labels: {}", missing.join(", "));
            if config.skip_unlabeled_repositories {
                log::info!("SLO tracking not configured, nothing to report");
                return Ok(ExitCode::SUCCESS);
            }
        }
    }

    let now = cli.now.unwrap_or_else(chrono::Utc::now);
    log::debug!("Measuring {} entries up to {}", input.entries.len(), now);

    let mut rows = report::build(input, now, &config.thresholds);
    if !cli.all {
        rows.retain(|row| row.report.tier.is_tracked());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", report::render_table(&rows));
    }

    let breached = rows.iter().filter(|row| row.report.status.is_breached()).count();
    if breached > 0 {
        log::info!("{} of {} issues breached their SLO", breached, rows.len());
        if cli.fail_on_breach {
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}
