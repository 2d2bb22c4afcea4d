use clap::ArgMatches;
use std::fs;
use std::sync::Arc;
use std::time::Duration;

use crate::client::ServiceClient;
use crate::config::get_base_url;
use crate::constants::{
    DEFAULT_MAX_FAILURE_RATE, DEFAULT_P95_MS, DEFAULT_STAGES, DEFAULT_TEAM_SIZE,
    DEFAULT_THINK_TIME_MS,
};
use crate::formatting::{print_run_header, print_summary, print_threshold_results};
use crate::load_error;
use crate::logging::log_info;
use crate::metrics::MetricsRegistry;
use crate::runner::{RunOptions, Runner};
use crate::scenario::{evaluate_all, RampProfile, Stage, Threshold};

pub async fn handle_run(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let base_url = get_base_url(matches.get_one::<String>("base-url").map(|s| s.as_str()));

    let profile = build_profile(matches)?;
    let thresholds = build_thresholds(matches)?;

    let think_time_ms = matches
        .get_one::<String>("think-time-ms")
        .map(|s| s.parse::<u64>())
        .transpose()
        .map_err(|_| load_error!(InvalidInput, "think time must be an integer (ms)"))?
        .unwrap_or(DEFAULT_THINK_TIME_MS);

    let team_size = matches
        .get_one::<String>("team-size")
        .map(|s| s.parse::<usize>())
        .transpose()
        .map_err(|_| load_error!(InvalidInput, "team size must be an integer"))?
        .unwrap_or(DEFAULT_TEAM_SIZE);
    if team_size == 0 {
        return Err(load_error!(InvalidInput, "team size must be at least 1").into());
    }

    print_run_header(&base_url, &profile, &thresholds);
    log_info(&format!("Run started against {}", base_url));

    let metrics = Arc::new(MetricsRegistry::new());
    let client = ServiceClient::new(base_url)?;
    let runner = Runner::new(
        client,
        metrics.clone(),
        RunOptions {
            profile,
            think_time: Duration::from_millis(think_time_ms),
            team_size,
        },
    );

    runner.run().await;

    let summary = metrics.summary();
    print_summary(&summary);

    if let Some(path) = matches.get_one::<String>("summary-json") {
        fs::write(path, serde_json::to_string_pretty(&summary)?)?;
        println!("\nSummary written to {}", path);
    }

    let results = evaluate_all(&thresholds, &summary);
    let passed = print_threshold_results(&results);

    let failed_names = results
        .iter()
        .filter(|r| !r.passed)
        .map(|r| r.name.clone())
        .collect::<Vec<_>>()
        .join("; ");
    log_info(&format!(
        "Run finished: {} requests, passed={}",
        summary.requests, passed
    ));

    if passed {
        Ok(())
    } else {
        Err(load_error!(ThresholdBreached, "{}", failed_names).into())
    }
}

fn build_profile(matches: &ArgMatches) -> Result<RampProfile, Box<dyn std::error::Error>> {
    let stages = match matches.get_many::<String>("stage") {
        Some(specs) => specs
            .map(|s| Stage::parse(s))
            .collect::<Result<Vec<_>, _>>()?,
        None => DEFAULT_STAGES
            .iter()
            .map(|&(secs, target)| Stage::new(Duration::from_secs(secs), target))
            .collect(),
    };

    Ok(RampProfile::new(stages)?)
}

fn build_thresholds(matches: &ArgMatches) -> Result<Vec<Threshold>, Box<dyn std::error::Error>> {
    let p95_ms = matches
        .get_one::<String>("p95-ms")
        .map(|s| s.parse::<u64>())
        .transpose()
        .map_err(|_| load_error!(InvalidInput, "p95 limit must be an integer (ms)"))?
        .unwrap_or(DEFAULT_P95_MS);

    let max_failure_rate = matches
        .get_one::<String>("max-failure-rate")
        .map(|s| s.parse::<f64>())
        .transpose()
        .map_err(|_| load_error!(InvalidInput, "failure rate must be a number"))?
        .unwrap_or(DEFAULT_MAX_FAILURE_RATE);
    if !(0.0..=1.0).contains(&max_failure_rate) {
        return Err(load_error!(InvalidInput, "failure rate must be between 0 and 1").into());
    }

    Ok(vec![
        Threshold::P95Below(Duration::from_millis(p95_ms)),
        Threshold::FailureRateBelow(max_failure_rate),
    ])
}
