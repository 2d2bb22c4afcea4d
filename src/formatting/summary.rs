use colored::*;

use crate::metrics::Summary;
use crate::scenario::{RampProfile, Threshold, ThresholdResult};

pub fn print_run_header(base_url: &str, profile: &RampProfile, thresholds: &[Threshold]) {
    println!("{}", "prload — pull-request service load test".bold());
    println!("{}", "-".repeat(60));
    println!("{}: {}", "Target".bold(), base_url.bright_blue());

    let stages = profile
        .stages()
        .iter()
        .map(|s| format!("{:?}→{}", s.duration, s.target))
        .collect::<Vec<_>>()
        .join(", ");
    println!("{}: {}", "Stages".bold(), stages);

    for threshold in thresholds {
        println!("{}: {}", "Threshold".bold(), threshold);
    }
    println!("{}", "-".repeat(60));
}

pub fn print_summary(summary: &Summary) {
    println!("\n{}", "Run summary".bold());
    println!("{}", "-".repeat(60));
    println!("{:<24} {}", "Requests".bold(), summary.requests);
    println!(
        "{:<24} {} ({:.2}%)",
        "Failed requests".bold(),
        summary.failed_requests,
        summary.failure_rate * 100.0
    );
    println!("{:<24} {}", "Iterations".bold(), summary.iterations);
    println!(
        "{:<24} min={:.2}ms mean={:.2}ms p95={:.2}ms max={:.2}ms",
        "Latency".bold(),
        summary.min_ms,
        summary.mean_ms,
        summary.p95_ms,
        summary.max_ms
    );

    for (endpoint, count) in &summary.requests_by_endpoint {
        println!("  {:<22} {}", endpoint, count);
    }

    if !summary.checks.is_empty() {
        println!("\n{}", "Checks".bold());
        for (name, counts) in &summary.checks {
            let marker = if counts.fails == 0 {
                "✓".green()
            } else {
                "✗".red()
            };
            println!(
                "  {} {:<40} {} passed, {} failed",
                marker, name, counts.passes, counts.fails
            );
        }
    }
}

/// Prints the verdict lines and returns whether every threshold held.
pub fn print_threshold_results(results: &[ThresholdResult]) -> bool {
    println!("\n{}", "Thresholds".bold());

    let mut all_passed = true;
    for result in results {
        if result.passed {
            println!("  {} {} ({})", "✓".green(), result.name, result.actual);
        } else {
            println!(
                "  {} {} ({})",
                "✗".red().bold(),
                result.name.red(),
                result.actual
            );
            all_passed = false;
        }
    }

    if all_passed {
        println!("\n{}", "Run passed.".green().bold());
    } else {
        println!("\n{}", "Run failed: thresholds breached.".red().bold());
    }

    all_passed
}
