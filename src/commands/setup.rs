use clap::ArgMatches;
use colored::*;

use crate::client::ServiceClient;
use crate::config::get_base_url;
use crate::constants::{CHECK_SETUP, DEFAULT_TEAM_SIZE};
use crate::load_error;
use crate::metrics::MetricsRegistry;
use crate::runner::run_setup;

/// Runs only the setup phase: creates the synthetic team and prints the
/// generated member IDs. Useful for seeding a service by hand.
pub async fn handle_setup(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let base_url = get_base_url(matches.get_one::<String>("base-url").map(|s| s.as_str()));

    let team_size = matches
        .get_one::<String>("team-size")
        .map(|s| s.parse::<usize>())
        .transpose()
        .map_err(|_| load_error!(InvalidInput, "team size must be an integer"))?
        .unwrap_or(DEFAULT_TEAM_SIZE);
    if team_size == 0 {
        return Err(load_error!(InvalidInput, "team size must be at least 1").into());
    }

    let metrics = MetricsRegistry::new();
    let client = ServiceClient::new(base_url.clone())?;

    let setup_data = run_setup(&client, &metrics, team_size).await;

    let created = metrics
        .summary()
        .checks
        .get(CHECK_SETUP)
        .map(|c| c.fails == 0)
        .unwrap_or(false);

    if created {
        println!(
            "{} Team created on {} with {} members",
            "✓".green(),
            base_url,
            setup_data.user_ids.len()
        );
    } else {
        println!(
            "{} Team creation on {} did not succeed; IDs below were generated locally",
            "✗".red(),
            base_url
        );
    }

    println!("Member IDs: {}", setup_data.user_ids.join(", "));

    Ok(())
}
