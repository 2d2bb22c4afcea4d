use clap::ArgMatches;
use colored::*;

use crate::config::{load_config, save_config};
use crate::constants::DEFAULT_BASE_URL;

pub async fn handle_config(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        let mut config = load_config();
        config.base_url = Some(base_url.trim_end_matches('/').to_string());
        save_config(&config)?;
        println!("{} Base URL saved: {}", "✓".green(), base_url);
    } else if matches.get_flag("show") {
        let config = load_config();
        match config.base_url {
            Some(url) => println!("Base URL: {}", url),
            None => println!("No base URL configured (default: {})", DEFAULT_BASE_URL),
        }
    } else {
        println!("Usage: prload config --base-url <URL> or prload config --show");
    }
    Ok(())
}
