use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

use crate::constants::{BASE_URL_ENV, CONFIG_FILE, DEFAULT_BASE_URL};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub base_url: Option<String>,
}

pub fn load_config() -> Config {
    let home_dir = match dirs::home_dir() {
        Some(dir) => dir,
        None => return Config::default(),
    };
    let config_path = home_dir.join(CONFIG_FILE);

    if config_path.exists() {
        let config_str = fs::read_to_string(&config_path).unwrap_or_default();
        serde_json::from_str(&config_str).unwrap_or_default()
    } else {
        Config::default()
    }
}

pub fn save_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let home_dir = dirs::home_dir().ok_or("Could not find home directory")?;
    let config_path = home_dir.join(CONFIG_FILE);

    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(config_path, config_str)?;

    Ok(())
}

/// Resolve the service base URL: CLI flag, then environment variable,
/// then config file, then the built-in default.
pub fn get_base_url(cli_override: Option<&str>) -> String {
    if let Some(url) = cli_override {
        return url.trim_end_matches('/').to_string();
    }

    if let Ok(url) = env::var(BASE_URL_ENV) {
        return url.trim_end_matches('/').to_string();
    }

    let config = load_config();
    if let Some(url) = config.base_url {
        return url.trim_end_matches('/').to_string();
    }

    DEFAULT_BASE_URL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override_wins_and_strips_trailing_slash() {
        let url = get_base_url(Some("http://10.0.0.1:9090/"));
        assert_eq!(url, "http://10.0.0.1:9090");
    }
}
