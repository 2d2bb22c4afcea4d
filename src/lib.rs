// Module declarations
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod runner;
pub mod scenario;

// Re-export commonly used items
pub use client::ServiceClient;
pub use config::{get_base_url, load_config, save_config, Config};
pub use error::{LoadError, LoadResult};
pub use metrics::{MetricsRegistry, Summary};
pub use models::*;
pub use runner::{RunOptions, Runner};
pub use scenario::{RampProfile, Stage, Threshold};
