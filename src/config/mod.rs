pub mod config;

pub use config::{get_base_url, load_config, save_config, Config};
