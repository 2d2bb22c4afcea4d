pub mod config;
pub mod run;
pub mod setup;

pub use config::handle_config;
pub use run::handle_run;
pub use setup::handle_setup;
