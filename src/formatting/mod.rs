pub mod summary;

pub use summary::{print_run_header, print_summary, print_threshold_results};
