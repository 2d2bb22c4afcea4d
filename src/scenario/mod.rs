pub mod stages;
pub mod thresholds;

pub use stages::{RampProfile, Stage};
pub use thresholds::{evaluate_all, Threshold, ThresholdResult};
