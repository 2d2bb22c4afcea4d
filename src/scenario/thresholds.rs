use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::metrics::Summary;

/// A pass/fail condition evaluated over the aggregated run metrics at
/// run end. A breach marks the whole run failed; it never stops the
/// run mid-flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// 95th-percentile request latency must stay below the limit.
    P95Below(Duration),
    /// Failed-request rate must stay below the limit (0.001 = 0.1%).
    FailureRateBelow(f64),
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::P95Below(limit) => {
                write!(f, "http_req_duration: p(95) < {}ms", limit.as_millis())
            }
            Threshold::FailureRateBelow(limit) => {
                write!(f, "http_req_failed: rate < {}", limit)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ThresholdResult {
    pub name: String,
    pub passed: bool,
    pub actual: String,
}

impl Threshold {
    pub fn evaluate(&self, summary: &Summary) -> ThresholdResult {
        match self {
            Threshold::P95Below(limit) => ThresholdResult {
                name: self.to_string(),
                passed: summary.p95_ms < limit.as_secs_f64() * 1_000.0,
                actual: format!("p(95)={:.2}ms", summary.p95_ms),
            },
            Threshold::FailureRateBelow(limit) => ThresholdResult {
                name: self.to_string(),
                passed: summary.failure_rate < *limit,
                actual: format!("rate={:.4}", summary.failure_rate),
            },
        }
    }
}

/// Evaluates every threshold; the run passes only if all do.
pub fn evaluate_all(thresholds: &[Threshold], summary: &Summary) -> Vec<ThresholdResult> {
    thresholds.iter().map(|t| t.evaluate(summary)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn summary(p95_ms: f64, failure_rate: f64) -> Summary {
        Summary {
            requests: 1000,
            failed_requests: (failure_rate * 1000.0) as u64,
            failure_rate,
            min_ms: 1.0,
            mean_ms: p95_ms / 2.0,
            p95_ms,
            max_ms: p95_ms * 2.0,
            iterations: 1000,
            requests_by_endpoint: BTreeMap::new(),
            checks: BTreeMap::new(),
        }
    }

    #[test]
    fn test_p95_threshold() {
        let threshold = Threshold::P95Below(Duration::from_millis(300));

        assert!(threshold.evaluate(&summary(299.9, 0.0)).passed);
        assert!(!threshold.evaluate(&summary(300.0, 0.0)).passed);
        assert!(!threshold.evaluate(&summary(450.0, 0.0)).passed);
    }

    #[test]
    fn test_failure_rate_threshold() {
        let threshold = Threshold::FailureRateBelow(0.001);

        assert!(threshold.evaluate(&summary(10.0, 0.0)).passed);
        assert!(threshold.evaluate(&summary(10.0, 0.0009)).passed);
        assert!(!threshold.evaluate(&summary(10.0, 0.001)).passed);
        assert!(!threshold.evaluate(&summary(10.0, 0.05)).passed);
    }

    #[test]
    fn test_evaluate_all_reports_each() {
        let thresholds = [
            Threshold::P95Below(Duration::from_millis(300)),
            Threshold::FailureRateBelow(0.001),
        ];

        let results = evaluate_all(&thresholds, &summary(500.0, 0.0));
        assert_eq!(results.len(), 2);
        assert!(!results[0].passed);
        assert!(results[1].passed);
    }
}
