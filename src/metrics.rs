use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

/// One recorded HTTP exchange. A transport error is recorded as a
/// failed sample with the time spent until the error surfaced.
#[derive(Debug, Clone)]
pub struct Sample {
    pub endpoint: &'static str,
    pub status: Option<u16>,
    pub elapsed: Duration,
    pub failed: bool,
}

#[derive(Debug, Default)]
struct Inner {
    samples: Vec<Sample>,
    checks: BTreeMap<String, CheckCounts>,
    iterations: u64,
}

#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct CheckCounts {
    pub passes: u64,
    pub fails: u64,
}

/// Shared registry the VU pool records into. Cheap enough behind a
/// mutex at the request rates a single host generates.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    inner: Mutex<Inner>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, sample: Sample) {
        self.inner.lock().unwrap().samples.push(sample);
    }

    /// Records a named boolean assertion, k6-style: non-fatal, counted.
    pub fn check(&self, name: &str, passed: bool) {
        let mut inner = self.inner.lock().unwrap();
        let counts = inner.checks.entry(name.to_string()).or_default();
        if passed {
            counts.passes += 1;
        } else {
            counts.fails += 1;
        }
    }

    pub fn record_iteration(&self) {
        self.inner.lock().unwrap().iterations += 1;
    }

    pub fn summary(&self) -> Summary {
        let inner = self.inner.lock().unwrap();

        let total = inner.samples.len() as u64;
        let failed = inner.samples.iter().filter(|s| s.failed).count() as u64;

        let mut durations: Vec<Duration> = inner.samples.iter().map(|s| s.elapsed).collect();
        durations.sort_unstable();

        let (min_ms, mean_ms, p95_ms, max_ms) = if durations.is_empty() {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let sum: Duration = durations.iter().sum();
            (
                as_ms(durations[0]),
                as_ms(sum) / durations.len() as f64,
                as_ms(percentile(&durations, 0.95)),
                as_ms(*durations.last().unwrap()),
            )
        };

        let mut requests_by_endpoint: BTreeMap<String, u64> = BTreeMap::new();
        for sample in &inner.samples {
            *requests_by_endpoint
                .entry(sample.endpoint.to_string())
                .or_default() += 1;
        }

        Summary {
            requests: total,
            failed_requests: failed,
            failure_rate: if total == 0 {
                0.0
            } else {
                failed as f64 / total as f64
            },
            min_ms,
            mean_ms,
            p95_ms,
            max_ms,
            iterations: inner.iterations,
            requests_by_endpoint,
            checks: inner.checks.clone(),
        }
    }
}

fn as_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

/// Nearest-rank percentile over an already sorted slice.
fn percentile(sorted: &[Duration], q: f64) -> Duration {
    debug_assert!(!sorted.is_empty());
    let rank = (q * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

/// Aggregated run results, evaluated against thresholds and optionally
/// exported as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub requests: u64,
    pub failed_requests: u64,
    pub failure_rate: f64,
    pub min_ms: f64,
    pub mean_ms: f64,
    pub p95_ms: f64,
    pub max_ms: f64,
    pub iterations: u64,
    pub requests_by_endpoint: BTreeMap<String, u64>,
    pub checks: BTreeMap<String, CheckCounts>,
}
