use std::time::Duration;

use crate::error::LoadResult;
use crate::load_error;

/// One ramp window: over `duration`, the VU count moves linearly from
/// the previous stage's target to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub duration: Duration,
    pub target: usize,
}

impl Stage {
    pub fn new(duration: Duration, target: usize) -> Self {
        Self { duration, target }
    }

    /// Parses a `DURATION:TARGET` spec, e.g. `10s:50` or `500ms:10`.
    pub fn parse(spec: &str) -> LoadResult<Self> {
        let (duration_str, target_str) = spec
            .split_once(':')
            .ok_or_else(|| load_error!(InvalidInput, "stage '{}' must be DURATION:TARGET", spec))?;

        let duration = parse_duration(duration_str)?;
        let target = target_str
            .parse::<usize>()
            .map_err(|_| load_error!(ParseError, "invalid VU target: {}", target_str))?;

        Ok(Self { duration, target })
    }
}

fn parse_duration(s: &str) -> LoadResult<Duration> {
    let s = s.trim();

    let (value, unit) = if let Some(v) = s.strip_suffix("ms") {
        (v, 1u64)
    } else if let Some(v) = s.strip_suffix('s') {
        (v, 1_000)
    } else if let Some(v) = s.strip_suffix('m') {
        (v, 60_000)
    } else {
        return Err(load_error!(
            ParseError,
            "duration '{}' must end in ms, s or m",
            s
        ));
    };

    let value = value
        .parse::<u64>()
        .map_err(|_| load_error!(ParseError, "invalid duration: {}", s))?;

    Ok(Duration::from_millis(value * unit))
}

/// An ordered sequence of ramp stages starting from 0 VUs.
#[derive(Debug, Clone)]
pub struct RampProfile {
    stages: Vec<Stage>,
}

impl RampProfile {
    pub fn new(stages: Vec<Stage>) -> LoadResult<Self> {
        if stages.is_empty() {
            return Err(load_error!(InvalidInput, "at least one stage is required"));
        }
        Ok(Self { stages })
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    pub fn max_target(&self) -> usize {
        self.stages.iter().map(|s| s.target).max().unwrap_or(0)
    }

    /// Target VU count at `elapsed`, interpolating linearly inside each
    /// stage. Past the end of the profile the final target holds.
    pub fn target_at(&self, elapsed: Duration) -> usize {
        let mut from = 0usize;
        let mut offset = Duration::ZERO;

        for stage in &self.stages {
            let end = offset + stage.duration;
            if elapsed < end {
                let into = (elapsed - offset).as_secs_f64();
                let window = stage.duration.as_secs_f64();
                if window == 0.0 {
                    return stage.target;
                }
                let fraction = into / window;
                let delta = stage.target as f64 - from as f64;
                return (from as f64 + delta * fraction).round() as usize;
            }
            from = stage.target;
            offset = end;
        }

        from
    }
}
