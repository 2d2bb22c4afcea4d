use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::ServiceClient;
use crate::constants::{
    CHECK_PR_CREATED, CHECK_SETUP, CONTROLLER_TICK_MS, PR_CREATE_PATH, TEAM_ADD_PATH,
};
use crate::logging::{log_error, log_info};
use crate::metrics::{MetricsRegistry, Sample};
use crate::models::{PullRequestCreateRequest, SetupData, TeamCreateRequest};
use crate::scenario::RampProfile;

pub struct RunOptions {
    pub profile: RampProfile,
    pub think_time: Duration,
    pub team_size: usize,
}

/// Drives the run lifecycle: setup once, ramp the VU pool along the
/// profile, drain, leave the aggregated metrics in the registry.
pub struct Runner {
    client: Arc<ServiceClient>,
    metrics: Arc<MetricsRegistry>,
    options: RunOptions,
}

impl Runner {
    pub fn new(client: ServiceClient, metrics: Arc<MetricsRegistry>, options: RunOptions) -> Self {
        Self {
            client: Arc::new(client),
            metrics,
            options,
        }
    }

    pub async fn run(&self) {
        let setup_data = self.setup().await;
        self.ramp(setup_data).await;
    }

    pub async fn setup(&self) -> Arc<SetupData> {
        run_setup(&self.client, &self.metrics, self.options.team_size).await
    }

    /// Runs the VU pool along the ramp profile. A controller tick
    /// republishes the interpolated target; VU `i` iterates while the
    /// target exceeds `i` and parks otherwise. After the profile ends
    /// the target drops to zero and every VU drains out.
    async fn ramp(&self, setup_data: Arc<SetupData>) {
        let (target_tx, target_rx) = watch::channel(0usize);
        let started = Instant::now();
        let total = self.options.profile.total_duration();

        let mut handles: Vec<JoinHandle<()>> = Vec::new();
        let mut spawned = 0usize;

        log_info(&format!(
            "Starting ramp: {} stages, {:?} total, {} VUs peak",
            self.options.profile.stages().len(),
            total,
            self.options.profile.max_target()
        ));

        let mut ticker = tokio::time::interval(Duration::from_millis(CONTROLLER_TICK_MS));
        loop {
            ticker.tick().await;
            let elapsed = started.elapsed();
            if elapsed >= total {
                break;
            }

            let target = self.options.profile.target_at(elapsed);

            // VUs are numbered from 1 and keep their index for the whole
            // run, so (vu, iteration) pairs never repeat.
            while spawned < target {
                spawned += 1;
                handles.push(self.spawn_vu(spawned, setup_data.clone(), target_rx.clone()));
            }

            let _ = target_tx.send(target);
        }

        let _ = target_tx.send(0);
        drop(target_tx);

        for handle in handles {
            let _ = handle.await;
        }

        log_info(&format!(
            "Ramp finished after {:?}; {} VUs were spawned",
            started.elapsed(),
            spawned
        ));
    }

    fn spawn_vu(
        &self,
        vu: usize,
        setup_data: Arc<SetupData>,
        mut target_rx: watch::Receiver<usize>,
    ) -> JoinHandle<()> {
        let client = self.client.clone();
        let metrics = self.metrics.clone();
        let think_time = self.options.think_time;

        tokio::spawn(async move {
            let mut iteration = 0u64;
            loop {
                // Park while the published target is below this VU's
                // index; exit once the controller hangs up. The borrow
                // guard must not be held across the await.
                let target = *target_rx.borrow();
                if target < vu {
                    if target_rx.changed().await.is_err() {
                        return;
                    }
                    continue;
                }

                run_iteration(vu, iteration, &client, &metrics, &setup_data).await;
                iteration += 1;

                tokio::time::sleep(think_time).await;
            }
        })
    }
}

/// Creates the synthetic team. Runs exactly once, before any VU starts.
/// A failed call is recorded as a failed check and sample but never
/// aborts the run: the member IDs were generated locally and the
/// iteration phase proceeds with them.
pub async fn run_setup(
    client: &ServiceClient,
    metrics: &MetricsRegistry,
    team_size: usize,
) -> Arc<SetupData> {
    let team = TeamCreateRequest::generate(team_size);
    let user_ids = team.user_ids();

    log_info(&format!(
        "Setting up team {} with {} members",
        team.team_name,
        team.members.len()
    ));

    let started = Instant::now();
    match client.create_team(&team).await {
        Ok(outcome) => {
            let created = outcome.status.as_u16() == 200 || outcome.status.as_u16() == 201;
            metrics.record(Sample {
                endpoint: TEAM_ADD_PATH,
                status: Some(outcome.status.as_u16()),
                elapsed: outcome.elapsed,
                failed: !created,
            });
            metrics.check(CHECK_SETUP, created);
            if !created {
                log_error(&format!(
                    "Team creation returned {}; continuing with generated member IDs",
                    outcome.status
                ));
            }
        }
        Err(e) => {
            metrics.record(Sample {
                endpoint: TEAM_ADD_PATH,
                status: None,
                elapsed: started.elapsed(),
                failed: true,
            });
            metrics.check(CHECK_SETUP, false);
            log_error(&format!(
                "Team creation failed: {}; continuing with generated member IDs",
                e
            ));
        }
    }

    Arc::new(SetupData { user_ids })
}

/// One VU loop pass: unique PR payload, random author from the setup
/// output, POST, check, record.
async fn run_iteration(
    vu: usize,
    iteration: u64,
    client: &ServiceClient,
    metrics: &MetricsRegistry,
    setup_data: &SetupData,
) {
    let author_id = {
        let mut rng = rand::thread_rng();
        let idx = rng.gen_range(0..setup_data.user_ids.len());
        setup_data.user_ids[idx].as_str()
    };

    let pr = PullRequestCreateRequest::generate(vu, iteration, author_id);

    let started = Instant::now();
    match client.create_pull_request(&pr).await {
        Ok(outcome) => {
            let created = outcome.status.as_u16() == 201;
            metrics.record(Sample {
                endpoint: PR_CREATE_PATH,
                status: Some(outcome.status.as_u16()),
                elapsed: outcome.elapsed,
                failed: !created,
            });
            metrics.check(CHECK_PR_CREATED, created);
        }
        Err(e) => {
            metrics.record(Sample {
                endpoint: PR_CREATE_PATH,
                status: None,
                elapsed: started.elapsed(),
                failed: true,
            });
            metrics.check(CHECK_PR_CREATED, false);
            log_error(&format!("VU {} iteration {} failed: {}", vu, iteration, e));
        }
    }

    metrics.record_iteration();
}
