use std::sync::Arc;
use std::time::Duration;

use mockito::Matcher;

use prload::constants::{CHECK_PR_CREATED, CHECK_SETUP};
use prload::metrics::MetricsRegistry;
use prload::runner::{RunOptions, Runner};
use prload::scenario::{evaluate_all, RampProfile, Stage, Threshold};
use prload::ServiceClient;

fn short_profile() -> RampProfile {
    RampProfile::new(vec![
        Stage::new(Duration::from_millis(300), 5),
        Stage::new(Duration::from_millis(300), 0),
    ])
    .unwrap()
}

fn runner_for(server_url: &str, metrics: Arc<MetricsRegistry>, team_size: usize) -> Runner {
    let client = ServiceClient::new(server_url.to_string()).unwrap();
    Runner::new(
        client,
        metrics,
        RunOptions {
            profile: short_profile(),
            think_time: Duration::from_millis(10),
            team_size,
        },
    )
}

#[tokio::test]
async fn test_run_against_healthy_service() {
    let mut server = mockito::Server::new_async().await;

    let team_mock = server
        .mock("POST", "/team/add")
        .match_body(Matcher::Regex(r#""team_name":"load_team_\d+""#.to_string()))
        .with_status(201)
        .create_async()
        .await;

    // Only authors from the 5-member team match; anything else would
    // miss the mock and come back non-201.
    let pr_mock = server
        .mock("POST", "/pullRequest/create")
        .match_body(Matcher::Regex(r#""author_id":"lu_[1-5]""#.to_string()))
        .with_status(201)
        .expect_at_least(1)
        .create_async()
        .await;

    let metrics = Arc::new(MetricsRegistry::new());
    let runner = runner_for(&server.url(), metrics.clone(), 5);

    runner.run().await;

    team_mock.assert_async().await;
    pr_mock.assert_async().await;

    let summary = metrics.summary();
    assert!(summary.iterations >= 1);
    // Setup call plus one sample per iteration.
    assert_eq!(summary.requests, summary.iterations + 1);
    // With 10ms think time, 5 VUs and a ~600ms window the iteration
    // count cannot plausibly exceed this.
    assert!(summary.iterations <= 500);

    assert_eq!(summary.checks[CHECK_SETUP].fails, 0);
    assert_eq!(
        summary.checks[CHECK_PR_CREATED].fails, 0,
        "every author_id must come from the setup output"
    );

    let results = evaluate_all(
        &[
            Threshold::P95Below(Duration::from_secs(10)),
            Threshold::FailureRateBelow(0.5),
        ],
        &summary,
    );
    assert!(results.iter().all(|r| r.passed));
}

#[tokio::test]
async fn test_failed_setup_still_runs_iterations() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/team/add")
        .with_status(500)
        .create_async()
        .await;

    let pr_mock = server
        .mock("POST", "/pullRequest/create")
        .with_status(201)
        .expect_at_least(1)
        .create_async()
        .await;

    let metrics = Arc::new(MetricsRegistry::new());
    let runner = runner_for(&server.url(), metrics.clone(), 5);

    runner.run().await;

    pr_mock.assert_async().await;

    let summary = metrics.summary();
    assert_eq!(summary.checks[CHECK_SETUP].fails, 1);
    assert!(
        summary.iterations >= 1,
        "a failed setup must not stop the iteration phase"
    );
    assert!(summary.checks[CHECK_PR_CREATED].passes >= 1);
}

#[tokio::test]
async fn test_failing_pr_endpoint_breaches_failure_threshold() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/team/add")
        .with_status(201)
        .create_async()
        .await;

    server
        .mock("POST", "/pullRequest/create")
        .with_status(500)
        .create_async()
        .await;

    let metrics = Arc::new(MetricsRegistry::new());
    let runner = runner_for(&server.url(), metrics.clone(), 5);

    runner.run().await;

    let summary = metrics.summary();
    assert!(summary.iterations >= 1);
    assert!(summary.checks[CHECK_PR_CREATED].fails >= 1);

    let result = Threshold::FailureRateBelow(0.001).evaluate(&summary);
    assert!(
        !result.passed,
        "a run full of 500s must fail the failure-rate threshold"
    );
}

#[tokio::test]
async fn test_unreachable_service_records_failure_without_crash() {
    // Nothing listens on the discard port; the transport error must be
    // recorded as a failed sample, not bubble up.
    let metrics = MetricsRegistry::new();
    let client = ServiceClient::new("http://127.0.0.1:9".to_string()).unwrap();

    let setup_data = prload::runner::run_setup(&client, &metrics, 3).await;

    assert_eq!(setup_data.user_ids.len(), 3);
    let summary = metrics.summary();
    assert_eq!(summary.requests, 1);
    assert_eq!(summary.failed_requests, 1);
    assert_eq!(summary.checks[CHECK_SETUP].fails, 1);
}

#[tokio::test]
async fn test_setup_only_returns_all_member_ids() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/team/add")
        .with_status(200)
        .create_async()
        .await;

    let metrics = MetricsRegistry::new();
    let client = ServiceClient::new(server.url()).unwrap();

    let setup_data = prload::runner::run_setup(&client, &metrics, 100).await;

    assert_eq!(setup_data.user_ids.len(), 100);
    assert_eq!(setup_data.user_ids[0], "lu_1");
    assert_eq!(setup_data.user_ids[99], "lu_100");
    assert_eq!(metrics.summary().checks[CHECK_SETUP].passes, 1);
}
