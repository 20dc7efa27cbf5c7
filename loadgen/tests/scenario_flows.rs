//! End-to-end runs of the built-in scenarios against the real target router
//! bound on an ephemeral port. Users are seeded so request sequences are
//! reproducible; think-time is overridden to zero to keep the tests fast.

use std::sync::Arc;

use axum_target::TargetState;
use hyper::{Method, Request, StatusCode};
use load_test_util::{empty_body, HitSnapshot};
use loadgen::client::HttpClient;
use loadgen::scenario::{Scenario, WaitTime};
use loadgen::user::SimulatedUser;

async fn start_target() -> (&'static str, TargetState) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = TargetState::new();
    let serve_state = state.clone();
    tokio::spawn(async move {
        let _ = axum_target::serve(listener, serve_state).await;
    });
    let base: &'static str = Box::leak(format!("http://{addr}").into_boxed_str());
    (base, state)
}

fn without_wait(mut scenario: Scenario) -> Scenario {
    scenario.wait_time = WaitTime::between(0.0, 0.0);
    scenario
}

#[tokio::test(flavor = "multi_thread")]
async fn index_only_four_cycles_hit_index_and_nothing_else() {
    let (base, state) = start_target().await;
    let scenario = without_wait(Scenario::index_only());
    let user = SimulatedUser::with_seed(Arc::new(scenario), HttpClient::new(), base, 7);

    let samples = user.run(4).await.unwrap();

    assert_eq!(samples.len(), 4);
    assert!(samples.iter().all(|sample| sample.succeeded()));
    let hits = state.log.hits();
    assert_eq!(hits.len(), 4);
    for hit in &hits {
        assert_eq!(hit.method, Method::GET);
        assert_eq!(hit.path, "/");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn mixed_endpoints_first_request_is_login() {
    let (base, state) = start_target().await;
    let scenario = without_wait(Scenario::mixed_endpoints());
    let user = SimulatedUser::with_seed(Arc::new(scenario), HttpClient::new(), base, 11);

    let samples = user.run(3).await.unwrap();

    assert_eq!(samples[0].label, "/login");
    assert_eq!(samples[0].method, Method::POST);
    assert!(samples[0].succeeded());
    let hits = state.log.hits();
    assert_eq!(hits[0].method, Method::POST);
    assert_eq!(hits[0].path, "/login");
}

#[tokio::test(flavor = "multi_thread")]
async fn browse_sweep_runs_three_requests_in_declared_order() {
    let (base, state) = start_target().await;
    // Only the sweep task, so every cycle exercises the fixed sequence and
    // its deliberate 404.
    let mixed = Scenario::mixed_endpoints();
    let scenario = without_wait(Scenario {
        name: "browse-only",
        wait_time: mixed.wait_time,
        on_start: None,
        tasks: vec![mixed.tasks[0].clone()],
    });
    let cycles = 5;
    let user = SimulatedUser::with_seed(Arc::new(scenario), HttpClient::new(), base, 3);

    let samples = user.run(cycles).await.unwrap();

    let hits = state.log.hits();
    assert_eq!(hits.len(), cycles * 3);
    for sweep in hits.chunks(3) {
        assert_eq!(sweep[0].method, Method::GET);
        assert_eq!(sweep[0].path, "/hello");
        assert_eq!(sweep[1].method, Method::GET);
        assert_eq!(sweep[1].path, "/world");
        assert_eq!(sweep[2].method, Method::POST);
        assert_eq!(sweep[2].path, "/notfound");
    }
    // Every cycle ends in a 404 and the user still finishes all of them.
    let notfound: Vec<_> = samples
        .iter()
        .filter(|sample| sample.label == "/notfound")
        .collect();
    assert_eq!(notfound.len(), cycles);
    assert!(notfound
        .iter()
        .all(|sample| sample.status == Some(StatusCode::NOT_FOUND)));
}

#[tokio::test(flavor = "multi_thread")]
async fn mixed_endpoints_run_stays_up_and_items_stay_in_range() {
    let (base, state) = start_target().await;
    let scenario = without_wait(Scenario::mixed_endpoints());
    let cycles = 40;
    let user = SimulatedUser::with_seed(Arc::new(scenario), HttpClient::new(), base, 3);

    let samples = user.run(cycles).await.unwrap();

    let sweeps = samples
        .iter()
        .filter(|sample| sample.label == "/notfound")
        .count();
    let items: Vec<_> = samples
        .iter()
        .filter(|sample| sample.label == "/item")
        .collect();
    // Every cycle ran one task to completion, despite the sweep's 404s.
    assert_eq!(sweeps + items.len(), cycles);
    assert_eq!(samples.len(), 1 + sweeps * 3 + items.len());
    // Weight 3 vs 1: item lookups dominate.
    assert!(items.len() > sweeps);
    // The target 400s any id outside [1, 10000], so all-200 proves the ids
    // stayed in range.
    assert!(!items.is_empty());
    assert!(items
        .iter()
        .all(|sample| sample.status == Some(StatusCode::OK)));
    assert_eq!(state.log.len(), samples.len());
}

#[tokio::test(flavor = "multi_thread")]
async fn hits_endpoint_reports_per_path_counts() {
    let (base, state) = start_target().await;
    let mut client = HttpClient::new();
    for _ in 0..3 {
        let request = Request::builder()
            .method(Method::GET)
            .uri(format!("{base}/"))
            .body(empty_body())
            .unwrap();
        let (status, _body) = client.send_recv(request).await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let request = Request::builder()
        .method(Method::GET)
        .uri(format!("{base}/hits"))
        .body(empty_body())
        .unwrap();
    let (status, body) = client.send_recv(request).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let snapshot: HitSnapshot = serde_json::from_slice(&body).unwrap();
    assert_eq!(snapshot.total, 3);
    assert_eq!(snapshot.per_path.get("/"), Some(&3));
    assert_eq!(state.log.len(), 3);
}
