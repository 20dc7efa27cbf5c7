use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::client::HttpClient;
use crate::scenario::Scenario;
use crate::statistics::{Report, RequestSample};
use crate::user::SimulatedUser;

/// Spawns `num_users` independent simulated users and aggregates their
/// samples once every user has finished its cycles.
pub async fn run(
    num_users: usize,
    cycles_per_user: usize,
    base_uri: &'static str,
    scenario: Scenario,
) -> Result<Report> {
    info!(
        "spawning {num_users} simulated users ({cycles_per_user} cycles each) against {base_uri}, scenario {}",
        scenario.name
    );
    let scenario = Arc::new(scenario);
    let started = Instant::now();
    let mut tasks = Vec::with_capacity(num_users);
    for _ in 0..num_users {
        let user = SimulatedUser::new(Arc::clone(&scenario), HttpClient::new(), base_uri);
        tasks.push(tokio::spawn(user.run(cycles_per_user)));
    }
    let mut samples: Vec<RequestSample> = Vec::new();
    for task in tasks {
        let user_samples = task.await.context("failed to join simulated user")??;
        samples.extend(user_samples);
    }
    let report = Report::from_samples(&samples, started.elapsed());
    info!("run finished, {} requests issued", report.total_requests());
    Ok(report)
}
