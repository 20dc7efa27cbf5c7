use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use hyper::Request;
use load_test_util::empty_body;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::client::HttpClient;
use crate::scenario::{RequestSpec, Scenario};
use crate::schedule::WeightTable;
use crate::statistics::RequestSample;

/// One simulated user: owns its client, RNG, and position in the scenario.
/// Request failures are recorded as samples, never propagated; the loop only
/// stops once the requested number of cycles has run.
pub struct SimulatedUser {
    scenario: Arc<Scenario>,
    table: WeightTable,
    client: HttpClient,
    base_uri: &'static str,
    rng: StdRng,
}

impl SimulatedUser {
    #[must_use]
    pub fn new(scenario: Arc<Scenario>, client: HttpClient, base_uri: &'static str) -> Self {
        Self::with_rng(scenario, client, base_uri, StdRng::from_entropy())
    }

    /// Fixed-seed variant so tests can pin the task-selection sequence.
    #[must_use]
    pub fn with_seed(
        scenario: Arc<Scenario>,
        client: HttpClient,
        base_uri: &'static str,
        seed: u64,
    ) -> Self {
        Self::with_rng(scenario, client, base_uri, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        scenario: Arc<Scenario>,
        client: HttpClient,
        base_uri: &'static str,
        rng: StdRng,
    ) -> Self {
        let table = WeightTable::from_tasks(&scenario.tasks);
        Self {
            scenario,
            table,
            client,
            base_uri,
            rng,
        }
    }

    /// Runs the startup request once, then `cycles` select-and-run rounds
    /// with a sampled wait between consecutive rounds.
    pub async fn run(mut self, cycles: usize) -> Result<Vec<RequestSample>> {
        let scenario = Arc::clone(&self.scenario);
        let mut samples = Vec::new();
        if let Some(spec) = scenario.on_start.as_ref() {
            self.issue(spec, &mut samples).await?;
        }
        for cycle in 0..cycles {
            let task_idx = self.table.pick(&mut self.rng);
            let task = &scenario.tasks[task_idx];
            for spec in &task.requests {
                self.issue(spec, &mut samples).await?;
            }
            if cycle + 1 < cycles {
                let pause = scenario.wait_time.sample(&mut self.rng);
                tokio::time::sleep(pause).await;
            }
        }
        Ok(samples)
    }

    // Errors here mean the request could not be constructed at all, which is
    // an authoring problem rather than a load-test outcome.
    async fn issue(&mut self, spec: &RequestSpec, samples: &mut Vec<RequestSample>) -> Result<()> {
        let path = spec.target.resolve(&mut self.rng);
        let request = Request::builder()
            .method(spec.method.clone())
            .uri(format!("{}{path}", self.base_uri))
            .body(empty_body())
            .context("failed to build request")?;
        let start = Instant::now();
        let outcome = self.client.send_recv(request).await;
        let rtt = start.elapsed();
        let status = match outcome {
            Ok((status, _body)) => Some(status),
            Err(err) => {
                debug!("request to {path} failed: {err:#}");
                None
            }
        };
        samples.push(RequestSample {
            label: spec.target.label(),
            method: spec.method.clone(),
            status,
            rtt,
        });
        Ok(())
    }
}
