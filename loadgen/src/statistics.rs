use std::collections::BTreeMap;
use std::time::Duration;

use hyper::{Method, StatusCode};

/// Outcome of one issued request. `status` is `None` when the request failed
/// before a response came back (connect error, timeout).
#[derive(Debug, Clone)]
pub struct RequestSample {
    pub label: &'static str,
    pub method: Method,
    pub status: Option<StatusCode>,
    pub rtt: Duration,
}

impl RequestSample {
    #[inline]
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.status.is_some_and(|status| status.is_success())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LabelStats {
    pub requests: usize,
    pub failures: usize,
    pub min_rtt_us: u128,
    pub max_rtt_us: u128,
    total_rtt_us: u128,
}

impl LabelStats {
    fn new() -> Self {
        Self {
            requests: 0,
            failures: 0,
            min_rtt_us: u128::MAX,
            max_rtt_us: u128::MIN,
            total_rtt_us: 0,
        }
    }

    fn update(&mut self, sample: &RequestSample) {
        let rtt = sample.rtt.as_micros();
        self.requests += 1;
        if !sample.succeeded() {
            self.failures += 1;
        }
        if rtt < self.min_rtt_us {
            self.min_rtt_us = rtt;
        }
        if rtt > self.max_rtt_us {
            self.max_rtt_us = rtt;
        }
        self.total_rtt_us += rtt;
    }

    #[must_use]
    pub fn mean_rtt_us(&self) -> f64 {
        if self.requests == 0 {
            return 0.0;
        }
        self.total_rtt_us as f64 / self.requests as f64
    }
}

/// Aggregated view of one run, grouped by request label.
pub struct Report {
    labels: BTreeMap<&'static str, LabelStats>,
    total_requests: usize,
    elapsed: Duration,
}

impl Report {
    #[must_use]
    pub fn from_samples(samples: &[RequestSample], elapsed: Duration) -> Self {
        let mut labels: BTreeMap<&'static str, LabelStats> = BTreeMap::new();
        for sample in samples {
            labels
                .entry(sample.label)
                .or_insert_with(LabelStats::new)
                .update(sample);
        }
        Self {
            labels,
            total_requests: samples.len(),
            elapsed,
        }
    }

    #[must_use]
    pub fn label(&self, label: &str) -> Option<&LabelStats> {
        self.labels.get(label)
    }

    #[must_use]
    pub fn total_requests(&self) -> usize {
        self.total_requests
    }

    pub fn print(&self) {
        let elapsed_secs = self.elapsed.as_secs_f64();
        let rps = if elapsed_secs > 0.0 {
            self.total_requests as f64 / elapsed_secs
        } else {
            0.0
        };
        println!(
            "Results: {} requests in {elapsed_secs:.2}s, {rps:.1} req/s",
            self.total_requests
        );
        for (label, stats) in &self.labels {
            println!(
                "    {label:<12} rtt us [min, mean, max] = [{}, {:.2}, {}], requests = {}, failures = {}",
                stats.min_rtt_us,
                stats.mean_rtt_us(),
                stats.max_rtt_us,
                stats.requests,
                stats.failures,
            );
        }
    }
}
