//! Declarative user-behavior profiles. A scenario names an optional startup
//! request, a think-time range, and a weighted set of tasks; the runner and
//! [`crate::user::SimulatedUser`] own execution.

use std::time::Duration;

use hyper::Method;
use rand::Rng;

pub const DEFAULT_WEIGHT: u32 = 1;

/// Inclusive think-time bounds in seconds, sampled uniformly once per cycle.
/// Authoring invariant: `min_secs <= max_secs`, both non-negative.
#[derive(Debug, Clone, Copy)]
pub struct WaitTime {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl WaitTime {
    #[must_use]
    pub const fn between(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        Duration::from_secs_f64(rng.gen_range(self.min_secs..=self.max_secs))
    }
}

/// Where a request points. `RandomId` appends a fresh `id` query parameter
/// drawn uniformly from `[low, high]` on every invocation and groups the
/// request under `label` for statistics.
#[derive(Debug, Clone, Copy)]
pub enum Target {
    Path(&'static str),
    RandomId {
        base: &'static str,
        label: &'static str,
        low: u64,
        high: u64,
    },
}

impl Target {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Target::Path(path) => path,
            Target::RandomId { label, .. } => label,
        }
    }

    pub fn resolve<R: Rng>(&self, rng: &mut R) -> String {
        match self {
            Target::Path(path) => (*path).to_string(),
            Target::RandomId {
                base, low, high, ..
            } => {
                let id = rng.gen_range(*low..=*high);
                format!("{base}?id={id}")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub target: Target,
}

impl RequestSpec {
    #[must_use]
    pub fn get(path: &'static str) -> Self {
        Self {
            method: Method::GET,
            target: Target::Path(path),
        }
    }

    #[must_use]
    pub fn post(path: &'static str) -> Self {
        Self {
            method: Method::POST,
            target: Target::Path(path),
        }
    }
}

/// One weighted action. Requests run in declared order and count as a single
/// invocation when the task is selected.
#[derive(Debug, Clone)]
pub struct WeightedTask {
    pub name: &'static str,
    pub weight: u32,
    pub requests: Vec<RequestSpec>,
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub wait_time: WaitTime,
    pub on_start: Option<RequestSpec>,
    pub tasks: Vec<WeightedTask>,
}

impl Scenario {
    /// Hammers the index page with sub-second pacing.
    #[must_use]
    pub fn index_only() -> Self {
        Self {
            name: "index-only",
            wait_time: WaitTime::between(0.0, 1.0),
            on_start: None,
            tasks: vec![WeightedTask {
                name: "index",
                weight: 20,
                requests: vec![RequestSpec::get("/")],
            }],
        }
    }

    /// Logs in once, then mixes a three-request browse sweep with item
    /// lookups at three times the sweep's frequency, paced like a slow human.
    #[must_use]
    pub fn mixed_endpoints() -> Self {
        Self {
            name: "mixed-endpoints",
            wait_time: WaitTime::between(5.0, 9.0),
            on_start: Some(RequestSpec::post("/login")),
            tasks: vec![
                WeightedTask {
                    name: "browse",
                    weight: DEFAULT_WEIGHT,
                    requests: vec![
                        RequestSpec::get("/hello"),
                        RequestSpec::get("/world"),
                        RequestSpec::post("/notfound"),
                    ],
                },
                WeightedTask {
                    name: "view-item",
                    weight: 3,
                    requests: vec![RequestSpec {
                        method: Method::GET,
                        target: Target::RandomId {
                            base: "/item",
                            label: "/item",
                            low: 1,
                            high: 10_000,
                        },
                    }],
                },
            ],
        }
    }
}
