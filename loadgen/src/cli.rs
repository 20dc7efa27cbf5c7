use clap::{Parser, ValueEnum};

use crate::scenario::Scenario;

/// Replays weighted user scenarios against an HTTP target.
#[derive(Parser, Debug)]
#[command(name = "loadgen")]
#[command(about = "Replays weighted user scenarios against an HTTP target")]
#[command(version)]
pub struct Cli {
    /// Base URL of the target server
    #[arg(
        long,
        default_value = "http://127.0.0.1:8080",
        env = "LOADGEN_BASE_URL"
    )]
    pub base_url: String,

    /// Number of concurrent simulated users
    #[arg(long, default_value = "16")]
    pub users: usize,

    /// Action cycles each user runs before stopping
    #[arg(long, default_value = "100")]
    pub cycles: usize,

    /// Scenario to replay
    #[arg(long, value_enum, default_value = "index-only")]
    pub scenario: ScenarioKind,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ScenarioKind {
    /// GET / in a tight loop
    IndexOnly,
    /// Login, then mixed browsing and item lookups
    MixedEndpoints,
}

impl ScenarioKind {
    #[must_use]
    pub fn build(self) -> Scenario {
        match self {
            ScenarioKind::IndexOnly => Scenario::index_only(),
            ScenarioKind::MixedEndpoints => Scenario::mixed_endpoints(),
        }
    }
}
