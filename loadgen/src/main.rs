use anyhow::{Context, Result};
use clap::Parser;

use loadgen::cli::Cli;
use loadgen::runner;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;
    let _guard = rt.enter();
    rt.block_on(run_loadgen(cli))
}

async fn run_loadgen(cli: Cli) -> Result<()> {
    // Users run as 'static tasks; the base URI lives for the whole process.
    let base_uri: &'static str = Box::leak(cli.base_url.into_boxed_str());
    let report = runner::run(cli.users, cli.cycles, base_uri, cli.scenario.build()).await?;
    report.print();
    Ok(())
}
