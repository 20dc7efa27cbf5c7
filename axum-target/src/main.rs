use anyhow::Context;
use axum_target::TargetState;

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;
    let _guard = rt.enter();
    rt.block_on(run_server())
}

async fn run_server() -> anyhow::Result<()> {
    let bind = std::env::var("TARGET_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!("target listening on {bind}");
    axum_target::serve(listener, TargetState::new()).await
}
