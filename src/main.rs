use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod modules;
mod routes;
mod state;
mod workers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting server...");

    let config = config::settings::AppConfig::new()
        .context("Failed to load configuration from environment")?;
    let port = config.server_port;
    let state = app::build_state(config)?;

    tokio::spawn(workers::job_evictor::start_job_evictor(
        state.transcode.store().clone(),
        state.config.job_ttl(),
        state.config.sweep_interval(),
    ));

    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}
