use anyhow::{Context, Result};
use billionaire_dashboard::{build_dashboard, dashboard, pipeline, DashboardConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    info!(version = billionaire_dashboard::VERSION, "billionaire dashboard starting");

    let config = DashboardConfig::default();

    // load → clean → persist → query
    let data = pipeline::run(&config)
        .with_context(|| format!("failed to build dashboard from {}", config.csv_path.display()))?;

    // plot
    let state = dashboard::AppState::new(build_dashboard(&data))
        .context("failed to render dashboard charts")?;
    dashboard::serve(&config.bind_addr, state)
        .await
        .with_context(|| format!("failed to serve dashboard on {}", config.bind_addr))?;

    Ok(())
}
