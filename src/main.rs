// Main entry point - Dependency injection and a single dashboard render
use std::sync::Arc;

use dashboard_data::infrastructure::config::load_dashboard_config;
use dashboard_data::infrastructure::simulated_fetcher::{
    RandomFailure, SimulatedFetcher, UniformLatency,
};
use dashboard_data::infrastructure::ttl_cache::DashboardCache;
use dashboard_data::presentation::app_state::AppState;
use dashboard_data::presentation::panels::{render_dashboard, render_table_page};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Cache lives for the whole process and outlives any orchestrator
    let cache = Arc::new(DashboardCache::new(config.cache.ttl()));

    // Simulated backend (infrastructure layer)
    let fetcher = Arc::new(SimulatedFetcher::new(
        Arc::new(UniformLatency::new(
            config.fetch.min_latency(),
            config.fetch.max_latency(),
        )),
        Arc::new(RandomFailure::new(config.fetch.failure_rate)),
    ));

    // Orchestrator and table view (application layer)
    let state = AppState::build(&config, fetcher, cache.clone())?;
    let snapshot = state.settled().await?;
    print!("{}", render_dashboard(&snapshot));

    let mut pages = state.table.subscribe();
    let table_rows = snapshot.table.data.len();
    let page = pages
        .wait_for(|page| page.filtered_rows.len() == table_rows)
        .await?
        .clone();
    println!("== Users table");
    print!("{}", render_table_page(&page));

    // A second cycle inside the TTL window is served from the cache
    state.orchestrator.refetch();
    let cached = state.settled().await?;
    tracing::info!(
        "Refetch settled with {} cached entries, table rows: {}",
        cache.len(),
        cached.table.data.len()
    );

    Ok(())
}
