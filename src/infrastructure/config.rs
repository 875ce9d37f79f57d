use crate::domain::table::PageSize;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub cache: CacheSettings,
    pub fetch: FetchSettings,
    pub table: TableSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheSettings {
    pub ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchSettings {
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    pub failure_rate: f64,
    /// 0 disables the per-fetch timeout
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TableSettings {
    pub debounce_ms: u64,
    pub page_size: usize,
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl FetchSettings {
    pub fn min_latency(&self) -> Duration {
        Duration::from_millis(self.min_latency_ms)
    }

    pub fn max_latency(&self) -> Duration {
        Duration::from_millis(self.max_latency_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

impl TableSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl DashboardConfig {
    pub fn page_size(&self) -> anyhow::Result<PageSize> {
        Ok(PageSize::new(self.table.page_size)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.fetch.min_latency_ms > self.fetch.max_latency_ms {
            anyhow::bail!(
                "fetch.min_latency_ms ({}) exceeds fetch.max_latency_ms ({})",
                self.fetch.min_latency_ms,
                self.fetch.max_latency_ms
            );
        }
        if !(0.0..=1.0).contains(&self.fetch.failure_rate) {
            anyhow::bail!("fetch.failure_rate must be within [0, 1], got {}", self.fetch.failure_rate);
        }
        self.page_size()?;
        Ok(())
    }
}

fn builder_with_defaults() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("cache.ttl_secs", 300)?
        .set_default("fetch.min_latency_ms", 500)?
        .set_default("fetch.max_latency_ms", 1000)?
        .set_default("fetch.failure_rate", 0.1)?
        .set_default("fetch.timeout_ms", 10_000)?
        .set_default("table.debounce_ms", 300)?
        .set_default("table.page_size", 10)?)
}

/// Load `config/dashboard.*` (optional) overridden by `DASHBOARD__*` env vars
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = builder_with_defaults()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
