// Simulated backend - random latency and failures in front of synthetic data
use crate::application::resource_fetcher::{FetchError, ResourceFetcher};
use crate::domain::resource::{ResourceData, ResourceKey};
use crate::infrastructure::record_generator;
use async_trait::async_trait;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_FAILURE_RATE: f64 = 0.1;

/// Decides how long a simulated request takes.
pub trait LatencyProvider: Send + Sync {
    fn latency(&self, key: ResourceKey) -> Duration;
}

/// Decides whether a simulated request fails.
pub trait FailurePolicy: Send + Sync {
    fn should_fail(&self, key: ResourceKey) -> bool;
}

/// Latency drawn uniformly from `[min, max)`
#[derive(Debug, Clone)]
pub struct UniformLatency {
    min: Duration,
    max: Duration,
}

impl UniformLatency {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }
}

impl Default for UniformLatency {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(1000))
    }
}

impl LatencyProvider for UniformLatency {
    fn latency(&self, _key: ResourceKey) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..self.max)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLatency(pub Duration);

impl LatencyProvider for FixedLatency {
    fn latency(&self, _key: ResourceKey) -> Duration {
        self.0
    }
}

/// Fails each request independently with a fixed probability
#[derive(Debug, Clone)]
pub struct RandomFailure {
    rate: f64,
}

impl RandomFailure {
    pub fn new(rate: f64) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
        }
    }
}

impl Default for RandomFailure {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_RATE)
    }
}

impl FailurePolicy for RandomFailure {
    fn should_fail(&self, _key: ResourceKey) -> bool {
        rand::thread_rng().gen_bool(self.rate)
    }
}

/// Deterministic policy: the listed resources always fail, the rest never do
#[derive(Debug, Clone, Default)]
pub struct FailFor(pub HashSet<ResourceKey>);

impl FailFor {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn keys(keys: impl IntoIterator<Item = ResourceKey>) -> Self {
        Self(keys.into_iter().collect())
    }
}

impl FailurePolicy for FailFor {
    fn should_fail(&self, key: ResourceKey) -> bool {
        self.0.contains(&key)
    }
}

#[derive(Clone)]
pub struct SimulatedFetcher {
    latency: Arc<dyn LatencyProvider>,
    failures: Arc<dyn FailurePolicy>,
}

impl Default for SimulatedFetcher {
    fn default() -> Self {
        Self::new(Arc::new(UniformLatency::default()), Arc::new(RandomFailure::default()))
    }
}

impl SimulatedFetcher {
    pub fn new(latency: Arc<dyn LatencyProvider>, failures: Arc<dyn FailurePolicy>) -> Self {
        Self { latency, failures }
    }

    fn settle(&self, key: ResourceKey) -> Result<ResourceData, FetchError> {
        if self.failures.should_fail(key) {
            return Err(FetchError::failed(key));
        }
        Ok(record_generator::generate(key, &mut rand::thread_rng()))
    }
}

#[async_trait]
impl ResourceFetcher for SimulatedFetcher {
    async fn fetch(
        &self,
        key: ResourceKey,
        cancel: CancellationToken,
    ) -> Result<ResourceData, FetchError> {
        let delay = self.latency.latency(key);
        tracing::debug!("Simulating {} fetch with {:?} latency", key, delay);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FetchError::Aborted { key }),
            _ = tokio::time::sleep(delay) => {}
        }

        self.settle(key)
    }
}
