// Dashboard orchestrator - Cached, cancellable fan-out over the six dashboard resources
use crate::application::resource_fetcher::{FetchError, ResourceFetcher};
use crate::domain::resource::{DashboardSnapshot, ResourceData, ResourceKey};
use crate::infrastructure::ttl_cache::{CacheError, DashboardCache};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Shown on every resource left loading when a cycle cannot be dispatched.
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "Failed to load dashboard data";

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("cache unavailable: {0}")]
    Cache(#[from] CacheError),

    #[error("no async runtime available to dispatch the {0} fetch")]
    NoRuntime(ResourceKey),
}

#[derive(Debug, Clone, Default)]
pub struct OrchestratorOptions {
    /// Upper bound for a single fetch. `None` lets a fetch run forever.
    pub fetch_timeout: Option<Duration>,
}

struct FetchCycle {
    generation: u64,
    token: Option<CancellationToken>,
}

struct Inner {
    fetcher: Arc<dyn ResourceFetcher>,
    cache: Arc<DashboardCache>,
    options: OrchestratorOptions,
    root: CancellationToken,
    cycle: Mutex<FetchCycle>,
    state: watch::Sender<DashboardSnapshot>,
}

/// Coordinates the six resource fetches, the shared cache and the per-resource
/// `{data, is_loading, error}` state. Dropping the orchestrator cancels any
/// in-flight cycle.
pub struct DashboardOrchestrator {
    inner: Arc<Inner>,
}

impl DashboardOrchestrator {
    /// Build the orchestrator and start the first fetch cycle.
    pub fn attach(
        fetcher: Arc<dyn ResourceFetcher>,
        cache: Arc<DashboardCache>,
        options: OrchestratorOptions,
    ) -> Self {
        let (state, _) = watch::channel(DashboardSnapshot::default());
        let orchestrator = Self {
            inner: Arc::new(Inner {
                fetcher,
                cache,
                options,
                root: CancellationToken::new(),
                cycle: Mutex::new(FetchCycle {
                    generation: 0,
                    token: None,
                }),
                state,
            }),
        };
        orchestrator.fetch_all();
        orchestrator
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Start a new cycle, superseding the current one. Returns once every
    /// lookup has been applied or dispatched.
    pub fn fetch_all(&self) {
        self.inner.fetch_all();
    }

    pub fn refetch(&self) {
        self.fetch_all();
    }

    /// Explicit form of dropping the orchestrator.
    pub fn detach(self) {}
}

impl Drop for DashboardOrchestrator {
    fn drop(&mut self) {
        tracing::debug!("Dashboard orchestrator detached, cancelling in-flight fetches");
        self.inner.root.cancel();
    }
}

impl Inner {
    fn lock_cycle(&self) -> MutexGuard<'_, FetchCycle> {
        self.cycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fetch_all(self: &Arc<Self>) {
        let mut cycle = self.lock_cycle();
        if let Some(previous) = cycle.token.take() {
            previous.cancel();
        }
        cycle.generation += 1;
        let generation = cycle.generation;
        let token = self.root.child_token();
        cycle.token = Some(token.clone());

        tracing::info!("Starting dashboard fetch cycle {}", generation);
        self.state.send_modify(DashboardSnapshot::begin_cycle);

        if let Err(err) = self.dispatch(generation, &token) {
            tracing::error!("Unexpected error in fetch cycle {}: {}", generation, err);
            token.cancel();
            self.state
                .send_modify(|snapshot| snapshot.fail_pending(UNEXPECTED_FAILURE_MESSAGE));
        }
    }

    /// Cache hits are applied synchronously; misses are spawned as tasks.
    fn dispatch(
        self: &Arc<Self>,
        generation: u64,
        token: &CancellationToken,
    ) -> Result<(), DashboardError> {
        let mut misses = Vec::new();
        for key in ResourceKey::ALL {
            match self.cache.get_fresh(&key)? {
                Some(cached) => {
                    tracing::debug!("Cache hit for {}", key);
                    let data = ResourceData::clone(&cached);
                    self.state.send_modify(|snapshot| snapshot.apply_loaded(data));
                }
                None => misses.push(key),
            }
        }

        let Some(&first_miss) = misses.first() else {
            return Ok(());
        };
        let runtime = Handle::try_current().map_err(|_| DashboardError::NoRuntime(first_miss))?;
        for key in misses {
            tracing::debug!("Cache miss for {}, dispatching fetch", key);
            runtime.spawn(Arc::clone(self).run_fetch(generation, key, token.clone()));
        }
        Ok(())
    }

    async fn run_fetch(self: Arc<Self>, generation: u64, key: ResourceKey, token: CancellationToken) {
        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => Err(FetchError::Aborted { key }),
            result = self.fetch_with_timeout(key, token.clone()) => result,
        };
        self.settle(generation, key, outcome);
    }

    async fn fetch_with_timeout(
        &self,
        key: ResourceKey,
        token: CancellationToken,
    ) -> Result<ResourceData, FetchError> {
        let fetch = self.fetcher.fetch(key, token);
        match self.options.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .unwrap_or_else(|_| Err(FetchError::TimedOut { key, after: limit })),
            None => fetch.await,
        }
    }

    fn settle(&self, generation: u64, key: ResourceKey, outcome: Result<ResourceData, FetchError>) {
        let cycle = self.lock_cycle();
        let is_current = cycle.generation == generation
            && cycle.token.as_ref().is_some_and(|token| !token.is_cancelled());
        if !is_current {
            tracing::debug!("Discarding {} result from superseded cycle {}", key, generation);
            return;
        }

        match outcome {
            Ok(data) if data.key() == key => {
                if let Err(err) = self.cache.set(key, data.clone()) {
                    tracing::warn!("Failed to cache {} data: {}", key, err);
                }
                self.state.send_modify(|snapshot| snapshot.apply_loaded(data));
            }
            Ok(data) => {
                tracing::warn!("Fetcher returned {} data for {}", data.key(), key);
                let message = FetchError::failed(key).to_string();
                self.state.send_modify(|snapshot| snapshot.apply_failed(key, message));
            }
            Err(err) if err.is_aborted() => {
                tracing::debug!("{} fetch aborted", key);
            }
            Err(err) => {
                tracing::warn!("{} fetch failed: {}", key, err);
                self.state
                    .send_modify(|snapshot| snapshot.apply_failed(key, err.to_string()));
            }
        }
    }
}
