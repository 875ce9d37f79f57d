// Fetcher trait for dashboard resource access
use crate::domain::resource::{ResourceData, ResourceKey};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Simulated or real failure; the message is shown to the user verbatim
    #[error("{message}")]
    Failed { key: ResourceKey, message: String },

    /// The fetch cycle was cancelled. Never surfaced to the user.
    #[error("{key} data fetch aborted")]
    Aborted { key: ResourceKey },

    #[error("Timed out fetching {} data", .key.label())]
    TimedOut { key: ResourceKey, after: Duration },
}

impl FetchError {
    pub fn failed(key: ResourceKey) -> Self {
        FetchError::Failed {
            key,
            message: format!("Failed to fetch {} data", key.label()),
        }
    }

    pub fn key(&self) -> ResourceKey {
        match self {
            FetchError::Failed { key, .. }
            | FetchError::Aborted { key }
            | FetchError::TimedOut { key, .. } => *key,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, FetchError::Aborted { .. })
    }
}

#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch one resource. Implementations should return
    /// `FetchError::Aborted` promptly once `cancel` is signalled.
    async fn fetch(
        &self,
        key: ResourceKey,
        cancel: CancellationToken,
    ) -> Result<ResourceData, FetchError>;
}
