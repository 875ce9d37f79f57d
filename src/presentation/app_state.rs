// Application state shared by the presentation layer
use crate::application::dashboard_orchestrator::{DashboardOrchestrator, OrchestratorOptions};
use crate::application::resource_fetcher::ResourceFetcher;
use crate::application::table_view::{TableHandle, TableView, project_table_rows};
use crate::domain::resource::DashboardSnapshot;
use crate::infrastructure::config::DashboardConfig;
use crate::infrastructure::ttl_cache::DashboardCache;
use std::sync::Arc;

pub struct AppState {
    pub orchestrator: DashboardOrchestrator,
    pub table: TableHandle,
}

impl AppState {
    /// Attach the orchestrator and put a table view on top of its table dataset.
    pub fn build(
        config: &DashboardConfig,
        fetcher: Arc<dyn ResourceFetcher>,
        cache: Arc<DashboardCache>,
    ) -> anyhow::Result<Self> {
        let orchestrator = DashboardOrchestrator::attach(
            fetcher,
            cache,
            OrchestratorOptions {
                fetch_timeout: config.fetch.timeout(),
            },
        );
        let rows = project_table_rows(orchestrator.subscribe());
        let table = TableView::spawn(rows, config.table.debounce(), config.page_size()?);

        Ok(Self {
            orchestrator,
            table,
        })
    }

    /// Wait until every resource has left the loading state.
    pub async fn settled(&self) -> anyhow::Result<DashboardSnapshot> {
        let mut rx = self.orchestrator.subscribe();
        let snapshot = rx.wait_for(DashboardSnapshot::is_settled).await?;
        Ok(snapshot.clone())
    }
}
