// Application layer - Orchestration, debouncing and table use cases
pub mod dashboard_orchestrator;
pub mod debounce;
pub mod resource_fetcher;
pub mod table_engine;
pub mod table_view;
