// Infrastructure layer - Cache, simulated backend and configuration
pub mod config;
pub mod record_generator;
pub mod simulated_fetcher;
pub mod ttl_cache;
