// Dashboard data layer: cached, cancellable resource fetching and client-side table filtering
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
