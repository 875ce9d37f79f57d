// Presentation layer - Wiring and text rendering for dashboard surfaces
pub mod app_state;
pub mod panels;
