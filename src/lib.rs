//! Local library catalog server
//!
//! CRUD workflows for authors and book copies over a pluggable catalog store.
//! Controllers hand a view payload (template name plus data) to an external
//! renderer, or redirect.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
