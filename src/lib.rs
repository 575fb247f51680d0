//! Booktrack Personal Book Tracking Server
//!
//! A REST JSON API for tracking books you have read: login, then create,
//! list, search, sort, paginate, edit, and delete records on your own
//! shelf. The collection lives in process memory only.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
