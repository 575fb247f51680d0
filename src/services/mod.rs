//! Business logic services

pub mod auth;
pub mod library;

use crate::{config::AppConfig, error::AppResult, repository::BookStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub library: library::LibraryService,
}

impl Services {
    /// Create all services from the loaded configuration
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let store = if config.library.seed_demo_books {
            BookStore::with_sample_books(config.library.max_books)
        } else {
            BookStore::new(config.library.max_books)
        };

        Ok(Self {
            auth: auth::AuthService::new(config.auth.clone())?,
            library: library::LibraryService::new(store),
        })
    }
}
