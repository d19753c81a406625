//! Application state container shared across Axum route handlers.
//!
//! Holds the database connection and the listing settings that handlers need.
//! Axum clones it into every handler through the `State<T>` extractor.

use crate::config;
use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    page_size: Option<u64>,
}

impl AppState {
    /// Creates a new `AppState` using the configured global page size.
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            page_size: config::page_size(),
        }
    }

    /// Creates a new `AppState` with an explicit page size (`None` disables pagination).
    pub fn with_page_size(db: DatabaseConnection, page_size: Option<u64>) -> Self {
        Self { db, page_size }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Page size applied to list endpoints, `None` when pagination is disabled.
    pub fn page_size(&self) -> Option<u64> {
        self.page_size
    }
}
