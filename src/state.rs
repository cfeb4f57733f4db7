//! Shared application state for all routes. The catalog is read-only once built.

use crate::catalog::Catalog;
use crate::config::DataSource;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    /// Present when `DATABASE_URL` is set; signup needs it.
    pub pool: Option<PgPool>,
    pub data_source: DataSource,
}

impl AppState {
    pub fn new(catalog: Catalog, pool: Option<PgPool>, data_source: DataSource) -> Self {
        Self {
            catalog: Arc::new(catalog),
            pool,
            data_source,
        }
    }
}
