//! Glassfinder: catalog REST API over shops, artists, companies and their pieces.

pub mod catalog;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;

pub use catalog::{Catalog, EntityStore, Kind, Listing, QueryEngine, Record, SortField};
pub use config::{validate, DataSource, FixtureSettings, Settings};
pub use error::{AppError, CatalogError, ConfigError};
pub use response::{error_body, Envelope};
pub use routes::{app, catalog_routes, common_routes, signup_routes};
pub use seed::{build_catalog, seeder_for, FixtureSeeder, PgSeeder, Seeder};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
