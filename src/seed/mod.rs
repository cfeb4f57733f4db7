//! Seeding strategies that build the entity store at startup.

mod fixtures;
mod postgres;

pub use fixtures::{generate, random_profile, FixtureSeeder, PLACEHOLDER_IMAGE};
pub use postgres::PgSeeder;

use crate::catalog::{Catalog, EntityStore, Kind};
use crate::config::{DataSource, Settings};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait Seeder: Send + Sync {
    fn name(&self) -> &'static str;

    /// Produce a fully linked store. Called once before the server starts.
    async fn seed(&self) -> Result<EntityStore, AppError>;
}

/// Pick the seeder for `settings.data_source`. The PostgreSQL seeder needs `pool`.
pub fn seeder_for(settings: &Settings, pool: Option<&PgPool>) -> Result<Box<dyn Seeder>, AppError> {
    Ok(match settings.data_source {
        DataSource::Fixtures => Box::new(FixtureSeeder::new(settings.fixtures.clone())),
        DataSource::Postgres => {
            let pool = pool.ok_or_else(|| AppError::Unavailable("postgres data source needs DATABASE_URL".into()))?;
            Box::new(PgSeeder::new(pool.clone()))
        }
    })
}

/// Run `seeder` and wrap the result in a catalog.
pub async fn build_catalog(seeder: &dyn Seeder, per_page: usize) -> Result<Catalog, AppError> {
    let store = seeder.seed().await?;
    for kind in Kind::ALL {
        tracing::info!(source = seeder.name(), kind = kind.plural(), count = store.len(kind), "seeded");
    }
    Ok(Catalog::new(store, per_page))
}
