//! Server: reads settings from the environment, seeds the catalog, serves the API.

use glassfinder::{app, build_catalog, ensure_database_exists, ensure_tables, seeder_for, validate, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glassfinder=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    validate(&settings)?;

    let pool = match &settings.database_url {
        Some(url) => {
            ensure_database_exists(url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await?;
            ensure_tables(&pool).await?;
            Some(pool)
        }
        None => {
            tracing::info!("DATABASE_URL not set; signup disabled");
            None
        }
    };

    let seeder = seeder_for(&settings, pool.as_ref())?;
    let catalog = build_catalog(seeder.as_ref(), settings.per_page).await?;
    let state = AppState::new(catalog, pool, settings.data_source);

    let listener = TcpListener::bind(settings.listen_addr()).await?;
    tracing::info!(
        data_source = %settings.data_source,
        per_page = settings.per_page,
        "Glassfinder API listening on {}",
        listener.local_addr()?
    );
    axum::serve(listener, app(state)).await?;
    Ok(())
}
