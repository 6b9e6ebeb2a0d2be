//! Server: reads settings, picks the PostgreSQL store when `DATABASE_URL` is set (in-memory otherwise),
//! creates tables, and serves the catalog routes.

use movie_catalog::{app, apply_migrations, ensure_database_exists, AppState, MemoryStore, PgStore, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_catalog=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    let state = match settings.database_url.as_deref() {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let store = PgStore::connect(database_url, &settings).await?;
            apply_migrations(store.pool()).await?;
            AppState::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store");
            AppState::new(MemoryStore::new())
        }
    };

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, settings.body_limit_bytes)).await?;
    Ok(())
}
