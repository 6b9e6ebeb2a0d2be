//! Movie catalog: REST resources for movies, directors and genres over a pluggable store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod schema;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Director, Genre, Movie, MovieFields, MovieFilter, MoviePatch, NameFields, NamePatch};
pub use routes::{app, catalog_routes, common_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, CatalogStore, MemoryStore, PgStore};
