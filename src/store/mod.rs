//! Persistence trait for the catalog. Handlers work only through `CatalogStore`,
//! so the PostgreSQL backend and the in-memory backend are interchangeable.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{Director, Genre, Movie, MovieFields, MovieFilter, MoviePatch, NameFields, NamePatch};
use async_trait::async_trait;

/// Lookups return `Ok(None)` for missing ids; updates on a missing id change nothing and return `Ok(None)`.
/// Lists are ordered by id.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // ── Movies ──

    async fn list_movies(&self, filter: MovieFilter) -> Result<Vec<Movie>, AppError>;
    async fn get_movie(&self, id: i64) -> Result<Option<Movie>, AppError>;
    async fn create_movie(&self, fields: MovieFields) -> Result<Movie, AppError>;
    async fn update_movie(&self, id: i64, patch: MoviePatch) -> Result<Option<Movie>, AppError>;
    /// Returns whether a row was removed.
    async fn delete_movie(&self, id: i64) -> Result<bool, AppError>;

    // ── Directors ──

    async fn list_directors(&self) -> Result<Vec<Director>, AppError>;
    async fn get_director(&self, id: i64) -> Result<Option<Director>, AppError>;
    async fn create_director(&self, fields: NameFields) -> Result<Director, AppError>;
    async fn update_director(&self, id: i64, patch: NamePatch) -> Result<Option<Director>, AppError>;
    async fn delete_director(&self, id: i64) -> Result<bool, AppError>;

    // ── Genres ──

    async fn list_genres(&self) -> Result<Vec<Genre>, AppError>;
    async fn get_genre(&self, id: i64) -> Result<Option<Genre>, AppError>;
    async fn create_genre(&self, fields: NameFields) -> Result<Genre, AppError>;
    async fn update_genre(&self, id: i64, patch: NamePatch) -> Result<Option<Genre>, AppError>;
    async fn delete_genre(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap round trip used by the readiness check.
    async fn ping(&self) -> Result<(), AppError>;
}
