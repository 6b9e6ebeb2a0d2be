//! PostgreSQL backend: CRUD execution over a `PgPool` using the safe SQL builder.

use super::CatalogStore;
use crate::config::Settings;
use crate::error::{AppError, ConfigError};
use crate::model::{
    Director, Genre, Movie, MovieFields, MovieFilter, MoviePatch, NameFields, NamePatch, DIRECTOR_TABLE,
    GENRE_TABLE, MOVIE_TABLE,
};
use crate::sql::{self, bind_query, bind_query_as, PgBindValue, QueryBuf, Table};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{ConnectOptions, FromRow};
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect a pool sized from settings.
    pub async fn connect(database_url: &str, settings: &Settings) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(database_url)
            .await?;
        Ok(PgStore { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_all<O>(&self, q: QueryBuf) -> Result<Vec<O>, AppError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_query_as(sqlx::query_as::<_, O>(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_optional<O>(&self, q: QueryBuf) -> Result<Option<O>, AppError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_query_as(sqlx::query_as::<_, O>(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn fetch_one<O>(&self, q: QueryBuf) -> Result<O, AppError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_query_as(sqlx::query_as::<_, O>(&q.sql), &q.params)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_row(&self, table: &Table, id: i64) -> Result<bool, AppError> {
        let q = sql::delete(table, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let done = bind_query(sqlx::query(&q.sql), &q.params)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}

fn movie_values(fields: MovieFields) -> Vec<(&'static str, PgBindValue)> {
    vec![
        ("title", fields.title.into()),
        ("description", fields.description.into()),
        ("trailer", fields.trailer.into()),
        ("year", fields.year.into()),
        ("rating", fields.rating.into()),
        ("genre_id", fields.genre_id.into()),
        ("director_id", fields.director_id.into()),
    ]
}

fn movie_patch_values(patch: MoviePatch) -> Vec<(&'static str, PgBindValue)> {
    let mut out: Vec<(&'static str, PgBindValue)> = Vec::new();
    if let Some(v) = patch.title {
        out.push(("title", v.into()));
    }
    if let Some(v) = patch.description {
        out.push(("description", v.into()));
    }
    if let Some(v) = patch.trailer {
        out.push(("trailer", v.into()));
    }
    if let Some(v) = patch.year {
        out.push(("year", v.into()));
    }
    if let Some(v) = patch.rating {
        out.push(("rating", v.into()));
    }
    if let Some(v) = patch.genre_id {
        out.push(("genre_id", v.into()));
    }
    if let Some(v) = patch.director_id {
        out.push(("director_id", v.into()));
    }
    out
}

fn name_values(fields: NameFields) -> Vec<(&'static str, PgBindValue)> {
    vec![("name", fields.name.into())]
}

fn name_patch_values(patch: NamePatch) -> Vec<(&'static str, PgBindValue)> {
    patch.name.map(|v| ("name", PgBindValue::from(v))).into_iter().collect()
}

fn movie_filters(filter: MovieFilter) -> Vec<(&'static str, PgBindValue)> {
    let mut out = Vec::new();
    if let Some(id) = filter.director_id {
        out.push(("director_id", PgBindValue::Int(Some(id))));
    }
    if let Some(id) = filter.genre_id {
        out.push(("genre_id", PgBindValue::Int(Some(id))));
    }
    out
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn list_movies(&self, filter: MovieFilter) -> Result<Vec<Movie>, AppError> {
        self.fetch_all(sql::select_list(&MOVIE_TABLE, &movie_filters(filter))).await
    }

    async fn get_movie(&self, id: i64) -> Result<Option<Movie>, AppError> {
        self.fetch_optional(sql::select_by_id(&MOVIE_TABLE, id)).await
    }

    async fn create_movie(&self, fields: MovieFields) -> Result<Movie, AppError> {
        self.fetch_one(sql::insert(&MOVIE_TABLE, &movie_values(fields))).await
    }

    async fn update_movie(&self, id: i64, patch: MoviePatch) -> Result<Option<Movie>, AppError> {
        self.fetch_optional(sql::update(&MOVIE_TABLE, id, &movie_patch_values(patch))).await
    }

    async fn delete_movie(&self, id: i64) -> Result<bool, AppError> {
        self.delete_row(&MOVIE_TABLE, id).await
    }

    async fn list_directors(&self) -> Result<Vec<Director>, AppError> {
        self.fetch_all(sql::select_list(&DIRECTOR_TABLE, &[])).await
    }

    async fn get_director(&self, id: i64) -> Result<Option<Director>, AppError> {
        self.fetch_optional(sql::select_by_id(&DIRECTOR_TABLE, id)).await
    }

    async fn create_director(&self, fields: NameFields) -> Result<Director, AppError> {
        self.fetch_one(sql::insert(&DIRECTOR_TABLE, &name_values(fields))).await
    }

    async fn update_director(&self, id: i64, patch: NamePatch) -> Result<Option<Director>, AppError> {
        self.fetch_optional(sql::update(&DIRECTOR_TABLE, id, &name_patch_values(patch))).await
    }

    async fn delete_director(&self, id: i64) -> Result<bool, AppError> {
        self.delete_row(&DIRECTOR_TABLE, id).await
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, AppError> {
        self.fetch_all(sql::select_list(&GENRE_TABLE, &[])).await
    }

    async fn get_genre(&self, id: i64) -> Result<Option<Genre>, AppError> {
        self.fetch_optional(sql::select_by_id(&GENRE_TABLE, id)).await
    }

    async fn create_genre(&self, fields: NameFields) -> Result<Genre, AppError> {
        self.fetch_one(sql::insert(&GENRE_TABLE, &name_values(fields))).await
    }

    async fn update_genre(&self, id: i64, patch: NamePatch) -> Result<Option<Genre>, AppError> {
        self.fetch_optional(sql::update(&GENRE_TABLE, id, &name_patch_values(patch))).await
    }

    async fn delete_genre(&self, id: i64) -> Result<bool, AppError> {
        self.delete_row(&GENRE_TABLE, id).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Create the target database if it does not exist, connecting through the `postgres` admin database.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| ConfigError::DatabaseUrl("no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}
