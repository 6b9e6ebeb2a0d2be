//! Create the catalog tables. Idempotent: safe to run on every startup.
//!
//! `movie.director_id` and `movie.genre_id` point at `director.id` and `genre.id` but carry no
//! constraint, so a movie may reference a director or genre that does not exist (yet).

use crate::error::AppError;
use sqlx::PgPool;

const DDL: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS "director" (
  "id" BIGSERIAL PRIMARY KEY,
  "name" TEXT
)"#,
    r#"CREATE TABLE IF NOT EXISTS "genre" (
  "id" BIGSERIAL PRIMARY KEY,
  "name" TEXT
)"#,
    r#"CREATE TABLE IF NOT EXISTS "movie" (
  "id" BIGSERIAL PRIMARY KEY,
  "title" TEXT,
  "description" TEXT,
  "trailer" TEXT,
  "year" BIGINT,
  "rating" DOUBLE PRECISION,
  "genre_id" BIGINT,
  "director_id" BIGINT
)"#,
    r#"CREATE INDEX IF NOT EXISTS "movie_director_id_idx" ON "movie" ("director_id")"#,
    r#"CREATE INDEX IF NOT EXISTS "movie_genre_id_idx" ON "movie" ("genre_id")"#,
];

pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for sql in DDL {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!("catalog tables ready");
    Ok(())
}
