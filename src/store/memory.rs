//! In-memory backend. Used by tests and when no `DATABASE_URL` is configured.

use super::CatalogStore;
use crate::error::AppError;
use crate::model::{Director, Genre, Movie, MovieFields, MovieFilter, MoviePatch, NameFields, NamePatch};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// One table: rows keyed by id plus the last id handed out. Ids are never reused.
#[derive(Debug)]
struct Rows<F> {
    rows: BTreeMap<i64, F>,
    last_id: i64,
}

impl<F> Default for Rows<F> {
    fn default() -> Self {
        Rows {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<F: Clone> Rows<F> {
    fn list<R>(&self, keep: impl Fn(&F) -> bool, make: fn(i64, F) -> R) -> Vec<R> {
        self.rows
            .iter()
            .filter(|(_, f)| keep(*f))
            .map(|(id, f)| make(*id, f.clone()))
            .collect()
    }

    fn get<R>(&self, id: i64, make: fn(i64, F) -> R) -> Option<R> {
        self.rows.get(&id).cloned().map(|f| make(id, f))
    }

    fn insert<R>(&mut self, fields: F, make: fn(i64, F) -> R) -> R {
        self.last_id += 1;
        self.rows.insert(self.last_id, fields.clone());
        make(self.last_id, fields)
    }

    fn update<R>(&mut self, id: i64, apply: impl FnOnce(&mut F), make: fn(i64, F) -> R) -> Option<R> {
        self.rows.get_mut(&id).map(|f| {
            apply(f);
            make(id, f.clone())
        })
    }

    fn remove(&mut self, id: i64) -> bool {
        self.rows.remove(&id).is_some()
    }
}

#[derive(Debug, Default)]
struct Tables {
    movies: Rows<MovieFields>,
    directors: Rows<NameFields>,
    genres: Rows<NameFields>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn movie(id: i64, fields: MovieFields) -> Movie {
    Movie { id, fields }
}

fn director(id: i64, fields: NameFields) -> Director {
    Director { id, fields }
}

fn genre(id: i64, fields: NameFields) -> Genre {
    Genre { id, fields }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_movies(&self, filter: MovieFilter) -> Result<Vec<Movie>, AppError> {
        Ok(self.tables.read().await.movies.list(|f| filter.matches(f), movie))
    }

    async fn get_movie(&self, id: i64) -> Result<Option<Movie>, AppError> {
        Ok(self.tables.read().await.movies.get(id, movie))
    }

    async fn create_movie(&self, fields: MovieFields) -> Result<Movie, AppError> {
        Ok(self.tables.write().await.movies.insert(fields, movie))
    }

    async fn update_movie(&self, id: i64, patch: MoviePatch) -> Result<Option<Movie>, AppError> {
        Ok(self.tables.write().await.movies.update(id, |f| patch.apply(f), movie))
    }

    async fn delete_movie(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.movies.remove(id))
    }

    async fn list_directors(&self) -> Result<Vec<Director>, AppError> {
        Ok(self.tables.read().await.directors.list(|_| true, director))
    }

    async fn get_director(&self, id: i64) -> Result<Option<Director>, AppError> {
        Ok(self.tables.read().await.directors.get(id, director))
    }

    async fn create_director(&self, fields: NameFields) -> Result<Director, AppError> {
        Ok(self.tables.write().await.directors.insert(fields, director))
    }

    async fn update_director(&self, id: i64, patch: NamePatch) -> Result<Option<Director>, AppError> {
        Ok(self.tables.write().await.directors.update(id, |f| patch.apply(f), director))
    }

    async fn delete_director(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.directors.remove(id))
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, AppError> {
        Ok(self.tables.read().await.genres.list(|_| true, genre))
    }

    async fn get_genre(&self, id: i64) -> Result<Option<Genre>, AppError> {
        Ok(self.tables.read().await.genres.get(id, genre))
    }

    async fn create_genre(&self, fields: NameFields) -> Result<Genre, AppError> {
        Ok(self.tables.write().await.genres.insert(fields, genre))
    }

    async fn update_genre(&self, id: i64, patch: NamePatch) -> Result<Option<Genre>, AppError> {
        Ok(self.tables.write().await.genres.update(id, |f| patch.apply(f), genre))
    }

    async fn delete_genre(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.genres.remove(id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
