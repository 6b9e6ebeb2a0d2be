//! Binds each record type to its store operations so one set of handlers serves all resources.

use super::int_param;
use crate::error::AppError;
use crate::model::{Director, Genre, Movie, MovieFilter, MoviePatch, NamePatch};
use crate::store::CatalogStore;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

#[async_trait]
pub trait Resource: Serialize + Send + Sync + Sized + 'static {
    /// Singular name used in logs.
    const NAME: &'static str;
    type Patch: DeserializeOwned + Send;

    fn id(&self) -> i64;

    /// List with whatever equality filters the resource understands; other params are ignored.
    async fn list(store: &dyn CatalogStore, params: &HashMap<String, String>) -> Result<Vec<Self>, AppError>;
    async fn get(store: &dyn CatalogStore, id: i64) -> Result<Option<Self>, AppError>;
    async fn create(store: &dyn CatalogStore, patch: Self::Patch) -> Result<Self, AppError>;
    async fn update(store: &dyn CatalogStore, id: i64, patch: Self::Patch) -> Result<Option<Self>, AppError>;
    async fn delete(store: &dyn CatalogStore, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
impl Resource for Movie {
    const NAME: &'static str = "movie";
    type Patch = MoviePatch;

    fn id(&self) -> i64 {
        self.id
    }

    async fn list(store: &dyn CatalogStore, params: &HashMap<String, String>) -> Result<Vec<Self>, AppError> {
        let filter = MovieFilter {
            director_id: int_param(params, "director_id")?,
            genre_id: int_param(params, "genre_id")?,
        };
        store.list_movies(filter).await
    }

    async fn get(store: &dyn CatalogStore, id: i64) -> Result<Option<Self>, AppError> {
        store.get_movie(id).await
    }

    async fn create(store: &dyn CatalogStore, patch: MoviePatch) -> Result<Self, AppError> {
        store.create_movie(patch.into_fields()).await
    }

    async fn update(store: &dyn CatalogStore, id: i64, patch: MoviePatch) -> Result<Option<Self>, AppError> {
        store.update_movie(id, patch).await
    }

    async fn delete(store: &dyn CatalogStore, id: i64) -> Result<bool, AppError> {
        store.delete_movie(id).await
    }
}

#[async_trait]
impl Resource for Director {
    const NAME: &'static str = "director";
    type Patch = NamePatch;

    fn id(&self) -> i64 {
        self.id
    }

    async fn list(store: &dyn CatalogStore, _params: &HashMap<String, String>) -> Result<Vec<Self>, AppError> {
        store.list_directors().await
    }

    async fn get(store: &dyn CatalogStore, id: i64) -> Result<Option<Self>, AppError> {
        store.get_director(id).await
    }

    async fn create(store: &dyn CatalogStore, patch: NamePatch) -> Result<Self, AppError> {
        store.create_director(patch.into_fields()).await
    }

    async fn update(store: &dyn CatalogStore, id: i64, patch: NamePatch) -> Result<Option<Self>, AppError> {
        store.update_director(id, patch).await
    }

    async fn delete(store: &dyn CatalogStore, id: i64) -> Result<bool, AppError> {
        store.delete_director(id).await
    }
}

#[async_trait]
impl Resource for Genre {
    const NAME: &'static str = "genre";
    type Patch = NamePatch;

    fn id(&self) -> i64 {
        self.id
    }

    async fn list(store: &dyn CatalogStore, _params: &HashMap<String, String>) -> Result<Vec<Self>, AppError> {
        store.list_genres().await
    }

    async fn get(store: &dyn CatalogStore, id: i64) -> Result<Option<Self>, AppError> {
        store.get_genre(id).await
    }

    async fn create(store: &dyn CatalogStore, patch: NamePatch) -> Result<Self, AppError> {
        store.create_genre(patch.into_fields()).await
    }

    async fn update(store: &dyn CatalogStore, id: i64, patch: NamePatch) -> Result<Option<Self>, AppError> {
        store.update_genre(id, patch).await
    }

    async fn delete(store: &dyn CatalogStore, id: i64) -> Result<bool, AppError> {
        store.delete_genre(id).await
    }
}
