//! Entity CRUD handlers, generic over the resource: list, create, read, update, delete.

use super::parse_id;
use super::resource::Resource;
use crate::error::AppError;
use crate::response::{self, JsonResponse};
use crate::schema;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<JsonResponse, AppError> {
    let rows = R::list(state.store.as_ref(), &params).await?;
    response::ok_many(&rows)
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<JsonResponse, AppError> {
    let Json(body) = body?;
    let patch: R::Patch = schema::parse(body)?;
    let row = R::create(state.store.as_ref(), patch).await?;
    tracing::info!(resource = R::NAME, id = row.id(), "created");
    response::created(&row)
}

pub async fn read<R: Resource>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<JsonResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = R::get(state.store.as_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    response::ok(&row)
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<JsonResponse, AppError> {
    let id = parse_id(&id_str)?;
    let Json(body) = body?;
    let patch: R::Patch = schema::parse(body)?;
    let row = R::update(state.store.as_ref(), id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    response::ok(&row)
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    if !R::delete(state.store.as_ref(), id).await? {
        tracing::debug!(resource = R::NAME, id, "delete of absent record");
    }
    Ok(StatusCode::NO_CONTENT)
}
