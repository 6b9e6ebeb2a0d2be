//! Response helpers: rendered records with their success status.

use crate::error::AppError;
use crate::schema::{render, render_many};
use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

pub type JsonResponse = (StatusCode, Json<Value>);

pub fn ok<T: Serialize>(record: &T) -> Result<JsonResponse, AppError> {
    Ok((StatusCode::OK, Json(render(record)?)))
}

pub fn ok_many<T: Serialize>(records: &[T]) -> Result<JsonResponse, AppError> {
    Ok((StatusCode::OK, Json(render_many(records)?)))
}

pub fn created<T: Serialize>(record: &T) -> Result<JsonResponse, AppError> {
    Ok((StatusCode::CREATED, Json(render(record)?)))
}
