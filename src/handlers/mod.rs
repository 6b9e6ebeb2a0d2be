//! HTTP handlers: one generic CRUD set, bound to movies, directors and genres through `Resource`.

pub mod entity;
pub mod resource;

pub use resource::Resource;

use crate::error::AppError;
use std::collections::HashMap;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// Integer equality filter from the query string. Absent or empty means no filter.
fn int_param(params: &HashMap<String, String>, key: &str) -> Result<Option<i64>, AppError> {
    match params.get(key).map(|s| s.trim()).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{} must be an integer, got '{}'", key, s))),
    }
}
