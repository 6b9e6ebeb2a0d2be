//! Wire representation: render records to JSON and parse request bodies into patches.
//!
//! Patch fields are `Option<Option<T>>`: the outer option is "was the key present",
//! the inner one is "was it null". Numeric fields coerce from numbers and numeric strings.

use crate::error::AppError;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub fn render<T: Serialize>(record: &T) -> Result<Value, AppError> {
    Ok(serde_json::to_value(record)?)
}

pub fn render_many<T: Serialize>(records: &[T]) -> Result<Value, AppError> {
    Ok(serde_json::to_value(records)?)
}

/// Parse a request body into a patch. The body must be a JSON object; `id` and unknown keys are ignored.
pub fn parse<P: DeserializeOwned>(body: Value) -> Result<P, AppError> {
    if !body.is_object() {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    }
    serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))
}

fn coerce_int(v: &Value) -> Result<Option<i64>, String> {
    match v {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(i));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(Some(f as i64))
                }
                _ => Err(format!("not a valid integer: {}", n)),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("not a valid integer: '{}'", s)),
        other => Err(format!("not a valid integer: {}", other)),
    }
}

fn coerce_float(v: &Value) -> Result<Option<f64>, String> {
    match v {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| format!("not a valid number: {}", n)),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Some(f)),
            _ => Err(format!("not a valid number: '{}'", s)),
        },
        other => Err(format!("not a valid number: {}", other)),
    }
}

fn coerce_string(v: &Value) -> Result<Option<String>, String> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(format!("not a valid string: {}", other)),
    }
}

pub fn int_field<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    coerce_int(&v).map(Some).map_err(serde::de::Error::custom)
}

pub fn float_field<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    coerce_float(&v).map(Some).map_err(serde::de::Error::custom)
}

pub fn string_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    coerce_string(&v).map(Some).map_err(serde::de::Error::custom)
}
