//! Typed bind values for the dynamic queries built in `builder`.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::{Query, QueryAs};

/// A nullable value bound to a PostgreSQL placeholder. The variant fixes the parameter type,
/// so a null still binds as the column's type.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Int(Option<i64>),
    Float(Option<f64>),
    Text(Option<String>),
}

impl From<Option<i64>> for PgBindValue {
    fn from(v: Option<i64>) -> Self {
        PgBindValue::Int(v)
    }
}

impl From<Option<f64>> for PgBindValue {
    fn from(v: Option<f64>) -> Self {
        PgBindValue::Float(v)
    }
}

impl From<Option<String>> for PgBindValue {
    fn from(v: Option<String>) -> Self {
        PgBindValue::Text(v)
    }
}

pub fn bind_query<'q>(
    query: Query<'q, Postgres, PgArguments>,
    params: &[PgBindValue],
) -> Query<'q, Postgres, PgArguments> {
    params.iter().fold(query, |q, p| match p {
        PgBindValue::Int(v) => q.bind(*v),
        PgBindValue::Float(v) => q.bind(*v),
        PgBindValue::Text(v) => q.bind(v.clone()),
    })
}

pub fn bind_query_as<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &[PgBindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    params.iter().fold(query, |q, p| match p {
        PgBindValue::Int(v) => q.bind(*v),
        PgBindValue::Float(v) => q.bind(*v),
        PgBindValue::Text(v) => q.bind(v.clone()),
    })
}
