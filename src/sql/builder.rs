//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for a fixed table layout.

use super::params::PgBindValue;

/// Static table layout: name plus non-key columns. Every table has an integer `id` primary key.
#[derive(Clone, Copy, Debug)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const PK: &str = "id";

/// Quote identifier for PostgreSQL (safe: only from code).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn select_column_list(table: &Table) -> String {
    std::iter::once(PK)
        .chain(table.columns.iter().copied())
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT by primary key. Id is the sole param.
pub fn select_by_id(table: &Table, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::Int(Some(id)));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(table),
        quoted(table.name),
        quoted(PK),
        n
    );
    q
}

/// SELECT list with exact-match filters joined by AND, ORDER BY pk. Params bound in filter order.
pub fn select_list(table: &Table, filters: &[(&str, PgBindValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for (col, val) in filters {
        if !table.columns.contains(col) {
            continue;
        }
        let n = q.push_param(val.clone());
        where_parts.push(format!("{} = ${}", quoted(col), n));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        select_column_list(table),
        quoted(table.name),
        where_clause,
        quoted(PK)
    );
    q
}

/// INSERT every non-key column; the database assigns the id.
pub fn insert(table: &Table, values: &[(&str, PgBindValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (col, val) in values {
        if !table.columns.contains(col) {
            continue;
        }
        let n = q.push_param(val.clone());
        cols.push(quoted(col));
        placeholders.push(format!("${}", n));
    }
    let returning = select_column_list(table);
    q.sql = if cols.is_empty() {
        format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING {}",
            quoted(table.name),
            returning
        )
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(table.name),
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE by id: SET only the supplied columns. With nothing to set, falls back to a SELECT by id
/// so the caller still learns whether the row exists.
pub fn update(table: &Table, id: i64, values: &[(&str, PgBindValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (col, val) in values {
        if !table.columns.contains(col) {
            continue;
        }
        let n = q.push_param(val.clone());
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    if sets.is_empty() {
        return select_by_id(table, id);
    }
    let id_param = q.push_param(PgBindValue::Int(Some(id)));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(table.name),
        sets.join(", "),
        quoted(PK),
        id_param,
        select_column_list(table)
    );
    q
}

/// DELETE by id.
pub fn delete(table: &Table, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::Int(Some(id)));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        quoted(table.name),
        quoted(PK),
        n
    );
    q
}
