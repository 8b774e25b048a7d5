//! Query execution engine.
//!
//! Runs already-classified SQL against a single pooled connection, binding
//! positional parameters with PostgreSQL `$1..$N` placeholders. Reads return
//! raw rows for the caller to decode; writes return a synthesized textual
//! command tag in the PostgreSQL wire form (`INSERT 0 3`, `UPDATE 7`) so the
//! tool layer can report both the operation and the affected-row count.

use crate::error::{DbError, DbResult};
use crate::models::QueryParam;
use sqlx::PgConnection;
use sqlx::postgres::{PgArguments, PgRow};
use tracing::debug;

/// Executes admitted queries on a borrowed pooled connection.
///
/// The executor holds no state of its own; each call receives the connection
/// the caller acquired, so acquisition order and release are visible in the
/// tool handler.
pub struct QueryExecutor;

impl QueryExecutor {
    /// Execute a SELECT and return the raw rows.
    pub async fn fetch_rows(
        conn: &mut PgConnection,
        sql: &str,
        params: &[QueryParam],
    ) -> DbResult<Vec<PgRow>> {
        debug!(sql = %sql, params = params.len(), "Executing read query");

        // When params is empty, run the text unprepared; some statements do
        // not survive the prepared path.
        let rows = if params.is_empty() {
            use sqlx::Executor;
            conn.fetch_all(sql).await.map_err(DbError::from)?
        } else {
            let mut query = sqlx::query(sql);
            for param in params {
                query = bind_param(query, param);
            }
            query.fetch_all(conn).await.map_err(DbError::from)?
        };

        Ok(rows)
    }

    /// Execute a write statement and return its command tag.
    pub async fn execute(
        conn: &mut PgConnection,
        sql: &str,
        params: &[QueryParam],
    ) -> DbResult<String> {
        debug!(sql = %sql, params = params.len(), "Executing write statement");

        let result = if params.is_empty() {
            use sqlx::Executor;
            conn.execute(sql).await.map_err(DbError::from)?
        } else {
            let mut query = sqlx::query(sql);
            for param in params {
                query = bind_param(query, param);
            }
            query.execute(conn).await.map_err(DbError::from)?
        };

        Ok(command_tag(sql, result.rows_affected()))
    }
}

fn bind_param<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    param: &'q QueryParam,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match param {
        QueryParam::Null => query.bind(None::<String>),
        QueryParam::Bool(v) => query.bind(*v),
        QueryParam::Int(v) => query.bind(*v),
        QueryParam::Float(v) => query.bind(*v),
        QueryParam::String(v) => query.bind(v.as_str()),
    }
}

/// Build the PostgreSQL-style command tag for a completed statement.
///
/// INSERT tags carry a legacy OID field that is always 0 on modern servers,
/// so the tag is `INSERT 0 {rows}`; other verbs are `{VERB} {rows}`.
fn command_tag(sql: &str, rows_affected: u64) -> String {
    let verb = sql
        .split_whitespace()
        .next()
        .map(str::to_uppercase)
        .unwrap_or_else(|| "UNKNOWN".to_string());

    if verb == "INSERT" {
        format!("INSERT 0 {rows_affected}")
    } else {
        format!("{verb} {rows_affected}")
    }
}

/// Parse a command tag into its operation name and affected-row count.
///
/// The operation is the first whitespace-separated token; the count is the
/// last token if it parses as an integer, otherwise 0. Single-token tags
/// (e.g. a bare `COMMIT`) report 0 affected rows.
pub fn parse_command_tag(tag: &str) -> (String, u64) {
    let parts: Vec<&str> = tag.split_whitespace().collect();

    let operation = parts
        .first()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    let affected = if parts.len() >= 2 {
        parts
            .last()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0)
    } else {
        0
    };

    (operation, affected)
}
