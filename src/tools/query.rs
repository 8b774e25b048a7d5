//! Read query tool.
//!
//! Implements `execute_select`: classifies the text as a pure SELECT, then
//! runs it on a pooled connection and decodes the rows to JSON.

use crate::db::{DbPool, QueryCategory, QueryExecutor, RowToJson, Verdict, classify};
use crate::error::DbResult;
use crate::models::QueryParam;
use crate::tools::execution_error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{info, warn};

/// Input for the execute_select tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SelectInput {
    /// SQL SELECT statement. Any other statement kind is rejected.
    pub query: String,
    /// Positional parameters for $1..$N placeholders
    #[serde(default)]
    pub params: Vec<QueryParam>,
}

/// Output from the execute_select tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SelectOutput {
    /// Whether the query was admitted and executed without error
    pub success: bool,
    /// Result rows as key-value maps, in result-set order
    pub rows: Vec<serde_json::Map<String, JsonValue>>,
    /// Number of rows returned
    pub row_count: usize,
    /// Column names, in result-set order. Empty when no rows came back.
    pub columns: Vec<String>,
    /// Rejection reason or execution failure, when success is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SelectOutput {
    fn rejected(reason: String) -> Self {
        Self {
            success: false,
            rows: Vec::new(),
            row_count: 0,
            columns: Vec::new(),
            error: Some(reason),
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            rows: Vec::new(),
            row_count: 0,
            columns: Vec::new(),
            error: Some(message),
        }
    }

    fn from_rows(rows: &[sqlx::postgres::PgRow]) -> Self {
        let columns = rows
            .first()
            .map(|row| row.column_names())
            .unwrap_or_default();
        let json_rows: Vec<_> = rows.iter().map(|row| row.to_json_map()).collect();
        let row_count = json_rows.len();

        Self {
            success: true,
            rows: json_rows,
            row_count,
            columns,
            error: None,
        }
    }
}

/// Handler for read queries.
pub struct QueryToolHandler {
    pool: Arc<DbPool>,
}

impl QueryToolHandler {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Handle an execute_select call.
    ///
    /// Classification happens before acquisition, so a rejected query never
    /// touches a connection. Resource failures propagate; everything else
    /// is folded into the output payload.
    pub async fn execute_select(&self, input: SelectInput) -> DbResult<SelectOutput> {
        if let Verdict::Rejected { reason } = classify(&input.query, QueryCategory::Read) {
            warn!(reason = %reason, "Read query rejected");
            return Ok(SelectOutput::rejected(reason));
        }

        let mut conn = self.pool.acquire().await?;

        match QueryExecutor::fetch_rows(&mut conn, &input.query, &input.params).await {
            Ok(rows) => {
                let output = SelectOutput::from_rows(&rows);
                info!(row_count = output.row_count, "Read query executed");
                Ok(output)
            }
            Err(err) if err.is_resource_failure() => Err(err),
            Err(err) => {
                warn!(error = %err, "Read query failed");
                Ok(SelectOutput::failed(execution_error(&err)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_input_params_default_empty() {
        let input: SelectInput = serde_json::from_str(r#"{"query": "SELECT 1"}"#).unwrap();
        assert_eq!(input.query, "SELECT 1");
        assert!(input.params.is_empty());
    }

    #[test]
    fn test_select_input_with_params() {
        let input: SelectInput = serde_json::from_str(
            r#"{"query": "SELECT * FROM users WHERE id = $1", "params": [42]}"#,
        )
        .unwrap();
        assert_eq!(input.params.len(), 1);
        assert!(matches!(input.params[0], QueryParam::Int(42)));
    }

    #[test]
    fn test_rejected_output_shape() {
        let output = SelectOutput::rejected("Only SELECT queries are allowed.".to_string());
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["row_count"], 0);
        assert!(json["error"].as_str().unwrap().contains("Only SELECT"));
    }

    #[test]
    fn test_success_output_omits_error_field() {
        let output = SelectOutput {
            success: true,
            rows: Vec::new(),
            row_count: 0,
            columns: Vec::new(),
            error: None,
        };
        let json = serde_json::to_string(&output).unwrap();
        assert!(!json.contains("\"error\""));
    }
}
