//! Write query tool.
//!
//! Implements `execute_write`: admits INSERT, UPDATE, and DELETE statements,
//! executes them on a pooled connection, and reports the operation verb and
//! affected-row count parsed from the command tag.

use crate::db::{DbPool, QueryCategory, QueryExecutor, Verdict, classify, parse_command_tag};
use crate::error::DbResult;
use crate::models::QueryParam;
use crate::tools::execution_error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Input for the execute_write tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WriteInput {
    /// SQL INSERT, UPDATE, or DELETE statement. DDL is rejected.
    pub query: String,
    /// Positional parameters for $1..$N placeholders
    #[serde(default)]
    pub params: Vec<QueryParam>,
}

/// Output from the execute_write tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WriteOutput {
    /// Whether the statement was admitted and executed without error
    pub success: bool,
    /// Operation verb from the command tag (e.g. "INSERT"), on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    /// Rows affected; 0 on any failure
    pub affected_rows: u64,
    /// Human-readable completion summary, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Rejection reason or execution failure, when success is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WriteOutput {
    fn rejected(reason: String) -> Self {
        Self {
            success: false,
            operation: None,
            affected_rows: 0,
            message: None,
            error: Some(reason),
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            operation: None,
            affected_rows: 0,
            message: None,
            error: Some(message),
        }
    }

    fn completed(operation: String, affected_rows: u64) -> Self {
        let message = format!(
            "{operation} operation completed successfully. {affected_rows} row(s) affected."
        );
        Self {
            success: true,
            operation: Some(operation),
            affected_rows,
            message: Some(message),
            error: None,
        }
    }
}

/// Handler for write statements.
pub struct WriteToolHandler {
    pool: Arc<DbPool>,
}

impl WriteToolHandler {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Handle an execute_write call.
    ///
    /// Statements run in autocommit; there is no transaction surface. The
    /// affected-row count comes from parsing the command tag, never from
    /// re-querying.
    pub async fn execute_write(&self, input: WriteInput) -> DbResult<WriteOutput> {
        if let Verdict::Rejected { reason } = classify(&input.query, QueryCategory::Write) {
            warn!(reason = %reason, "Write statement rejected");
            return Ok(WriteOutput::rejected(reason));
        }

        let mut conn = self.pool.acquire().await?;

        match QueryExecutor::execute(&mut conn, &input.query, &input.params).await {
            Ok(tag) => {
                let (operation, affected_rows) = parse_command_tag(&tag);
                info!(
                    operation = %operation,
                    affected_rows = affected_rows,
                    "Write statement executed"
                );
                Ok(WriteOutput::completed(operation, affected_rows))
            }
            Err(err) if err.is_resource_failure() => Err(err),
            Err(err) => {
                warn!(error = %err, "Write statement failed");
                Ok(WriteOutput::failed(execution_error(&err)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_input_params_default_empty() {
        let input: WriteInput =
            serde_json::from_str(r#"{"query": "DELETE FROM users WHERE id = $1"}"#).unwrap();
        assert!(input.params.is_empty());
    }

    #[test]
    fn test_completed_output_message() {
        let output = WriteOutput::completed("INSERT".to_string(), 3);
        assert!(output.success);
        assert_eq!(output.affected_rows, 3);
        assert_eq!(
            output.message.as_deref(),
            Some("INSERT operation completed successfully. 3 row(s) affected.")
        );
    }

    #[test]
    fn test_rejected_output_reports_zero_rows() {
        let output = WriteOutput::rejected("Query contains forbidden keyword: DROP.".to_string());
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["affected_rows"], 0);
        assert!(json.get("operation").is_none());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_failed_output_carries_error() {
        let output = WriteOutput::failed("duplicate key value violates unique constraint".into());
        assert!(!output.success);
        assert!(output.error.unwrap().contains("duplicate key"));
    }
}
