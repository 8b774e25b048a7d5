//! Schema introspection tool.
//!
//! Implements `get_schema`: describes the tables of a schema (optionally a
//! single table) from the information schema. No raw SQL is accepted here,
//! so unlike the query tools every failure is a real infrastructure or
//! catalog error and propagates as such.

use crate::db::{DbPool, SchemaInspector};
use crate::error::DbResult;
use crate::models::SchemaReport;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

fn default_schema_name() -> String {
    "public".to_string()
}

/// Input for the get_schema tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SchemaInput {
    /// Schema to inspect (default: "public")
    #[serde(default = "default_schema_name")]
    pub schema_name: String,
    /// Restrict the report to one table. An unknown table yields an empty
    /// report, not an error.
    #[serde(default)]
    pub table_name: Option<String>,
}

/// Handler for schema introspection.
pub struct SchemaToolHandler {
    pool: Arc<DbPool>,
}

impl SchemaToolHandler {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Handle a get_schema call.
    pub async fn get_schema(&self, input: SchemaInput) -> DbResult<SchemaReport> {
        let mut conn = self.pool.acquire().await?;

        let report = SchemaInspector::describe(
            &mut conn,
            &input.schema_name,
            input.table_name.as_deref(),
        )
        .await?;

        info!(
            schema = %report.schema,
            table_count = report.table_count,
            "Schema inspected"
        );

        Ok(report)
    }
}
