//! MCP tool handlers.
//!
//! Each tool lives in its own module and shares the classify-acquire-execute
//! shape: the query text is classified before a connection is acquired, so
//! rejected queries never consume pool capacity. Rejections and driver
//! failures come back as `success: false` payloads; only resource failures
//! (pool exhaustion, lost connections) bubble up as protocol errors.

pub mod query;
pub mod schema;
pub mod write;

pub use query::{QueryToolHandler, SelectInput, SelectOutput};
pub use schema::{SchemaInput, SchemaToolHandler};
pub use write::{WriteInput, WriteOutput, WriteToolHandler};

use crate::error::DbError;

/// Render an execution failure for the `error` field of a tool payload.
///
/// Driver errors carry the server's own message verbatim so the caller can
/// see the SQLSTATE detail; other failures fall back to their display form.
pub(crate) fn execution_error(err: &DbError) -> String {
    match err {
        DbError::Database { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
