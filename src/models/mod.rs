//! Data models shared across the database layer and the MCP tools.

pub mod query;
pub mod schema;

pub use query::QueryParam;
pub use schema::{ColumnDescriptor, SchemaReport, TableReport};
