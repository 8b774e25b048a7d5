//! Database layer.
//!
//! This module provides the guarded database access core:
//! - Connection pool management
//! - Lexical query classification (the admission gate)
//! - Query execution with positional parameter binding
//! - Row-to-JSON decoding
//! - Schema introspection

pub mod classifier;
pub mod executor;
pub mod pool;
pub mod row;
pub mod schema;

pub use classifier::{QueryCategory, Verdict, classify};
pub use executor::{QueryExecutor, parse_command_tag};
pub use pool::DbPool;
pub use row::RowToJson;
pub use schema::SchemaInspector;
