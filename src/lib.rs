//! Agents DB Server Library
//!
//! This library provides MCP (Model Context Protocol) tools that expose a
//! PostgreSQL database to AI agents through three guarded operations:
//! schema introspection, read-only queries, and write queries.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::DbError;
pub use mcp::AgentsDbService;
