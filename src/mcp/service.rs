//! MCP service implementation using rmcp.
//!
//! Exposes the three database tools (get_schema, execute_select,
//! execute_write) over the MCP protocol via the rmcp framework's macros.

use crate::db::DbPool;
use crate::models::SchemaReport;
use crate::tools::query::{QueryToolHandler, SelectInput, SelectOutput};
use crate::tools::schema::{SchemaInput, SchemaToolHandler};
use crate::tools::write::{WriteInput, WriteOutput, WriteToolHandler};
use rmcp::Json;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AgentsDbService {
    /// Shared connection pool for all database operations
    pool: Arc<DbPool>,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl AgentsDbService {
    /// Create a new service over an established pool.
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            pool,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl AgentsDbService {
    #[tool(
        description = "Get PostgreSQL schema information: table names, column names, data types, and constraints.\nDefaults to the \"public\" schema; pass table_name to describe a single table."
    )]
    async fn get_schema(
        &self,
        Parameters(input): Parameters<SchemaInput>,
    ) -> Result<Json<SchemaReport>, McpError> {
        let handler = SchemaToolHandler::new(self.pool.clone());
        handler.get_schema(input).await.map(Json).map_err(Into::into)
    }

    #[tool(
        description = "Execute a SELECT query and return its rows.\nOnly pure SELECT statements are admitted; anything else is rejected with success: false.\nSupports positional parameters via $1, $2, ... placeholders."
    )]
    async fn execute_select(
        &self,
        Parameters(input): Parameters<SelectInput>,
    ) -> Result<Json<SelectOutput>, McpError> {
        let handler = QueryToolHandler::new(self.pool.clone());
        handler
            .execute_select(input)
            .await
            .map(Json)
            .map_err(Into::into)
    }

    #[tool(
        description = "Execute an INSERT, UPDATE, or DELETE statement and return the affected-row count.\nDDL (DROP, TRUNCATE, ALTER, CREATE, GRANT, REVOKE) is rejected with success: false.\nSupports positional parameters via $1, $2, ... placeholders."
    )]
    async fn execute_write(
        &self,
        Parameters(input): Parameters<WriteInput>,
    ) -> Result<Json<WriteOutput>, McpError> {
        let handler = WriteToolHandler::new(self.pool.clone());
        handler
            .execute_write(input)
            .await
            .map(Json)
            .map_err(Into::into)
    }
}

#[tool_handler]
impl ServerHandler for AgentsDbService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "agents-db-server".to_owned(),
                title: Some("Agents DB Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Guarded PostgreSQL access for AI agents.\n\
                \n\
                ## Tools\n\
                - `get_schema`: inspect tables, columns, types, and constraints\n\
                - `execute_select`: run SELECT queries (pure reads only)\n\
                - `execute_write`: run INSERT, UPDATE, or DELETE statements\n\
                \n\
                ## Rules\n\
                - Reads and writes are separate tools; a SELECT sent to execute_write\n\
                  (or vice versa) comes back with success: false and a reason\n\
                - DDL is blocked on both paths: DROP, TRUNCATE, ALTER, CREATE, GRANT, REVOKE\n\
                - Use positional parameters ($1, $2, ...) instead of interpolating values\n\
                - Start with get_schema to learn the table layout before querying"
                    .to_string(),
            ),
        }
    }
}
