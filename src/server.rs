//! MCP server implementation using rmcp.
//!
//! Exposes the tool catalog over stdio or streamable HTTP. Tool failures of
//! any kind are reported as text results, never as RPC-level errors.

use std::sync::Arc;

use anyhow::Result;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
};

use crate::api;
use crate::tools::ToolRouter;

const INSTRUCTIONS: &str =
    "Malay language processing server backed by a Malaya inference backend. Exposes \
     language detection, text normalization, spelling correction, glossary lookup, \
     style rewriting, Malay/English translation, and term lookup tools.";

/// MCP server that handles protocol requests and delegates to the tool router.
#[derive(Clone)]
pub struct McpServer {
    router: Arc<ToolRouter>,
}

impl McpServer {
    pub fn new(router: Arc<ToolRouter>) -> Self {
        Self { router }
    }

    pub fn tool_router(&self) -> &Arc<ToolRouter> {
        &self.router
    }

    fn capabilities() -> ServerCapabilities {
        ServerCapabilities::builder().enable_tools().build()
    }
}

impl ServerHandler for McpServer {
    fn ping(
        &self,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<(), McpError>> + Send + '_ {
        std::future::ready(Ok(()))
    }

    fn initialize(
        &self,
        _request: InitializeRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<InitializeResult, McpError>> + Send + '_ {
        std::future::ready(Ok(InitializeResult {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: Self::capabilities(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }))
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        // The catalog is small and fixed; no pagination.
        let result = ListToolsResult {
            tools: self.router.list_tools(),
            next_cursor: None,
            ..Default::default()
        };
        std::future::ready(Ok(result))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        let tool_name = request.name.to_string();
        let args = request.arguments.unwrap_or_default();
        let router = self.router.clone();

        async move {
            match router.call_tool(&tool_name, &args).await {
                Ok(result) => Ok(result),
                Err(e) => {
                    // Outer guard: even an unknown tool name comes back as a
                    // text result rather than failing the RPC.
                    tracing::error!("Error executing tool {}: {}", tool_name, e);
                    Ok(CallToolResult {
                        content: vec![Content::text(format!("Error: {}", e))],
                        structured_content: None,
                        is_error: Some(true),
                        meta: None,
                    })
                }
            }
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: Self::capabilities(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Start the MCP Streamable HTTP server alongside the REST endpoints.
///
/// The MCP endpoint is mounted at `/mcp` on the given bind address, with
/// `/`, `/health`, `/tools`, and `/tools/call` served by the REST router.
pub async fn start_http(server: Arc<McpServer>, bind: &str) -> Result<()> {
    let router = server.tool_router().clone();

    let service = StreamableHttpService::new(
        {
            let router = router.clone();
            move || Ok(McpServer::new(router.clone()))
        },
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let app = api::create_router(router).nest_service("/mcp", service);
    let listener = tokio::net::TcpListener::bind(bind).await?;

    tracing::info!("MCP HTTP server listening on http://{}", bind);
    tracing::info!("MCP endpoint available at http://{}/mcp", bind);

    axum::serve(listener, app).await?;

    Ok(())
}
