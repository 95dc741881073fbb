// Core modules
mod api;
mod config;
mod models;
mod server;
mod tools;
mod types;

// Re-export key types and functions
pub use config::BindConfig;
pub use models::{
    Detection, HttpModelProvider, LanguageDetector, ModelCache, ModelHandle, ModelProvider,
    ProviderConfig, TextTransformer,
};
pub use server::{McpServer, start_http};
pub use tools::{ToolKind, ToolRouter};
pub use types::{LangCode, ModelKey, RewriteStyle};

use std::sync::Arc;

/// Convenience function to create a fully configured MCP server.
///
/// Wraps the provider in a fresh model cache, builds the tool router, and
/// returns a `McpServer` that implements rmcp's `ServerHandler`.
pub fn create_server(provider: Arc<dyn ModelProvider>) -> Arc<McpServer> {
    let models = Arc::new(ModelCache::new(provider));
    let router = Arc::new(ToolRouter::new(models));
    Arc::new(McpServer::new(router))
}
