//! Tool catalog and dispatch for the Malay language server.
//!
//! The set of operations is closed, so the catalog is a fixed enum with an
//! exhaustive match at the dispatch boundary; every declared tool is
//! guaranteed to have a handler at compile time. Each variant has a module
//! with its input schema and execution logic.

mod apply_glossary;
mod correct_spelling;
mod detect_language;
mod normalize_malay;
mod rewrite_style;
mod term_lookup;
mod translate;

use std::sync::Arc;

use anyhow::{Result, anyhow};
use rmcp::model::{CallToolResult, Content, JsonObject, Tool as McpTool};
use serde_json::json;

use crate::models::ModelCache;

/// The fixed set of operations this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    DetectLanguage,
    NormalizeMalay,
    CorrectSpelling,
    ApplyGlossary,
    RewriteStyle,
    Translate,
    TermLookup,
}

impl ToolKind {
    /// Catalog order. `list_tools` returns tools in exactly this order.
    pub const ALL: [ToolKind; 7] = [
        ToolKind::DetectLanguage,
        ToolKind::NormalizeMalay,
        ToolKind::CorrectSpelling,
        ToolKind::ApplyGlossary,
        ToolKind::RewriteStyle,
        ToolKind::Translate,
        ToolKind::TermLookup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::DetectLanguage => "detect_language",
            ToolKind::NormalizeMalay => "normalize_malay",
            ToolKind::CorrectSpelling => "correct_spelling",
            ToolKind::ApplyGlossary => "apply_glossary",
            ToolKind::RewriteStyle => "rewrite_style",
            ToolKind::Translate => "translate",
            ToolKind::TermLookup => "term_lookup",
        }
    }

    pub fn from_name(name: &str) -> Option<ToolKind> {
        match name {
            "detect_language" => Some(ToolKind::DetectLanguage),
            "normalize_malay" => Some(ToolKind::NormalizeMalay),
            "correct_spelling" => Some(ToolKind::CorrectSpelling),
            "apply_glossary" => Some(ToolKind::ApplyGlossary),
            "rewrite_style" => Some(ToolKind::RewriteStyle),
            "translate" => Some(ToolKind::Translate),
            "term_lookup" => Some(ToolKind::TermLookup),
            _ => None,
        }
    }

    fn descriptor(self) -> McpTool {
        match self {
            ToolKind::DetectLanguage => detect_language::descriptor(),
            ToolKind::NormalizeMalay => normalize_malay::descriptor(),
            ToolKind::CorrectSpelling => correct_spelling::descriptor(),
            ToolKind::ApplyGlossary => apply_glossary::descriptor(),
            ToolKind::RewriteStyle => rewrite_style::descriptor(),
            ToolKind::Translate => translate::descriptor(),
            ToolKind::TermLookup => term_lookup::descriptor(),
        }
    }
}

/// Dispatches tool calls to their handlers.
///
/// Handlers never fail the RPC: validation and model errors all come back
/// as text results. The only error this returns is an unknown tool name.
pub struct ToolRouter {
    models: Arc<ModelCache>,
}

impl ToolRouter {
    pub fn new(models: Arc<ModelCache>) -> Self {
        Self { models }
    }

    /// The full catalog, order-stable.
    pub fn list_tools(&self) -> Vec<McpTool> {
        ToolKind::ALL.iter().map(|kind| kind.descriptor()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        ToolKind::from_name(name).is_some()
    }

    /// Execute a tool by name with the given arguments.
    pub async fn call_tool(&self, name: &str, args: &JsonObject) -> Result<CallToolResult> {
        let kind = ToolKind::from_name(name).ok_or_else(|| anyhow!("Unknown tool: {}", name))?;
        let result = match kind {
            ToolKind::DetectLanguage => detect_language::execute(args, &self.models).await,
            ToolKind::NormalizeMalay => normalize_malay::execute(args, &self.models).await,
            ToolKind::CorrectSpelling => correct_spelling::execute(args, &self.models).await,
            ToolKind::ApplyGlossary => apply_glossary::execute(args, &self.models).await,
            ToolKind::RewriteStyle => rewrite_style::execute(args, &self.models).await,
            ToolKind::Translate => translate::execute(args, &self.models).await,
            ToolKind::TermLookup => term_lookup::execute(args, &self.models).await,
        };
        Ok(result)
    }
}

/// Build a single-text success result.
pub(crate) fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(text.into())],
        structured_content: None,
        is_error: Some(false),
        meta: None,
    }
}

/// Build a single-text error result. Errors are reported to the caller as
/// content, never as an RPC failure.
pub(crate) fn error_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(text.into())],
        structured_content: None,
        is_error: Some(true),
        meta: None,
    }
}

/// Read a string argument, treating a missing or non-string value as empty.
pub(crate) fn string_arg<'a>(args: &'a JsonObject, key: &str) -> &'a str {
    args.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

/// Read an optional string argument with a default.
pub(crate) fn string_arg_or<'a>(args: &'a JsonObject, key: &str, default: &'a str) -> &'a str {
    args.get(key).and_then(|v| v.as_str()).unwrap_or(default)
}

/// Build a JSON-Schema object descriptor from properties and required keys.
pub(crate) fn schema_object(
    properties: serde_json::Map<String, serde_json::Value>,
    required: &[&str],
) -> JsonObject {
    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), json!(properties));
    schema.insert("required".to_string(), json!(required));
    schema
}
