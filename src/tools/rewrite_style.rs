//! Handler for the `rewrite_style` tool.

use std::borrow::Cow;
use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde_json::json;

use super::{error_result, schema_object, string_arg, string_arg_or, text_result};
use crate::models::ModelCache;
use crate::types::RewriteStyle;

pub(crate) fn descriptor() -> Tool {
    let styles: Vec<&str> = RewriteStyle::ALL.iter().map(|s| s.as_str()).collect();

    let mut properties = serde_json::Map::new();
    properties.insert(
        "text".to_string(),
        json!({
            "type": "string",
            "description": "The Malay text to rewrite",
        }),
    );
    properties.insert(
        "style".to_string(),
        json!({
            "type": "string",
            "description": "Target style (e.g., 'formal', 'casual', 'simplified')",
            "enum": styles,
            "default": "formal",
        }),
    );

    Tool {
        name: Cow::Borrowed("rewrite_style"),
        title: None,
        description: Some(Cow::Borrowed(
            "Rewrite Malay text in a different style while preserving meaning. Uses \
             paraphrasing to generate alternative expressions.",
        )),
        input_schema: Arc::new(schema_object(properties, &["text"])),
        output_schema: None,
        annotations: None,
        icons: None,
        meta: None,
    }
}

pub(crate) async fn execute(args: &JsonObject, models: &ModelCache) -> CallToolResult {
    let text = string_arg(args, "text");
    if text.trim().is_empty() {
        return error_result("Error: Empty or whitespace-only text provided");
    }
    // The style is echoed in the response but not passed to the model.
    let style = RewriteStyle::parse_or_default(string_arg_or(args, "style", "formal"));

    let outcome = async {
        let paraphraser = models.paraphraser().await?;
        paraphraser.transform(text).await
    }
    .await;

    match outcome {
        Ok(paraphrased) => text_result(format!(
            "Style Rewrite Result (Target: {}):\n\nOriginal: {}\n\nRewritten: {}\n\n\
             Note: The paraphrase model generates alternative expressions. For specific \
             style transformations (formal/casual), consider fine-tuning or prompt \
             engineering.",
            style, text, paraphrased
        )),
        Err(e) => {
            tracing::error!("Style rewrite error: {}", e);
            error_result(format!("Error rewriting text: {}", e))
        }
    }
}
