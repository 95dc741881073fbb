//! Handler for the `normalize_malay` tool.

use std::borrow::Cow;
use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde_json::json;

use super::{error_result, schema_object, string_arg, text_result};
use crate::models::ModelCache;

pub(crate) fn descriptor() -> Tool {
    let mut properties = serde_json::Map::new();
    properties.insert(
        "text".to_string(),
        json!({
            "type": "string",
            "description": "The Malay text to normalize",
        }),
    );

    Tool {
        name: Cow::Borrowed("normalize_malay"),
        title: None,
        description: Some(Cow::Borrowed(
            "Normalize Malay text by fixing common informal writing patterns, abbreviations, \
             and colloquialisms to standard Malay.",
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

    let outcome = async {
        let normalizer = models.normalizer().await?;
        normalizer.transform(text).await
    }
    .await;

    match outcome {
        Ok(normalized) => text_result(format!(
            "Text Normalization Result:\n\nOriginal: {}\n\nNormalized: {}",
            text, normalized
        )),
        Err(e) => {
            tracing::error!("Normalization error: {}", e);
            error_result(format!("Error normalizing text: {}", e))
        }
    }
}
