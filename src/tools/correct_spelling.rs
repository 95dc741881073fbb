//! Handler for the `correct_spelling` tool.

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
            "description": "The Malay text with potential spelling errors",
        }),
    );

    Tool {
        name: Cow::Borrowed("correct_spelling"),
        title: None,
        description: Some(Cow::Borrowed(
            "Correct spelling errors in Malay text using advanced transformer models.",
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
        let corrector = models.corrector().await?;
        corrector.transform(text).await
    }
    .await;

    match outcome {
        Ok(corrected) => text_result(format!(
            "Spelling Correction Result:\n\nOriginal: {}\n\nCorrected: {}",
            text, corrected
        )),
        Err(e) => {
            tracing::error!("Spelling correction error: {}", e);
            error_result(format!("Error correcting spelling: {}", e))
        }
    }
}
