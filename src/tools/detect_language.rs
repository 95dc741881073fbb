//! Handler for the `detect_language` tool.

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
            "description": "The text to analyze for language detection",
        }),
    );

    Tool {
        name: Cow::Borrowed("detect_language"),
        title: None,
        description: Some(Cow::Borrowed(
            "Detect the language of the given text. Identifies Malay, English, and other languages.",
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
        let detector = models.detector().await?;
        detector.detect(text).await
    }
    .await;

    match outcome {
        Ok(detection) => text_result(format!(
            "Language Detection Result:\nLanguage: {}\nConfidence: {:.2}%\n\nInput text: {}",
            detection.label,
            detection.score * 100.0,
            text
        )),
        Err(e) => {
            tracing::error!("Language detection error: {}", e);
            error_result(format!("Error detecting language: {}", e))
        }
    }
}
