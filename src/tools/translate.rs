//! Handler for the `translate` tool.

use std::borrow::Cow;
use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde_json::json;

use super::{error_result, schema_object, string_arg, string_arg_or, text_result};
use crate::models::ModelCache;
use crate::types::LangCode;

pub(crate) fn descriptor() -> Tool {
    let codes: Vec<&str> = LangCode::ALL.iter().map(|c| c.as_str()).collect();

    let mut properties = serde_json::Map::new();
    properties.insert(
        "text".to_string(),
        json!({
            "type": "string",
            "description": "The text to translate",
        }),
    );
    properties.insert(
        "source_lang".to_string(),
        json!({
            "type": "string",
            "description": "Source language code (ms=Malay, en=English)",
            "enum": codes,
            "default": "ms",
        }),
    );
    properties.insert(
        "target_lang".to_string(),
        json!({
            "type": "string",
            "description": "Target language code (ms=Malay, en=English)",
            "enum": codes,
            "default": "en",
        }),
    );

    Tool {
        name: Cow::Borrowed("translate"),
        title: None,
        description: Some(Cow::Borrowed(
            "Translate text between Malay and English (bidirectional).",
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

    let source_raw = string_arg_or(args, "source_lang", "ms");
    let target_raw = string_arg_or(args, "target_lang", "en");
    let Some(source) = LangCode::parse(source_raw) else {
        return error_result(format!("Error: Unsupported language code: {}", source_raw));
    };
    let Some(target) = LangCode::parse(target_raw) else {
        return error_result(format!("Error: Unsupported language code: {}", target_raw));
    };
    if source == target {
        return error_result("Error: Source and target languages must be different");
    }

    let outcome = async {
        let translator = models.translator(source, target).await?;
        translator.transform(text).await
    }
    .await;

    match outcome {
        Ok(translated) => text_result(format!(
            "Translation Result:\n\nSource ({}): {}\n\nTranslation ({}): {}",
            source.display_name(),
            text,
            target.display_name(),
            translated
        )),
        Err(e) => {
            tracing::error!("Translation error: {}", e);
            error_result(format!("Error translating text: {}", e))
        }
    }
}
