//! Handler for the `term_lookup` tool.

use std::borrow::Cow;
use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde_json::json;

use super::{error_result, schema_object, string_arg, text_result};
use crate::models::ModelCache;
use crate::types::LangCode;

pub(crate) fn descriptor() -> Tool {
    let mut properties = serde_json::Map::new();
    properties.insert(
        "term".to_string(),
        json!({
            "type": "string",
            "description": "The Malay term to look up",
        }),
    );

    Tool {
        name: Cow::Borrowed("term_lookup"),
        title: None,
        description: Some(Cow::Borrowed(
            "Look up linguistic information about a Malay term, including part of speech, \
             etymology, and related terms.",
        )),
        input_schema: Arc::new(schema_object(properties, &["term"])),
        output_schema: None,
        annotations: None,
        icons: None,
        meta: None,
    }
}

pub(crate) async fn execute(args: &JsonObject, models: &ModelCache) -> CallToolResult {
    let term = string_arg(args, "term");
    if term.trim().is_empty() {
        return error_result("Error: Empty or whitespace-only term provided");
    }

    let outcome = async {
        let translator = models.translator(LangCode::Ms, LangCode::En).await?;
        let translation = translator.transform(term).await?;

        let detector = models.detector().await?;
        let detection = detector.detect(term).await?;

        anyhow::Ok((translation, detection))
    }
    .await;

    match outcome {
        Ok((translation, detection)) => text_result(format!(
            "Term Lookup: {}\n\nLanguage: {} (confidence: {:.2}%)\nTranslation: {}\n\n\
             Note: For comprehensive linguistic analysis including part of speech, \
             etymology, and morphological information, consider integrating with \
             specialized Malay linguistic databases or NLP pipelines.",
            term,
            detection.label,
            detection.score * 100.0,
            translation
        )),
        Err(e) => {
            tracing::error!("Term lookup error: {}", e);
            error_result(format!("Error looking up term: {}", e))
        }
    }
}
