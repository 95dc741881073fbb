//! Handler for the `apply_glossary` tool.
//!
//! There is no real glossary backend yet; the handler translates the term
//! ms->en as a stand-in and says so in the response.

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
            "description": "The Malay term to look up in the glossary",
        }),
    );

    Tool {
        name: Cow::Borrowed("apply_glossary"),
        title: None,
        description: Some(Cow::Borrowed(
            "Look up Malay terms in a standard glossary and provide definitions, translations, \
             and usage examples.",
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
        translator.transform(term).await
    }
    .await;

    match outcome {
        Ok(translation) => text_result(format!(
            "Glossary Lookup: {}\n\nTranslation (EN): {}\n\n\
             Note: This is a basic translation. For comprehensive glossary entries with \
             definitions, etymology, and usage examples, consider integrating with \
             Dewan Bahasa dan Pustaka's official dictionary API or similar resources.",
            term, translation
        )),
        Err(e) => {
            tracing::error!("Glossary lookup error: {}", e);
            error_result(format!("Error looking up term: {}", e))
        }
    }
}
