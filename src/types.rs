//! Core value types shared across the server.
//!
//! These types prevent accidental mixing of semantically different strings
//! (e.g., passing a raw language string where a validated code is expected).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language code supported by the translation and detection tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LangCode {
    /// Malay (Bahasa Melayu).
    Ms,
    /// English.
    En,
}

impl LangCode {
    /// All codes accepted by the `translate` tool, in schema order.
    pub const ALL: [LangCode; 2] = [LangCode::Ms, LangCode::En];

    /// The wire form of the code ("ms" / "en").
    pub fn as_str(&self) -> &'static str {
        match self {
            LangCode::Ms => "ms",
            LangCode::En => "en",
        }
    }

    /// Human-readable language name for response text.
    pub fn display_name(&self) -> &'static str {
        match self {
            LangCode::Ms => "Malay",
            LangCode::En => "English",
        }
    }

    /// Parse a wire-form code. Returns `None` for anything but "ms"/"en".
    pub fn parse(s: &str) -> Option<LangCode> {
        match s {
            "ms" => Some(LangCode::Ms),
            "en" => Some(LangCode::En),
            _ => None,
        }
    }
}

impl fmt::Display for LangCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Target style for the `rewrite_style` tool.
///
/// The style is declared in the tool schema and echoed in the response, but
/// the paraphrase model itself is not conditioned on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteStyle {
    Formal,
    Casual,
    Simplified,
}

impl RewriteStyle {
    /// Allowed values, in schema order.
    pub const ALL: [RewriteStyle; 3] = [
        RewriteStyle::Formal,
        RewriteStyle::Casual,
        RewriteStyle::Simplified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteStyle::Formal => "formal",
            RewriteStyle::Casual => "casual",
            RewriteStyle::Simplified => "simplified",
        }
    }

    /// Parse a style value, falling back to `Formal` (the schema default).
    pub fn parse_or_default(s: &str) -> RewriteStyle {
        match s {
            "casual" => RewriteStyle::Casual,
            "simplified" => RewriteStyle::Simplified,
            _ => RewriteStyle::Formal,
        }
    }
}

impl fmt::Display for RewriteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Key identifying a cached model handle.
///
/// One key exists per model kind; translation keys are additionally
/// parameterized by the ordered language pair, so each direction gets its
/// own cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelKey(String);

impl ModelKey {
    pub fn language_detection() -> Self {
        Self("language_detection".to_string())
    }

    pub fn normalizer() -> Self {
        Self("normalizer".to_string())
    }

    pub fn spelling() -> Self {
        Self("spelling".to_string())
    }

    pub fn paraphrase() -> Self {
        Self("paraphrase".to_string())
    }

    pub fn translation(source: LangCode, target: LangCode) -> Self {
        Self(format!("translation_{}_{}", source, target))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_code_parse() {
        assert_eq!(LangCode::parse("ms"), Some(LangCode::Ms));
        assert_eq!(LangCode::parse("en"), Some(LangCode::En));
        assert_eq!(LangCode::parse("fr"), None);
        assert_eq!(LangCode::parse(""), None);
    }

    #[test]
    fn test_lang_code_display() {
        assert_eq!(LangCode::Ms.to_string(), "ms");
        assert_eq!(LangCode::En.display_name(), "English");
        assert_eq!(LangCode::Ms.display_name(), "Malay");
    }

    #[test]
    fn test_lang_code_serde() {
        let json = serde_json::to_string(&LangCode::Ms).unwrap();
        assert_eq!(json, "\"ms\"");
        let parsed: LangCode = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, LangCode::En);
    }

    #[test]
    fn test_rewrite_style_defaults_to_formal() {
        assert_eq!(RewriteStyle::parse_or_default("casual"), RewriteStyle::Casual);
        assert_eq!(
            RewriteStyle::parse_or_default("simplified"),
            RewriteStyle::Simplified
        );
        assert_eq!(RewriteStyle::parse_or_default("formal"), RewriteStyle::Formal);
        assert_eq!(RewriteStyle::parse_or_default("shouty"), RewriteStyle::Formal);
    }

    #[test]
    fn test_model_key_translation_pairs() {
        let ms_en = ModelKey::translation(LangCode::Ms, LangCode::En);
        let en_ms = ModelKey::translation(LangCode::En, LangCode::Ms);
        assert_eq!(ms_en.as_str(), "translation_ms_en");
        assert_eq!(en_ms.as_str(), "translation_en_ms");
        assert_ne!(ms_en, en_ms);
    }

    #[test]
    fn test_model_key_kinds_are_distinct() {
        use std::collections::HashSet;

        let keys: HashSet<ModelKey> = [
            ModelKey::language_detection(),
            ModelKey::normalizer(),
            ModelKey::spelling(),
            ModelKey::paraphrase(),
        ]
        .into_iter()
        .collect();
        assert_eq!(keys.len(), 4);
    }
}
