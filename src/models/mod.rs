//! Model capability traits and the memoizing model cache.
//!
//! Model inference is delegated to an external backend. The traits here are
//! the minimal capabilities the tool handlers need, so nothing in the crate
//! depends on a concrete inference library: a detector predicts a label with
//! a confidence score, and a transformer maps text to text (normalization,
//! spelling correction, paraphrasing, and translation all fit that shape).

mod cache;
mod remote;

pub use cache::{ModelCache, ModelHandle};
pub use remote::{HttpModelProvider, ProviderConfig};

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::LangCode;

/// Predicted language plus confidence for a single input.
#[derive(Debug, Clone)]
pub struct Detection {
    pub label: String,
    /// Confidence in the range 0.0..=1.0.
    pub score: f64,
}

/// A model that predicts the language of a text.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    async fn detect(&self, text: &str) -> Result<Detection>;
}

/// A model that rewrites text (normalize, correct, paraphrase, translate).
#[async_trait]
pub trait TextTransformer: Send + Sync {
    async fn transform(&self, text: &str) -> Result<String>;
}

/// Factory for model handles.
///
/// Loading may be slow (the backend downloads weights on first use) and may
/// fail; the `ModelCache` only stores handles from successful loads.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn load_detector(&self) -> Result<Arc<dyn LanguageDetector>>;
    async fn load_normalizer(&self) -> Result<Arc<dyn TextTransformer>>;
    async fn load_corrector(&self) -> Result<Arc<dyn TextTransformer>>;
    async fn load_paraphraser(&self) -> Result<Arc<dyn TextTransformer>>;
    async fn load_translator(
        &self,
        source: LangCode,
        target: LangCode,
    ) -> Result<Arc<dyn TextTransformer>>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Stub models and provider shared by the unit tests.

    use super::*;
    use std::sync::Mutex;

    pub struct StubDetector {
        pub label: String,
        pub score: f64,
    }

    #[async_trait]
    impl LanguageDetector for StubDetector {
        async fn detect(&self, _text: &str) -> Result<Detection> {
            Ok(Detection {
                label: self.label.clone(),
                score: self.score,
            })
        }
    }

    pub struct StubTransformer(pub fn(&str) -> String);

    #[async_trait]
    impl TextTransformer for StubTransformer {
        async fn transform(&self, text: &str) -> Result<String> {
            Ok((self.0)(text))
        }
    }

    /// Provider that records every load so tests can assert on cache hits.
    #[derive(Default)]
    pub struct StubProvider {
        pub loads: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn record(&self, kind: &str) {
            self.loads.lock().unwrap().push(kind.to_string());
        }

        pub fn load_count(&self, kind: &str) -> usize {
            self.loads.lock().unwrap().iter().filter(|k| *k == kind).count()
        }
    }

    /// Provider whose loads always fail, for exercising handler error paths.
    pub struct FailingProvider;

    #[async_trait]
    impl ModelProvider for FailingProvider {
        async fn load_detector(&self) -> Result<Arc<dyn LanguageDetector>> {
            anyhow::bail!("backend unavailable")
        }

        async fn load_normalizer(&self) -> Result<Arc<dyn TextTransformer>> {
            anyhow::bail!("backend unavailable")
        }

        async fn load_corrector(&self) -> Result<Arc<dyn TextTransformer>> {
            anyhow::bail!("backend unavailable")
        }

        async fn load_paraphraser(&self) -> Result<Arc<dyn TextTransformer>> {
            anyhow::bail!("backend unavailable")
        }

        async fn load_translator(
            &self,
            _source: LangCode,
            _target: LangCode,
        ) -> Result<Arc<dyn TextTransformer>> {
            anyhow::bail!("backend unavailable")
        }
    }

    #[async_trait]
    impl ModelProvider for StubProvider {
        async fn load_detector(&self) -> Result<Arc<dyn LanguageDetector>> {
            self.record("language_detection");
            Ok(Arc::new(StubDetector {
                label: "malay".to_string(),
                score: 0.95,
            }))
        }

        async fn load_normalizer(&self) -> Result<Arc<dyn TextTransformer>> {
            self.record("normalizer");
            Ok(Arc::new(StubTransformer(|t: &str| t.to_lowercase())))
        }

        async fn load_corrector(&self) -> Result<Arc<dyn TextTransformer>> {
            self.record("spelling");
            Ok(Arc::new(StubTransformer(|t: &str| format!("corrected: {}", t))))
        }

        async fn load_paraphraser(&self) -> Result<Arc<dyn TextTransformer>> {
            self.record("paraphrase");
            Ok(Arc::new(StubTransformer(|t: &str| format!("paraphrased: {}", t))))
        }

        async fn load_translator(
            &self,
            source: LangCode,
            target: LangCode,
        ) -> Result<Arc<dyn TextTransformer>> {
            self.record(&format!("translation_{}_{}", source, target));
            Ok(Arc::new(StubTransformer(|t: &str| format!("translated: {}", t))))
        }
    }
}
