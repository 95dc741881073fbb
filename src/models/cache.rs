//! Memoizing cache of initialized model handles.
//!
//! Keys follow the model kind ("language_detection", "normalizer", ...),
//! with translation keyed per ordered language pair. Entries are created on
//! first use and live for the process lifetime; there is no eviction.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use tokio::sync::RwLock;
use tracing::info;

use super::{LanguageDetector, ModelProvider, TextTransformer};
use crate::types::{LangCode, ModelKey};

/// An initialized model, stored by capability.
#[derive(Clone)]
pub enum ModelHandle {
    Detector(Arc<dyn LanguageDetector>),
    Transformer(Arc<dyn TextTransformer>),
}

/// Lazily populated map from `ModelKey` to an initialized model handle.
///
/// The cache is constructed once with the provider that loads models and is
/// shared by every tool handler. A failed load stores nothing, so the next
/// request for the same key retries initialization.
pub struct ModelCache {
    provider: Arc<dyn ModelProvider>,
    entries: RwLock<HashMap<ModelKey, ModelHandle>>,
}

impl ModelCache {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached handle for `key`, or run `factory` and store its
    /// result.
    ///
    /// The factory runs without the lock held, so two concurrent first
    /// requests for the same key may both load the model; the first insert
    /// wins and the other handle is dropped. Errors propagate to the caller
    /// and leave the key absent.
    pub async fn get_or_create<F, Fut>(&self, key: ModelKey, factory: F) -> Result<ModelHandle>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ModelHandle>>,
    {
        if let Some(handle) = self.entries.read().await.get(&key) {
            return Ok(handle.clone());
        }

        info!("Loading model for key `{}`", key);
        let handle = factory().await?;
        info!("Model `{}` loaded successfully", key);

        let mut entries = self.entries.write().await;
        Ok(entries.entry(key).or_insert(handle).clone())
    }

    /// Whether a handle is cached for `key`.
    pub async fn contains(&self, key: &ModelKey) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// Number of cached handles.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Get or load the language detection model.
    pub async fn detector(&self) -> Result<Arc<dyn LanguageDetector>> {
        let key = ModelKey::language_detection();
        let provider = self.provider.clone();
        let handle = self
            .get_or_create(key.clone(), move || async move {
                Ok(ModelHandle::Detector(provider.load_detector().await?))
            })
            .await?;
        match handle {
            ModelHandle::Detector(model) => Ok(model),
            ModelHandle::Transformer(_) => {
                Err(anyhow!("cached model for `{}` is not a detector", key))
            }
        }
    }

    /// Get or load the text normalizer.
    pub async fn normalizer(&self) -> Result<Arc<dyn TextTransformer>> {
        let provider = self.provider.clone();
        self.transformer_entry(ModelKey::normalizer(), move || async move {
            provider.load_normalizer().await
        })
        .await
    }

    /// Get or load the spelling corrector.
    pub async fn corrector(&self) -> Result<Arc<dyn TextTransformer>> {
        let provider = self.provider.clone();
        self.transformer_entry(ModelKey::spelling(), move || async move {
            provider.load_corrector().await
        })
        .await
    }

    /// Get or load the paraphrase model.
    pub async fn paraphraser(&self) -> Result<Arc<dyn TextTransformer>> {
        let provider = self.provider.clone();
        self.transformer_entry(ModelKey::paraphrase(), move || async move {
            provider.load_paraphraser().await
        })
        .await
    }

    /// Get or load the translation model for the given direction.
    pub async fn translator(
        &self,
        source: LangCode,
        target: LangCode,
    ) -> Result<Arc<dyn TextTransformer>> {
        let provider = self.provider.clone();
        self.transformer_entry(ModelKey::translation(source, target), move || async move {
            provider.load_translator(source, target).await
        })
        .await
    }

    async fn transformer_entry<F, Fut>(
        &self,
        key: ModelKey,
        load: F,
    ) -> Result<Arc<dyn TextTransformer>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<dyn TextTransformer>>>,
    {
        let handle = self
            .get_or_create(key.clone(), move || async move {
                Ok(ModelHandle::Transformer(load().await?))
            })
            .await?;
        match handle {
            ModelHandle::Transformer(model) => Ok(model),
            ModelHandle::Detector(_) => {
                Err(anyhow!("cached model for `{}` is not a text transformer", key))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testing::{StubProvider, StubTransformer};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cache() -> ModelCache {
        ModelCache::new(Arc::new(StubProvider::default()))
    }

    #[tokio::test]
    async fn test_factory_runs_once_per_key() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let handle = cache
                .get_or_create(ModelKey::normalizer(), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(ModelHandle::Transformer(Arc::new(StubTransformer(|t: &str| {
                        t.to_string()
                    }))))
                })
                .await;
            assert!(handle.is_ok());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_failed_factory_leaves_key_absent() {
        let cache = cache();
        let key = ModelKey::spelling();

        let first = cache
            .get_or_create(key.clone(), || async { Err(anyhow!("backend unavailable")) })
            .await;
        assert!(first.is_err());
        assert!(!cache.contains(&key).await);

        // A later call retries and can succeed.
        let second = cache
            .get_or_create(key.clone(), || async {
                Ok(ModelHandle::Transformer(Arc::new(StubTransformer(|t: &str| {
                    t.to_string()
                }))))
            })
            .await;
        assert!(second.is_ok());
        assert!(cache.contains(&key).await);
    }

    #[tokio::test]
    async fn test_translation_directions_are_independent() {
        let provider = Arc::new(StubProvider::default());
        let cache = ModelCache::new(provider.clone());

        cache.translator(LangCode::Ms, LangCode::En).await.unwrap();
        cache.translator(LangCode::Ms, LangCode::En).await.unwrap();
        cache.translator(LangCode::En, LangCode::Ms).await.unwrap();

        assert_eq!(provider.load_count("translation_ms_en"), 1);
        assert_eq!(provider.load_count("translation_en_ms"), 1);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_typed_accessors_share_entries() {
        let provider = Arc::new(StubProvider::default());
        let cache = ModelCache::new(provider.clone());

        cache.detector().await.unwrap();
        cache.detector().await.unwrap();
        cache.normalizer().await.unwrap();
        cache.corrector().await.unwrap();
        cache.paraphraser().await.unwrap();

        assert_eq!(provider.load_count("language_detection"), 1);
        assert_eq!(provider.load_count("normalizer"), 1);
        assert_eq!(cache.len().await, 4);
    }
}
