//! HTTP-backed model provider.
//!
//! Talks to a Malaya inference service over JSON/HTTP:
//!
//! - `POST {base}/v1/models/load` with `{"model": <key>}` loads a model and
//!   returns 2xx once it is ready (this is the slow, failable step);
//! - `POST {base}/v1/detect` with `{"text": ...}` returns `{"label", "score"}`;
//! - `POST {base}/v1/{normalize,correct,paraphrase}` with `{"text": ...}`
//!   return `{"output": ...}`;
//! - `POST {base}/v1/translate` additionally takes `"source"` and `"target"`.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::{Detection, LanguageDetector, ModelProvider, TextTransformer};
use crate::types::{LangCode, ModelKey};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:9090";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the inference backend.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProviderConfig {
    /// Read settings from `MALAYA_API_URL` and `MALAYA_API_TIMEOUT_SECS`,
    /// falling back to defaults.
    pub fn from_env() -> Self {
        let base_url = env::var("MALAYA_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = env::var("MALAYA_API_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Self { base_url, timeout }
    }
}

/// `ModelProvider` backed by the Malaya inference service.
pub struct HttpModelProvider {
    client: Client,
    base_url: String,
}

impl HttpModelProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("malaylanguage-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the backend to load `key`, waiting until it is ready.
    async fn warm(&self, key: &ModelKey) -> Result<()> {
        let url = format!("{}/v1/models/load", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "model": key.as_str() }))
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("failed to load model `{}`: {}", key, response.status());
        }
        Ok(())
    }

    fn transformer(&self, endpoint: &str, params: serde_json::Map<String, serde_json::Value>) -> Arc<dyn TextTransformer> {
        Arc::new(RemoteTransformer {
            client: self.client.clone(),
            url: format!("{}/v1/{}", self.base_url, endpoint),
            params,
        })
    }
}

#[async_trait]
impl ModelProvider for HttpModelProvider {
    async fn load_detector(&self) -> Result<Arc<dyn LanguageDetector>> {
        info!("Loading language detection model...");
        self.warm(&ModelKey::language_detection()).await?;
        Ok(Arc::new(RemoteDetector {
            client: self.client.clone(),
            url: format!("{}/v1/detect", self.base_url),
        }))
    }

    async fn load_normalizer(&self) -> Result<Arc<dyn TextTransformer>> {
        info!("Loading text normalizer model...");
        self.warm(&ModelKey::normalizer()).await?;
        Ok(self.transformer("normalize", serde_json::Map::new()))
    }

    async fn load_corrector(&self) -> Result<Arc<dyn TextTransformer>> {
        info!("Loading spelling correction model...");
        self.warm(&ModelKey::spelling()).await?;
        Ok(self.transformer("correct", serde_json::Map::new()))
    }

    async fn load_paraphraser(&self) -> Result<Arc<dyn TextTransformer>> {
        info!("Loading paraphrase model...");
        self.warm(&ModelKey::paraphrase()).await?;
        Ok(self.transformer("paraphrase", serde_json::Map::new()))
    }

    async fn load_translator(
        &self,
        source: LangCode,
        target: LangCode,
    ) -> Result<Arc<dyn TextTransformer>> {
        info!("Loading translation model {}->{}...", source, target);
        self.warm(&ModelKey::translation(source, target)).await?;
        let mut params = serde_json::Map::new();
        params.insert("source".to_string(), json!(source.as_str()));
        params.insert("target".to_string(), json!(target.as_str()));
        Ok(self.transformer("translate", params))
    }
}

struct RemoteDetector {
    client: Client,
    url: String,
}

#[derive(Deserialize)]
struct DetectResponse {
    label: String,
    score: f64,
}

#[async_trait]
impl LanguageDetector for RemoteDetector {
    async fn detect(&self, text: &str) -> Result<Detection> {
        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "text": text }))
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("detection request failed: {}", response.status());
        }
        let body: DetectResponse = response.json().await?;
        Ok(Detection {
            label: body.label,
            score: body.score,
        })
    }
}

struct RemoteTransformer {
    client: Client,
    url: String,
    /// Extra request fields beyond `text` (e.g. translation direction).
    params: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct TransformResponse {
    output: String,
}

#[async_trait]
impl TextTransformer for RemoteTransformer {
    async fn transform(&self, text: &str) -> Result<String> {
        let mut body = self.params.clone();
        body.insert("text".to_string(), json!(text));
        let response = self.client.post(&self.url).json(&body).send().await?;
        if !response.status().is_success() {
            bail!("inference request failed: {}", response.status());
        }
        let body: TransformResponse = response.json().await?;
        Ok(body.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let provider = HttpModelProvider::new(ProviderConfig {
            base_url: "http://localhost:9090/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(provider.base_url(), "http://localhost:9090");
    }

    #[test]
    fn test_default_config() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:9090");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }
}
