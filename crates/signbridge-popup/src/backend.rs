//! Translation backend client.
//!
//! One POST per translation, no retry. Transport failures and non-2xx
//! statuses both surface as backend failures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use signbridge_core::{BridgeConfig, Error, Result};
use signbridge_protocol::{HealthResponse, TranslationRequest, TranslationResult};

/// Anything that can turn a video URL into a translation result.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult>;
}

/// HTTP backend at `<backend_url><translate_path>`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    translate_url: String,
    health_url: String,
}

impl HttpBackend {
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            translate_url: config.translate_endpoint(),
            health_url: config.health_endpoint(),
        })
    }

    pub fn translate_url(&self) -> &str {
        &self.translate_url
    }

    /// Probe the backend's liveness route.
    pub async fn health(&self) -> Result<HealthResponse> {
        let resp = self
            .client
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| Error::BackendUnreachable(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Error::BackendStatus(resp.status().as_u16()));
        }
        resp.json::<HealthResponse>()
            .await
            .map_err(|e| Error::Http(format!("Invalid health response: {}", e)))
    }
}

#[async_trait]
impl TranslationBackend for HttpBackend {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        debug!("POST {} video_url={}", self.translate_url, request.video_url);

        let resp = self
            .client
            .post(&self.translate_url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| Error::BackendUnreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!("Backend error {}: {}", status, body);
            return Err(Error::BackendStatus(status.as_u16()));
        }

        resp.json::<TranslationResult>()
            .await
            .map_err(|e| Error::Http(format!("Invalid backend response: {}", e)))
    }
}
