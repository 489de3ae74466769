use anyhow::{Context as _, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::error::VerifierError;
use super::traits::Verifier;
use super::types::{Payload, SelectedFile};
use crate::app::EndpointConfig;
use crate::constants::HEALTH_CHECK_TIMEOUT_MS;

/// Verification engine reached over HTTP with one multipart POST per submission
pub struct HttpVerifier {
    client: Client,
    base_url: String,
    endpoint: String,
}

impl HttpVerifier {
    /// Create a client for the configured endpoint
    pub fn new(settings: &EndpointConfig) -> Result<Self> {
        // No client-side timeout unless the operator asks for one
        let mut builder = Client::builder();
        if is_loopback(&settings.base_url) {
            builder = builder.no_proxy();
        }
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build().context("Failed to build HTTP client")?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            endpoint: settings.endpoint_url(),
        })
    }

    /// Full URL submissions are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn file_part(file: &SelectedFile) -> Result<Part> {
        Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .with_context(|| format!("Invalid mime type {} for {}", file.mime, file.name))
    }

    /// Build the single-field multipart body for a payload
    fn build_form(payload: &Payload) -> Result<Form> {
        let field = payload.field_name();
        let form = match payload {
            Payload::Text(text) | Payload::Url(text) => Form::new().text(field, text.clone()),
            Payload::Image(file) | Payload::Audio(file) => {
                Form::new().part(field, Self::file_part(file)?)
            }
        };
        Ok(form)
    }
}

/// Local engines are never routed through a system proxy
fn is_loopback(base_url: &str) -> bool {
    reqwest::Url::parse(base_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .map(|host| matches!(host.as_str(), "localhost" | "127.0.0.1" | "[::1]" | "::1"))
        .unwrap_or(false)
}

#[async_trait]
impl Verifier for HttpVerifier {
    async fn verify(&self, payload: &Payload) -> Result<Value> {
        let form = Self::build_form(payload)?;
        debug!(field = payload.field_name(), endpoint = %self.endpoint, "Submitting verification request");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| VerifierError::Network(format!("{}: {}", self.endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VerifierError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| VerifierError::Network(e.to_string()))?;
        let body = serde_json::from_slice(&bytes).map_err(|e| VerifierError::Decode(e.to_string()))?;
        Ok(body)
    }

    fn name(&self) -> String {
        format!("http ({})", self.endpoint)
    }

    async fn validate_connection(&self) -> Result<bool> {
        // Any HTTP answer means the server is up; only connection failures count
        let mut health = Client::builder().timeout(Duration::from_millis(HEALTH_CHECK_TIMEOUT_MS));
        if is_loopback(&self.base_url) {
            health = health.no_proxy();
        }
        let health = health.build()?;

        match health.get(&self.base_url).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                debug!("Endpoint health check failed: {}", e);
                Ok(false)
            }
        }
    }
}
