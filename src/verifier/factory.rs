use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use super::demo::DemoVerifier;
use super::http::HttpVerifier;
use super::traits::Verifier;
use crate::app::Config;
use crate::utils::CheckmateError;

/// Factory for creating verification engines from configuration
pub struct VerifierFactory;

impl VerifierFactory {
    /// Create the engine named by `verifier.backend` ("http" or "demo")
    pub fn create(config: &Config) -> Result<Arc<dyn Verifier>> {
        match config.verifier.backend.to_lowercase().as_str() {
            "http" => Ok(Arc::new(HttpVerifier::new(&config.endpoint)?)),
            "demo" => Ok(Arc::new(DemoVerifier::new(Duration::from_millis(
                config.verifier.demo_latency_ms,
            )))),
            other => Err(CheckmateError::ConfigError(format!(
                "Unknown verifier backend '{}'. Expected 'http' or 'demo'",
                other
            ))
            .into()),
        }
    }
}
