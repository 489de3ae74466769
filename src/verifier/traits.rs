use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::types::Payload;

/// Contract every verification engine must honour.
///
/// An engine receives exactly one single-field payload and answers with the
/// raw JSON body it produced. Interpreting that body is left to
/// [`Verdict::from_response`](super::Verdict::from_response) so that every
/// engine degrades the same way when fields are missing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Submit one payload and return the engine's response body
    async fn verify(&self, payload: &Payload) -> Result<Value>;

    /// Short name of the engine, for status output
    fn name(&self) -> String;

    /// Check whether the engine is reachable
    async fn validate_connection(&self) -> Result<bool> {
        Ok(true)
    }
}
