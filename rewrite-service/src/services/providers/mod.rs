//! Text generation backends.
//!
//! The handler only sees [`TextGenerator`]; the vendor payload shape stays
//! inside each implementation.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// The remote API answered with a non-success status.
    #[error("Upstream error {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Upstream {
        status: u16,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::Upstream { .. } => "upstream",
            ProviderError::Network(_) => "network",
            ProviderError::Timeout => "timeout",
            ProviderError::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// A single-shot text generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Whether a credential is available. Checked before any call is made.
    fn is_configured(&self) -> bool;

    /// Model identifier, used as a metrics label.
    fn model(&self) -> &str;

    /// Generate text for `prompt` steered by `system_instruction`.
    ///
    /// Returns `Ok(None)` when the response has no first-candidate text.
    async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<Option<String>, ProviderError>;
}
