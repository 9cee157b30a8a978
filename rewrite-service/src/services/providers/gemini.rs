//! Gemini provider implementation.
//!
//! Calls `models/{model}:generateContent` once per request. The API key
//! travels in the `x-goog-api-key` header so it never appears in URLs.

use super::{ProviderError, TextGenerator};
use crate::config::GeminiSettings;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use service_core::observability::TracedClientExt;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini text provider.
pub struct GeminiTextProvider {
    api_key: Secret<String>,
    model: String,
    api_base_url: String,
    timeout: Duration,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(settings: &GeminiSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| {
                ProviderError::NotConfigured(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            timeout: settings.timeout(),
            client,
        })
    }

    fn api_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base_url, self.model)
    }
}

fn map_send_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Network(err.to_string())
    }
}

#[async_trait]
impl TextGenerator for GeminiTextProvider {
    fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<Option<String>, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        let request = GenerateContentRequest {
            system_instruction: RequestContent {
                parts: vec![RequestPart {
                    text: system_instruction,
                }],
            },
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .traced_post(&self.api_url())
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.map_err(map_send_error)?;
            tracing::error!(status = status.as_u16(), body = %error_text, "Gemini API error");

            let error: ApiErrorResponse = serde_json::from_str(&error_text).map_err(|e| {
                ProviderError::InvalidResponse(format!(
                    "unparseable error body for status {}: {}",
                    status, e
                ))
            })?;

            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message: error.error.message,
            });
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::InvalidResponse(format!("Failed to parse response: {}", e))
            }
        })?;

        if let Some(reason) = api_response
            .candidates
            .as_ref()
            .and_then(|candidates| candidates.first())
            .and_then(|c| c.finish_reason.as_deref())
        {
            tracing::debug!(finish_reason = reason, "Gemini generation finished");
        }

        Ok(api_response.first_text())
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: RequestContent<'a>,
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    // `null` and absent both mean no candidates.
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

impl GenerateContentResponse {
    /// First candidate, first part, its text.
    fn first_text(self) -> Option<String> {
        self.candidates?
            .into_iter()
            .next()?
            .content?
            .parts?
            .into_iter()
            .next()?
            .text
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    // Absent when the candidate was blocked.
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}
