//! Inbound payload and outbound body for the rewrite endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text to transform plus the optional parameters steering the rewrite.
///
/// Every field is optional at the serde level so a missing `inputText`
/// surfaces as a validation error rather than a body rejection. The steering
/// parameters accept any JSON value and are rendered into the prompt as text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRequest {
    #[serde(default)]
    pub input_text: Option<String>,

    #[serde(default)]
    pub style: Option<Value>,

    #[serde(default)]
    pub audience: Option<Value>,

    #[serde(default)]
    pub length: Option<Value>,

    #[serde(default)]
    pub keywords: Option<Value>,

    /// Free-form instructions; outrank every other parameter.
    #[serde(default)]
    pub instructions: Option<Value>,
}

impl RewriteRequest {
    pub fn new(input_text: impl Into<String>) -> Self {
        Self {
            input_text: Some(input_text.into()),
            ..Default::default()
        }
    }

    /// The text to rewrite, if present and non-empty.
    pub fn input_text(&self) -> Option<&str> {
        self.input_text.as_deref().filter(|text| !text.is_empty())
    }
}

/// Successful response; the Android client reads `generatedText`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResponse {
    pub generated_text: String,
}
