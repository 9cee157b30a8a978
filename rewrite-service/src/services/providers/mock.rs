//! Mock generator for testing.

use super::{ProviderError, TextGenerator};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Successful call; `None` mimics a response without candidate text.
    Text(Option<String>),
    /// Non-success status from the remote API.
    Upstream {
        status: u16,
        message: Option<String>,
    },
    /// Transport failure carrying the given detail.
    Network(String),
}

/// Scripted [`TextGenerator`] that records how it was called.
pub struct MockTextGenerator {
    configured: bool,
    outcome: MockOutcome,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, String)>>,
}

impl MockTextGenerator {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            configured: true,
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(MockOutcome::Text(Some(text.to_string())))
    }

    /// A generator whose credential is missing.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::text("unreachable")
        }
    }

    /// Number of `generate` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(system_instruction, prompt)` of the most recent call.
    pub fn last_request(&self) -> Option<(String, String)> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    fn is_configured(&self) -> bool {
        self.configured
    }

    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<Option<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some((system_instruction.to_string(), prompt.to_string()));
        }

        match &self.outcome {
            MockOutcome::Text(text) => Ok(text.clone()),
            MockOutcome::Upstream { status, message } => Err(ProviderError::Upstream {
                status: *status,
                message: message.clone(),
            }),
            MockOutcome::Network(detail) => Err(ProviderError::Network(detail.clone())),
        }
    }
}
