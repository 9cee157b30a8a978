//! The rewrite endpoint: validate, compose the prompt, call the generator,
//! map the outcome onto the response.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use std::time::Instant;

use crate::{
    models::{RewriteRequest, RewriteResponse},
    prompt::{compose_prompt, SYSTEM_INSTRUCTION},
    services::{metrics, ProviderError},
    startup::AppState,
};

pub const API_KEY_MISSING_MESSAGE: &str = "API key not configured on the server.";
pub const INPUT_MISSING_MESSAGE: &str = "Input text is missing.";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";
pub const UPSTREAM_FAILED_MESSAGE: &str = "Failed to get a response from the AI service.";
pub const NO_CONTENT_FALLBACK: &str = "No content generated.";

/// `POST /api/generate`
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<RewriteRequest>, JsonRejection>,
) -> Result<Json<RewriteResponse>, AppError> {
    // Missing credentials win over body errors.
    if !state.generator.is_configured() {
        tracing::error!("Rejecting rewrite request: API key is not configured");
        metrics::record_rewrite("not_configured");
        return Err(AppError::NotConfigured(API_KEY_MISSING_MESSAGE.to_string()));
    }

    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected rewrite request body");
        metrics::record_rewrite("invalid_body");
        AppError::BadRequest(INVALID_BODY_MESSAGE.to_string())
    })?;

    let Some(input_text) = request.input_text() else {
        metrics::record_rewrite("missing_input");
        return Err(AppError::BadRequest(INPUT_MISSING_MESSAGE.to_string()));
    };

    tracing::info!(
        input_len = input_text.len(),
        has_style = request.style.is_some(),
        has_audience = request.audience.is_some(),
        has_length = request.length.is_some(),
        has_keywords = request.keywords.is_some(),
        has_instructions = request.instructions.is_some(),
        "Processing rewrite request"
    );

    let prompt = compose_prompt(&request);

    let started = Instant::now();
    let result = state.generator.generate(SYSTEM_INSTRUCTION, &prompt).await;
    metrics::record_provider_latency(state.generator.model(), started.elapsed().as_secs_f64());

    match result {
        Ok(text) => {
            let generated_text = match text.filter(|t| !t.is_empty()) {
                Some(text) => {
                    metrics::record_rewrite("ok");
                    text
                }
                None => {
                    tracing::warn!("Generator returned no content");
                    metrics::record_rewrite("empty");
                    NO_CONTENT_FALLBACK.to_string()
                }
            };
            Ok(Json(RewriteResponse { generated_text }))
        }
        Err(ProviderError::Upstream { status, message }) => {
            tracing::error!(status, error = ?message, "AI service returned an error");
            metrics::record_rewrite("upstream");
            Err(AppError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: UPSTREAM_FAILED_MESSAGE.to_string(),
                error: message,
            })
        }
        Err(err) => {
            metrics::record_rewrite(err.kind());
            Err(AppError::InternalError(
                anyhow::Error::new(err).context("rewrite generation failed"),
            ))
        }
    }
}

/// Fallback for every method other than `POST` (and `OPTIONS`, answered by CORS).
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
