//! Application startup and lifecycle management.

use crate::config::RewriteConfig;
use crate::handlers::{
    generate::{generate, method_not_allowed},
    health::{health_check, metrics_endpoint},
};
use crate::services::providers::gemini::GeminiTextProvider;
use crate::services::TextGenerator;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::cors_middleware, metrics::metrics_middleware, tracing::request_id_middleware,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

/// Build the HTTP router around `state`.
///
/// Layers run outermost first: CORS, request id, trace span, metrics.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/generate",
            post(generate).fallback(method_not_allowed),
        )
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(cors_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RewriteConfig) -> Result<Self, AppError> {
        let provider = GeminiTextProvider::new(&config.gemini)
            .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;

        if config.gemini.has_api_key() {
            tracing::info!(model = %config.gemini.model, "Initialized Gemini text provider");
        } else {
            tracing::warn!("GEMINI_API_KEY is not set - rewrite requests will fail with 500");
        }

        let state = AppState::new(Arc::new(provider));
        Self::build_with_state(config, state).await
    }

    /// Build around an existing state, e.g. one holding a mock generator.
    pub async fn build_with_state(config: RewriteConfig, state: AppState) -> Result<Self, AppError> {
        // Port 0 picks a random port for testing.
        let addr = config.common.bind_address();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Rewrite service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl-C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
