use rewrite_service::config::RewriteConfig;
use rewrite_service::services::metrics::init_metrics;
use rewrite_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = RewriteConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "rewrite-service",
        &config.common.log_level,
        config.otlp_endpoint.as_deref(),
    )?;
    init_metrics()?;

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
