use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for text rewriting.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default bound on a single outbound generation call.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct RewriteConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    /// OTLP collector endpoint; trace export is off when unset.
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// Empty when the deployment did not provide a key.
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base_url: String,
    pub timeout_secs: u64,
}

impl GeminiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base_url: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl RewriteConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let timeout_secs = match env::var("GEMINI_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "GEMINI_TIMEOUT_SECS must be a positive integer: {}",
                    e
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let config = RewriteConfig {
            common,
            gemini: GeminiSettings {
                // A missing key is reported per request, not at startup.
                api_key: Secret::new(env::var("GEMINI_API_KEY").unwrap_or_default()),
                model: get_env("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                api_base_url: get_env("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                timeout_secs: timeout_secs.max(1),
            },
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|e| !e.is_empty()),
        };

        Ok(config)
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
