use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::layout::font_metrics::StandardFont;
use crate::llm_client::{LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub llm_timeout_secs: u64,
    pub email_user: String,
    pub email_pass: String,
    pub smtp_host: String,
    /// Snapshot file for session history. In-memory only when unset.
    pub store_path: Option<PathBuf>,
    /// Standard font for exported PDFs.
    pub pdf_font: StandardFont,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_MODEL),
            gemini_base_url: env_or("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            email_user: require_env("EMAIL_USER")?,
            email_pass: require_env("EMAIL_PASS")?,
            smtp_host: env_or("SMTP_HOST", "smtp.gmail.com"),
            store_path: std::env::var("STORE_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            pdf_font: env_or("PDF_FONT", "helvetica")
                .parse::<StandardFont>()
                .context("PDF_FONT must name a supported standard font")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Model settings handed to every summarization call.
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            base_url: self.gemini_base_url.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
            ..LlmConfig::new(self.gemini_api_key.clone(), self.gemini_model.clone())
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
