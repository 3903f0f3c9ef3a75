// Configuration - Environment variables

use std::env;
use std::time::Duration;

/// Model used when neither the request nor the environment names one
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Where the Ollama API lives unless overridden
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Application configuration loaded from environment
#[derive(Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Base URL of the Ollama API
    pub ollama_base_url: String,
    /// Model used when a request does not name one
    pub default_model: String,
    /// Upper bound on a single generation request
    pub generation_timeout: Duration,
    /// Log file path
    pub log_file: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OLLAMA_BASE_URL.to_string()),
            default_model: env::var("DEFAULT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            generation_timeout: Duration::from_secs(
                env::var("GENERATION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
            log_file: env::var("LLMCHAT_LOG_FILE").unwrap_or_else(|_| "/tmp/llmchat.log".to_string()),
        }
    }

    /// Validate that the configuration is usable
    pub fn validate(&self) -> Result<(), String> {
        if !self.ollama_base_url.starts_with("http://")
            && !self.ollama_base_url.starts_with("https://")
        {
            return Err(format!(
                "OLLAMA_BASE_URL does not look like an HTTP URL: {}",
                self.ollama_base_url
            ));
        }
        if self.default_model.trim().is_empty() {
            return Err("DEFAULT_MODEL is empty".to_string());
        }
        Ok(())
    }
}
