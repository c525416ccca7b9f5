use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ServiceError};

/// Main configuration struct for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Directory-scan limits
    pub scan: ScanConfig,
    /// Upstream completion API settings
    pub llm: LlmConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the server binds to
    pub bind_addr: SocketAddr,
}

/// Limits applied to every project scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Directory levels below the root the walker may descend
    pub max_depth: usize,
    /// Wall-clock budget for one whole traversal
    pub global_timeout: Duration,
    /// Concurrent single-file analyses per scan
    pub analysis_workers: usize,
}

/// Settings for the upstream chat-completion API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Bearer token for the completion API
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token budget
    pub max_tokens: u32,
    /// Nucleus sampling parameter
    pub top_p: f32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            global_timeout: Duration::from_secs(15),
            analysis_workers: 2,
        }
    }
}

impl LlmConfig {
    /// Creates LLM settings with the given key and the default Groq endpoint
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.7,
            max_tokens: 8192,
            top_p: 0.95,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment
    ///
    /// Reads a `.env` file from the working directory when one exists, then
    /// requires `GROQ_API_KEY` and honors the optional `READMEGEN_BIND`,
    /// `GROQ_BASE_URL`, and `GROQ_MODEL` overrides.
    pub fn from_env() -> Result<Self> {
        if dotenvy::dotenv().is_ok() {
            info!("loaded environment from .env");
        }

        let api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ServiceError::config("GROQ_API_KEY is not set"))?;

        let mut llm = LlmConfig::with_api_key(api_key);
        if let Ok(base_url) = std::env::var("GROQ_BASE_URL") {
            llm.base_url = base_url;
        }
        if let Ok(model) = std::env::var("GROQ_MODEL") {
            llm.model = model;
        }

        let mut server = ServerConfig::default();
        if let Ok(bind) = std::env::var("READMEGEN_BIND") {
            server.bind_addr = bind
                .parse()
                .map_err(|e| ServiceError::config(format!("invalid READMEGEN_BIND '{bind}': {e}")))?;
        }

        Ok(Self {
            server,
            scan: ScanConfig::default(),
            llm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_defaults_match_service_limits() {
        let scan = ScanConfig::default();
        assert_eq!(scan.max_depth, 2);
        assert_eq!(scan.global_timeout, Duration::from_secs(15));
        assert_eq!(scan.analysis_workers, 2);
    }

    #[test]
    fn test_llm_defaults() {
        let llm = LlmConfig::with_api_key("gsk_test");
        assert_eq!(llm.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(llm.model, "llama-3.3-70b-versatile");
        assert_eq!(llm.max_tokens, 8192);
    }
}
