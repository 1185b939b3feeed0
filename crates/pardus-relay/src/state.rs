//! Application State

use std::time::Duration;

/// Ollama endpoint used when `OLLAMA_API_URL` is unset
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/v1/chat/completions";

/// Listen port used when `PORT` is unset
pub const DEFAULT_PORT: u16 = 8080;

/// Forwarding timeout in seconds
const OLLAMA_TIMEOUT_SECS: u64 = 60;

/// Relay configuration
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// OpenAI-compatible chat-completions endpoint requests are forwarded to
    pub ollama_url: String,

    /// Port the relay listens on
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.into(),
            port: DEFAULT_PORT,
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Self {
        let ollama_url =
            std::env::var("OLLAMA_API_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { ollama_url, port }
    }

    /// Address string the server binds to
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Forwarding HTTP client, built once with the forwarding timeout
    pub client: reqwest::Client,

    /// Relay configuration
    pub config: RelayConfig,
}

impl AppState {
    pub fn new(config: RelayConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(OLLAMA_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, config })
    }
}
