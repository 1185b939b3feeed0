//! Agent Configuration
//!
//! Relay endpoint, credentials and model selection, resolvable from the
//! environment.

use pardus_core::{DEFAULT_MODEL, PardusError, Result};

/// Relay endpoint used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://api.pardus.dev";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "PARDUS_API_KEY";

/// Environment variable overriding the relay endpoint
pub const BASE_URL_ENV: &str = "PARDUS_BASE_URL";

/// Request timeout in seconds
pub(crate) const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Dispatch client configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Relay base URL; `/chat` is appended for dispatch
    pub base_url: String,

    /// API key sent as a bearer token. An empty key is accepted and
    /// suppresses the authorization header, for relays with auth
    /// disabled.
    pub api_key: String,

    /// Model identifier forwarded with every dispatch
    pub model: String,
}

impl AgentConfig {
    /// Create a configuration with an explicit key and defaults for the
    /// rest.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
        }
    }

    /// Build a configuration from `PARDUS_API_KEY` and `PARDUS_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`PardusError::Config`] when `PARDUS_API_KEY` is unset.
    pub fn from_env() -> Result<Self> {
        let api_key = resolve_api_key(None, std::env::var(API_KEY_ENV).ok())?;
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        Ok(Self {
            base_url,
            api_key,
            model: DEFAULT_MODEL.into(),
        })
    }
}

/// Pick the API key from an explicit value or the environment, in that
/// order.
///
/// # Errors
///
/// Returns [`PardusError::Config`] when neither source supplies a key.
pub(crate) fn resolve_api_key(explicit: Option<String>, env: Option<String>) -> Result<String> {
    explicit.or(env).ok_or_else(|| {
        PardusError::Config(format!(
            "API key is required: pass one explicitly or set {API_KEY_ENV}"
        ))
    })
}
