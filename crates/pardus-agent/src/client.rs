//! Dispatch Client
//!
//! Sends an instruction plus the registered tool schemas to the relay's
//! `/chat` endpoint, then resolves the returned tool calls against the
//! local registry and executes them.

use std::time::Duration;

use pardus_core::{
    ChatCompletion, DispatchRequest, DispatchResponse, PardusError, Result, Tool, ToolArgs,
    ToolRegistry, ToolResult,
};
use serde_json::Value;

use crate::config::{API_KEY_ENV, AgentConfig, BASE_URL_ENV, REQUEST_TIMEOUT_SECS, resolve_api_key};

/// The dispatch client.
///
/// Holds the tool registry and a configured HTTP client; [`Agent::run`]
/// performs one full dispatch round trip.
pub struct Agent {
    client: reqwest::Client,
    config: AgentConfig,
    tools: ToolRegistry,
}

impl Agent {
    /// Start building an agent.
    #[must_use]
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    /// Dispatch an instruction and execute whatever tools the model
    /// selected.
    ///
    /// The generated text and every tool outcome are returned together;
    /// tool calls naming unregistered tools are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Fails on schema derivation, transport errors, non-success HTTP
    /// statuses, malformed response JSON, or a failing tool handler.
    pub async fn run(&self, input: &str) -> Result<DispatchResponse> {
        let request = DispatchRequest {
            input: input.to_string(),
            tools: self.tools.schemas()?,
            model: self.config.model.clone(),
        };

        let url = format!("{}/chat", self.config.base_url.trim_end_matches('/'));
        tracing::debug!(%url, tools = self.tools.len(), "dispatching instruction");

        let mut http_request = self.client.post(&url).json(&request);
        if !self.config.api_key.is_empty() {
            http_request = http_request.bearer_auth(&self.config.api_key);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| PardusError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PardusError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| PardusError::Network(e.to_string()))?;
        let value: Value = serde_json::from_str(&body)?;
        let completion = ChatCompletion::from_response_value(value)?;

        self.interpret(completion)
    }

    /// Resolve a parsed completion into text plus executed tool results.
    fn interpret(&self, completion: ChatCompletion) -> Result<DispatchResponse> {
        let Some(choice) = completion.choices.into_iter().next() else {
            tracing::debug!("completion carried no choices");
            return Ok(DispatchResponse::default());
        };

        if let Some(reason) = &choice.finish_reason {
            tracing::debug!(finish_reason = %reason, "completion received");
        }

        let message = choice.message;
        let text = message.content.unwrap_or_default();
        let mut tool_results = Vec::new();

        for call in message.tool_calls {
            let Some(name) = call.function.name else {
                tracing::debug!("tool call without a function name, skipping");
                continue;
            };

            let Some(tool) = self.tools.get(&name) else {
                tracing::warn!(tool = %name, "model called an unregistered tool, skipping");
                continue;
            };

            let args = coerce_arguments(call.function.arguments);
            tracing::debug!(tool = %name, "executing tool call");
            let result = tool
                .invoke(&args)
                .map_err(|e| PardusError::ToolExecution(format!("{name}: {e}")))?;
            tool_results.push(ToolResult { name, result });
        }

        Ok(DispatchResponse { text, tool_results })
    }

    /// Registered tools
    #[must_use]
    pub const fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Decode backend-supplied tool arguments.
///
/// The usual form is a JSON-encoded string; an inline object is accepted
/// as-is. Anything that does not decode to an object falls back to empty
/// arguments rather than failing the run.
fn coerce_arguments(arguments: Option<Value>) -> ToolArgs {
    match arguments {
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::debug!("tool arguments decoded to a non-object, using none");
                ToolArgs::new()
            }
            Err(e) => {
                tracing::debug!("tool arguments failed to decode: {}", e);
                ToolArgs::new()
            }
        },
        Some(Value::Object(map)) => map,
        Some(_) | None => ToolArgs::new(),
    }
}

/// Builder for [`Agent`]
pub struct AgentBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    tools: ToolRegistry,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: None,
            tools: ToolRegistry::new(),
        }
    }

    /// Set the API key explicitly instead of reading `PARDUS_API_KEY`.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the relay endpoint.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Select the model forwarded with every dispatch.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Register a tool. A tool with the same name replaces the earlier
    /// registration.
    #[must_use]
    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.register(tool);
        self
    }

    /// Replace the registry wholesale.
    #[must_use]
    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    /// Finish the build.
    ///
    /// # Errors
    ///
    /// Returns [`PardusError::Config`] when no API key is available, and
    /// when the HTTP client cannot be constructed.
    pub fn build(self) -> Result<Agent> {
        let api_key = resolve_api_key(self.api_key, std::env::var(API_KEY_ENV).ok())?;

        let mut config = AgentConfig::new(api_key);
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        } else if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        if let Some(model) = self.model {
            config.model = model;
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| PardusError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Agent {
            client,
            config,
            tools: self.tools,
        })
    }
}
