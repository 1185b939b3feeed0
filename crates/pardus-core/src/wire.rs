//! Wire Format
//!
//! JSON shapes exchanged with the relay server and the chat-completion
//! backend behind it. Request types serialize exactly as the dispatch
//! protocol expects; backend response types deserialize leniently so a
//! partial payload degrades to empty fields instead of a hard failure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Model applied when a dispatch request does not name one.
pub const DEFAULT_MODEL: &str = "llama3.2";

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// The `parameters` block of a tool schema: a JSON-Schema object whose
/// `properties` keep parameter declaration order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Always `"object"`
    #[serde(rename = "type")]
    pub kind: String,

    /// Parameter name -> `{"type", "description"}` property object
    pub properties: Map<String, Value>,
}

/// Wire form of a tool descriptor.
///
/// `required` and `additionalProperties` sit at the top level, next to
/// `parameters`, not inside it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Always `"function"`
    #[serde(rename = "type")]
    pub kind: String,

    /// Tool identifier the model calls it by
    pub name: String,

    /// Human-readable description shown to the model
    pub description: String,

    /// Parameter properties, in declaration order
    pub parameters: ParameterSet,

    /// Parameters advertised as required; empty unless the caller set them
    #[serde(default)]
    pub required: Vec<String>,

    #[serde(rename = "additionalProperties", default)]
    pub additional_properties: bool,
}

/// Request body for `POST /chat`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DispatchRequest {
    /// Natural-language instruction
    pub input: String,

    /// Schemas of every tool the model may call
    #[serde(default)]
    pub tools: Vec<ToolSchema>,

    /// Model identifier; the relay fills in the default when omitted
    #[serde(default = "default_model")]
    pub model: String,
}

/// Outcome of one executed tool call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool that was called
    pub name: String,

    /// Whatever the tool function returned
    pub result: Value,
}

/// Aggregated result of a dispatch run: generated text plus the output of
/// every tool the model asked for.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DispatchResponse {
    /// Generated text, empty when the backend produced none
    pub text: String,

    /// One entry per executed tool call, in backend order
    #[serde(default)]
    pub tool_results: Vec<ToolResult>,
}

// ============================================================================
// Backend response shapes (OpenAI tool-calling form)
// ============================================================================

/// Chat-completion payload as returned by the backend.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

impl ChatCompletion {
    /// Deserialize a backend response, accepting both the bare
    /// `{"choices": ..}` shape and the `{"response": {"choices": ..}}`
    /// envelope used by older deployments.
    pub fn from_response_value(value: Value) -> serde_json::Result<Self> {
        let payload = match value {
            Value::Object(mut map) => match map.remove("response") {
                Some(inner) => inner,
                None => Value::Object(map),
            },
            other => other,
        };
        serde_json::from_value(payload)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: ChatMessage,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: Option<String>,

    /// Generated text; absent when the model only called tools
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

/// A backend-issued instruction to invoke one named tool.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub function: FunctionCall,
}

/// Function name plus arguments as supplied by the backend.
///
/// `arguments` is usually a JSON-encoded string, but some backends inline
/// the decoded object; both forms are tolerated.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub arguments: Option<Value>,
}
