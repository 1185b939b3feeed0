//! Ollama Payload Translation
//!
//! Converts the incoming dispatch shape into the OpenAI-compatible
//! chat-completions shape Ollama serves. Tool schemas move from the flat
//! dispatch form into the nested `function` form; the flat form's
//! `required` and `additionalProperties` fields are not forwarded.

use pardus_core::wire::{DispatchRequest, ParameterSet, ToolSchema};
use serde::Serialize;

/// Chat-completions request forwarded to Ollama
#[derive(Debug, Serialize)]
pub struct OllamaChatRequest {
    pub model: String,
    pub messages: Vec<OllamaMessage>,

    /// Omitted entirely when the dispatch carried no tools
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<OllamaTool>>,
}

#[derive(Debug, Serialize)]
pub struct OllamaMessage {
    pub role: &'static str,
    pub content: String,
}

/// Nested OpenAI tool form
#[derive(Debug, Serialize)]
pub struct OllamaTool {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: OllamaFunction,
}

#[derive(Debug, Serialize)]
pub struct OllamaFunction {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSet,
}

impl OllamaChatRequest {
    /// Build the forwarded payload: the instruction becomes a single user
    /// message and each tool schema is re-nested.
    pub fn from_dispatch(request: DispatchRequest) -> Self {
        let tools: Vec<OllamaTool> = request
            .tools
            .into_iter()
            .map(OllamaTool::from_schema)
            .collect();

        Self {
            model: request.model,
            messages: vec![OllamaMessage {
                role: "user",
                content: request.input,
            }],
            tools: if tools.is_empty() { None } else { Some(tools) },
        }
    }
}

impl OllamaTool {
    fn from_schema(schema: ToolSchema) -> Self {
        Self {
            kind: "function",
            function: OllamaFunction {
                name: schema.name,
                description: schema.description,
                parameters: schema.parameters,
            },
        }
    }
}
