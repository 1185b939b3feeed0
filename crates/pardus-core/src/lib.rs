//! # pardus-core
//!
//! Tool descriptors, wire types and the error taxonomy shared by the
//! pardus dispatch client and relay server.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   POST /chat    ┌──────────────┐    OpenAI    ┌─────────┐
//! │    Agent     │────────────────▶│    Relay     │─────────────▶│ Backend │
//! │ (tools local)│◀────────────────│   Server     │◀─────────────│ (Ollama)│
//! └──────┬───────┘   completion    └──────────────┘              └─────────┘
//!        │
//!        ▼ executes model-selected tool calls locally
//! ```
//!
//! Tools never leave the process: only their schemas travel to the model,
//! and the returned tool calls are resolved against the local registry.

pub mod error;
pub mod tool;
pub mod wire;

pub use error::{PardusError, Result};
pub use tool::{ParamType, Tool, ToolArgs, ToolHandler, ToolRegistry, ToolSpec};
pub use wire::{
    ChatCompletion, DEFAULT_MODEL, DispatchRequest, DispatchResponse, ToolResult, ToolSchema,
};
