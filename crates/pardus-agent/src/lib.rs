//! # pardus-agent
//!
//! Dispatch client for the pardus relay. Register local tools, send an
//! instruction, and the model-selected tool calls come back and run in
//! this process.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pardus_agent::{Agent, ParamType, Tool, ToolSpec};
//!
//! let add = Tool::new(
//!     ToolSpec::new("add")
//!         .description("Add two integers")
//!         .param("a", ParamType::Integer)
//!         .param("b", ParamType::Integer),
//!     |args| {
//!         let a = args.get("a").and_then(|v| v.as_i64()).unwrap_or(0);
//!         let b = args.get("b").and_then(|v| v.as_i64()).unwrap_or(0);
//!         Ok(serde_json::json!(a + b))
//!     },
//! );
//!
//! let agent = Agent::builder()
//!     .base_url("http://localhost:8080")
//!     .api_key("")
//!     .tool(add)
//!     .build()?;
//!
//! let outcome = agent.run("What is 5 plus 3?").await?;
//! ```

pub mod client;
pub mod config;

pub use client::{Agent, AgentBuilder};
pub use config::{API_KEY_ENV, AgentConfig, BASE_URL_ENV, DEFAULT_BASE_URL};

// Re-export core types for convenience
pub use pardus_core::{
    DispatchResponse, ParamType, PardusError, Result, Tool, ToolArgs, ToolRegistry, ToolResult,
    ToolSpec,
};
