//! Minimal dispatch walkthrough against a local relay.
//!
//! Start the relay first (`cargo run --bin pardus-relay`), then:
//!
//!   cargo run --example simple_agent
//!
//! The relay URL defaults to http://localhost:8080; override it with
//! PARDUS_BASE_URL. The empty API key is fine for a relay with auth
//! disabled.

use pardus_agent::{Agent, ParamType, Tool, ToolSpec};
use serde_json::{Value, json};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let add = Tool::new(
        ToolSpec::new("add")
            .description("Add two integers")
            .param("a", ParamType::Integer)
            .param("b", ParamType::Integer)
            .describe("a", "First addend")
            .describe("b", "Second addend"),
        |args| {
            let a = args.get("a").and_then(Value::as_i64).unwrap_or(0);
            let b = args.get("b").and_then(Value::as_i64).unwrap_or(0);
            Ok(json!(a + b))
        },
    );

    let minus = Tool::new(
        ToolSpec::new("minus")
            .description("Subtract the second integer from the first")
            .param("a", ParamType::Integer)
            .param("b", ParamType::Integer),
        |args| {
            let a = args.get("a").and_then(Value::as_i64).unwrap_or(0);
            let b = args.get("b").and_then(Value::as_i64).unwrap_or(0);
            Ok(json!(a - b))
        },
    );

    let base_url = std::env::var("PARDUS_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:8080".to_string());

    let agent = Agent::builder()
        .api_key("")
        .base_url(base_url)
        .tool(add)
        .tool(minus)
        .build()?;

    let outcome = agent.run("What is 7 minus 2? Use a tool.").await?;

    if !outcome.text.is_empty() {
        println!("Model said: {}", outcome.text);
    }
    for tool_result in &outcome.tool_results {
        println!("Tool '{}' returned: {}", tool_result.name, tool_result.result);
    }

    Ok(())
}
