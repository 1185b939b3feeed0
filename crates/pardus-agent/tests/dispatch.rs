//! Dispatch round-trip tests against a mock relay.

use mockito::{Matcher, Server};
use pardus_agent::{Agent, ParamType, PardusError, Tool, ToolSpec};
use serde_json::{Value, json};

fn add_tool() -> Tool {
    let spec = ToolSpec::new("add")
        .description("Add two integers")
        .param("a", ParamType::Integer)
        .param("b", ParamType::Integer);
    Tool::new(spec, |args| {
        let a = args.get("a").and_then(Value::as_i64).unwrap_or(0);
        let b = args.get("b").and_then(Value::as_i64).unwrap_or(0);
        Ok(json!(a + b))
    })
}

fn minus_tool() -> Tool {
    let spec = ToolSpec::new("minus")
        .description("Subtract the second integer from the first")
        .param("a", ParamType::Integer)
        .param("b", ParamType::Integer);
    Tool::new(spec, |args| {
        let a = args.get("a").and_then(Value::as_i64).unwrap_or(0);
        let b = args.get("b").and_then(Value::as_i64).unwrap_or(0);
        Ok(json!(a - b))
    })
}

/// Reports how many arguments actually reached the handler.
fn argc_tool() -> Tool {
    let spec = ToolSpec::new("argc").param("x", ParamType::String);
    Tool::new(spec, |args| Ok(json!({ "argc": args.len() })))
}

fn agent_for(server: &Server, api_key: &str) -> Agent {
    Agent::builder()
        .api_key(api_key)
        .base_url(server.url())
        .tool(add_tool())
        .tool(minus_tool())
        .tool(argc_tool())
        .build()
        .unwrap()
}

fn tool_call_body(name: &str, arguments: Value) -> String {
    json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_0",
                    "type": "function",
                    "function": {"name": name, "arguments": arguments}
                }]
            },
            "finish_reason": "tool_calls"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_dispatch_executes_selected_tool() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .match_body(Matcher::PartialJson(json!({
            "input": "Add 5 and 3",
            "model": "llama3.2",
            "tools": [
                {"type": "function", "name": "add", "additionalProperties": false}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(tool_call_body("add", json!("{\"a\": 5, \"b\": 3}")))
        .create_async()
        .await;

    let agent = agent_for(&server, "test-key");
    let outcome = agent.run("Add 5 and 3").await.unwrap();

    mock.assert_async().await;
    assert!(outcome.text.is_empty());
    assert_eq!(outcome.tool_results.len(), 1);
    assert_eq!(outcome.tool_results[0].name, "add");
    assert_eq!(outcome.tool_results[0].result, json!(8));
}

#[tokio::test]
async fn test_dispatch_returns_plain_text() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{
                    "message": {"role": "assistant", "content": "Just an answer."},
                    "finish_reason": "stop"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let agent = agent_for(&server, "test-key");
    let outcome = agent.run("Say something").await.unwrap();

    assert_eq!(outcome.text, "Just an answer.");
    assert!(outcome.tool_results.is_empty());
}

#[tokio::test]
async fn test_unregistered_tool_call_is_skipped() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body(tool_call_body("launch_rockets", json!("{}")))
        .create_async()
        .await;

    let agent = agent_for(&server, "test-key");
    let outcome = agent.run("Do something dangerous").await.unwrap();

    assert!(outcome.tool_results.is_empty());
}

#[tokio::test]
async fn test_malformed_arguments_invoke_with_none() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body(tool_call_body("argc", json!("{{{ not json")))
        .create_async()
        .await;

    let agent = agent_for(&server, "test-key");
    let outcome = agent.run("Count your arguments").await.unwrap();

    assert_eq!(outcome.tool_results.len(), 1);
    assert_eq!(outcome.tool_results[0].result, json!({"argc": 0}));
}

#[tokio::test]
async fn test_wrapped_response_envelope_is_unwrapped() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body(
            json!({
                "response": {
                    "choices": [{
                        "message": {"role": "assistant", "content": "wrapped"}
                    }]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let agent = agent_for(&server, "test-key");
    let outcome = agent.run("hello").await.unwrap();

    assert_eq!(outcome.text, "wrapped");
}

#[tokio::test]
async fn test_backend_error_carries_status_and_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat")
        .with_status(500)
        .with_body(r#"{"detail": "boom"}"#)
        .create_async()
        .await;

    let agent = agent_for(&server, "test-key");
    let err = agent.run("hello").await.unwrap_err();

    match err {
        PardusError::Backend { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_api_key_sent_as_bearer_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .match_header("authorization", "Bearer secret-key")
        .with_status(200)
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let agent = agent_for(&server, "secret-key");
    agent.run("hello").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_api_key_sends_no_auth_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let agent = agent_for(&server, "");
    agent.run("hello").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_failing_tool_handler_surfaces_as_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body(tool_call_body("fragile", json!("{}")))
        .create_async()
        .await;

    let fragile = Tool::new(ToolSpec::new("fragile"), |_| {
        Err(PardusError::ToolExecution("window broke".into()))
    });
    let agent = Agent::builder()
        .api_key("test-key")
        .base_url(server.url())
        .tool(fragile)
        .build()
        .unwrap();

    let err = agent.run("break it").await.unwrap_err();
    assert!(matches!(err, PardusError::ToolExecution(_)));
    assert!(err.to_string().contains("fragile"));
}

#[tokio::test]
async fn test_invalid_response_json_is_a_json_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body("this is not json")
        .create_async()
        .await;

    let agent = agent_for(&server, "test-key");
    let err = agent.run("hello").await.unwrap_err();

    assert!(matches!(err, PardusError::Json(_)));
}
