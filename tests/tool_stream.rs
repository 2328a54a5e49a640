//! Event emission contract of a live tool server.

mod common;

use std::time::Duration;

use serde_json::{Value, json};
use streaming_mcp_host::core::ToolServer;
use streaming_mcp_host::domains::tools::{FnTool, ToolError, ToolRegistry};

fn statuses(events: &[Value]) -> Vec<&str> {
    events.iter().map(|e| e["status"].as_str().unwrap()).collect()
}

/// `started` first, exactly one terminal event, and it is last.
fn assert_well_ordered(events: &[Value]) {
    assert_eq!(events[0]["status"], "started");
    let terminal: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| e["status"] == "completed" || e["status"] == "error")
        .map(|(i, _)| i)
        .collect();
    assert_eq!(terminal, vec![events.len() - 1]);
}

#[tokio::test]
async fn math_add_streams_started_then_completed() {
    let base = common::spawn_math().await;
    let (status, events) = common::stream_events(&base, "add", json!({"a": 2, "b": 3})).await;

    assert_eq!(status, 200);
    assert_eq!(statuses(&events), vec!["started", "completed"]);
    assert_eq!(events[0]["tool"], "add");
    assert_eq!(events[1]["result"]["total"].as_f64(), Some(5.0));
}

#[tokio::test]
async fn math_multiply_result() {
    let base = common::spawn_math().await;
    let (_, events) = common::stream_events(&base, "multiply", json!({"a": 4, "b": 6})).await;

    assert_well_ordered(&events);
    assert_eq!(events.last().unwrap()["result"]["total"].as_f64(), Some(24.0));
}

#[tokio::test]
async fn weather_stream_contains_progress_event() {
    let base = common::spawn_weather().await;
    let (_, events) = common::stream_events(
        &base,
        "current_weather",
        json!({"location": "London", "unit": "celsius"}),
    )
    .await;

    assert_well_ordered(&events);
    assert_eq!(statuses(&events), vec!["started", "progress", "completed"]);
    assert_eq!(events[1]["message"], "processing");
    assert_eq!(events[2]["result"]["location"], "London");
}

#[tokio::test]
async fn weather_fahrenheit_conversion() {
    let base = common::spawn_weather().await;
    let (_, events) = common::stream_events(
        &base,
        "current_weather",
        json!({"location": "London", "unit": "fahrenheit"}),
    )
    .await;

    let result = &events.last().unwrap()["result"];
    assert_eq!(result["temperature"].as_f64(), Some(60.8));
    assert_eq!(result["unit"], "fahrenheit");
}

#[tokio::test]
async fn unknown_tool_returns_404_and_no_events() {
    let base = common::spawn_math().await;
    let (status, events) = common::stream_events(&base, "divide", json!({"a": 1, "b": 2})).await;

    assert_eq!(status, 404);
    // The 404 body is a single JSON detail object, never an event.
    assert!(events.iter().all(|e| e.get("status").is_none()));
}

#[tokio::test]
async fn failing_tool_ends_with_error_event() {
    let registry = ToolRegistry::new().with_tool(FnTool::new("explode", "Always fails", |_| async {
        Err::<Value, _>(ToolError::execution_failed("kaboom"))
    }));
    let base = common::spawn_tool_server(ToolServer::new("Faulty", registry)).await;

    let (status, events) = common::stream_events(&base, "explode", json!({})).await;

    assert_eq!(status, 200);
    assert_well_ordered(&events);
    assert_eq!(statuses(&events), vec!["started", "error"]);
    assert_eq!(events[1]["error"], "kaboom");
}

#[tokio::test]
async fn argument_mismatch_is_an_error_event_not_a_transport_failure() {
    let base = common::spawn_math().await;
    let (status, events) = common::stream_events(&base, "add", json!({"a": "two"})).await;

    assert_eq!(status, 200);
    assert_well_ordered(&events);
    assert_eq!(events.last().unwrap()["status"], "error");
}

#[tokio::test]
async fn slow_async_tool_looks_like_a_sync_one() {
    let registry = ToolRegistry::new().with_tool(FnTool::new("nap", "Sleeps then answers", |_| async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok::<_, ToolError>(json!({"slept": true}))
    }));
    let base = common::spawn_tool_server(ToolServer::new("Sleepy", registry)).await;

    let (_, events) = common::stream_events(&base, "nap", json!({})).await;
    assert_eq!(statuses(&events), vec!["started", "completed"]);
    assert_eq!(events[1]["result"], json!({"slept": true}));
}

#[tokio::test]
async fn manifest_lists_registered_tools() {
    let base = common::spawn_math().await;
    let manifest = common::client(&base).discover().await.unwrap();

    assert_eq!(manifest.name, "Math Toolkit");
    assert_eq!(manifest.tools, vec!["add", "subtract", "multiply"]);
    assert_eq!(
        manifest.metadata["description"],
        "Basic arithmetic operations exposed over MCP."
    );
    assert_eq!(manifest.descriptors.len(), 3);
}
