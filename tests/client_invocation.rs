//! Streaming client against live tool servers and hand-built streams.

mod common;

use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::{Map, Value, json};
use streaming_mcp_host::core::ToolServer;
use streaming_mcp_host::domains::client::{
    InvocationErrorKind, MathClient, ToolClient, ToolInvocationError, WeatherClient,
};
use streaming_mcp_host::domains::tools::definitions::TemperatureUnit;
use streaming_mcp_host::domains::tools::{
    EVENT_STREAM_CONTENT_TYPE, EventStatus, FnTool, ToolError, ToolRegistry,
};
use tokio_test::{assert_err, assert_ok};

/// Serve `body` verbatim as the event stream of every tool.
async fn spawn_canned(body: &'static str) -> String {
    let app = Router::new().route(
        "/tools/{tool_name}",
        post(move || async move {
            ([(header::CONTENT_TYPE, EVENT_STREAM_CONTENT_TYPE)], body).into_response()
        }),
    );
    common::spawn(app).await
}

fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[tokio::test]
async fn math_add_reduces_to_total() {
    let base = common::spawn_math().await;
    let math = MathClient::new(common::client(&base));

    let response = assert_ok!(math.add(7.0, 5.0).await);
    assert_eq!(response.tool_name, "add");
    assert_eq!(response.result["total"].as_f64(), Some(12.0));
    assert_eq!(response.events.first().unwrap().status, EventStatus::Started);
    assert_eq!(response.events.last().unwrap().status, EventStatus::Completed);
}

#[tokio::test]
async fn math_calculate_dispatches_by_name() {
    let base = common::spawn_math().await;
    let math = MathClient::new(common::client(&base));

    let response = assert_ok!(math.calculate("subtract", 10.0, 4.0).await);
    assert_eq!(response.result["total"].as_f64(), Some(6.0));
    assert_eq!(response.result["operation"], "subtract");
}

#[tokio::test]
async fn weather_london_is_cloudy() {
    let base = common::spawn_weather().await;
    let weather = WeatherClient::new(common::client(&base));

    let response = assert_ok!(weather.current_weather("London", TemperatureUnit::Celsius).await);
    assert_eq!(response.result["condition"], "cloudy");
    assert_eq!(response.result["temperature"].as_f64(), Some(16.0));
    assert!(
        response
            .events
            .iter()
            .any(|event| event.status == EventStatus::Progress)
    );
}

#[tokio::test]
async fn unknown_tool_is_rejected_with_404() {
    let base = common::spawn_math().await;
    let client = common::client(&base);

    let err = assert_err!(client.invoke("divide", args(json!({"a": 1, "b": 2}))).await);
    assert_eq!(err.kind(), InvocationErrorKind::InvocationRejected);
    match err {
        ToolInvocationError::InvocationRejected { status, tool, .. } => {
            assert_eq!(status, 404);
            assert_eq!(tool, "divide");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn failing_tool_reports_missing_result_with_message() {
    let registry = ToolRegistry::new().with_tool(FnTool::new("explode", "Always fails", |_| async {
        Err::<Value, _>(ToolError::execution_failed("kaboom"))
    }));
    let base = common::spawn_tool_server(ToolServer::new("Faulty", registry)).await;

    let err = assert_err!(common::client(&base).invoke("explode", Map::new()).await);
    match err {
        ToolInvocationError::MissingResult { reported, .. } => {
            assert_eq!(reported.as_deref(), Some("kaboom"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unknown_location_fails_after_terminal_error_event() {
    let base = common::spawn_weather().await;
    let weather = WeatherClient::new(common::client(&base));

    let err = assert_err!(weather.current_weather("Atlantis", TemperatureUnit::Celsius).await);
    assert_eq!(err.kind(), InvocationErrorKind::MissingResult);
    assert!(err.to_string().contains("Atlantis"));
}

#[tokio::test]
async fn malformed_line_is_classified() {
    let base = spawn_canned("{\"status\": \"started\", \"tool\": \"add\"}\nnot json\n").await;

    let err = assert_err!(common::client(&base).invoke("add", Map::new()).await);
    assert_eq!(err.kind(), InvocationErrorKind::MalformedEvent);
    match err {
        ToolInvocationError::MalformedEvent { line, .. } => assert_eq!(line, "not json"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_body_is_an_empty_stream() {
    let base = spawn_canned("\n\n").await;

    let err = assert_err!(common::client(&base).invoke("add", Map::new()).await);
    assert_eq!(err.kind(), InvocationErrorKind::EmptyStream);
}

#[tokio::test]
async fn stream_without_result_is_missing_result() {
    let base = spawn_canned(
        "{\"status\": \"started\", \"tool\": \"add\"}\n{\"status\": \"progress\", \"message\": \"processing\"}\n",
    )
    .await;

    let err = assert_err!(common::client(&base).invoke("add", Map::new()).await);
    match err {
        ToolInvocationError::MissingResult { reported, .. } => assert!(reported.is_none()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn final_line_without_newline_is_decoded() {
    let base = spawn_canned(
        "{\"status\": \"started\", \"tool\": \"add\"}\r\n{\"status\": \"completed\", \"result\": 3}",
    )
    .await;

    let response = assert_ok!(common::client(&base).invoke("add", Map::new()).await);
    assert_eq!(response.result, json!(3));
    assert_eq!(response.events.len(), 2);
}

#[tokio::test]
async fn connection_cut_before_terminal_event_is_transport_failure() {
    let app = Router::new().route(
        "/tools/{tool_name}",
        post(|| async {
            let body = async_stream::stream! {
                yield Ok::<_, std::io::Error>(Bytes::from_static(
                    b"{\"status\": \"started\", \"tool\": \"add\"}\n",
                ));
                tokio::task::yield_now().await;
                yield Err(std::io::Error::other("connection dropped"));
            };
            (
                [(header::CONTENT_TYPE, EVENT_STREAM_CONTENT_TYPE)],
                Body::from_stream(body),
            )
        }),
    );
    let base = common::spawn(app).await;

    let err = assert_err!(common::client(&base).invoke("add", Map::new()).await);
    assert_eq!(err.kind(), InvocationErrorKind::TransportFailure);
}

#[tokio::test]
async fn non_success_status_carries_body() {
    let app = Router::new().route(
        "/tools/{tool_name}",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
    );
    let base = common::spawn(app).await;

    let err = assert_err!(common::client(&base).invoke("add", Map::new()).await);
    match err {
        ToolInvocationError::InvocationRejected { status, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ToolClient::new(format!("http://{addr}"), Duration::from_secs(2)).unwrap();
    let err = assert_err!(client.invoke("add", Map::new()).await);
    assert_eq!(err.kind(), InvocationErrorKind::TransportFailure);
}

#[tokio::test]
async fn slow_tool_exceeding_timeout_is_transport_failure() {
    let registry = ToolRegistry::new().with_tool(FnTool::new("slow", "Takes its time", |_| async {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Ok::<_, ToolError>(json!("late"))
    }));
    let base = common::spawn_tool_server(ToolServer::new("Slow", registry)).await;

    let client = common::client(&base).with_timeout(Duration::from_millis(200));
    let err = assert_err!(client.invoke("slow", Map::new()).await);
    assert_eq!(err.kind(), InvocationErrorKind::TransportFailure);
}

#[tokio::test]
async fn unsupported_operation_never_reaches_the_network() {
    let math = MathClient::new(common::client("http://127.0.0.1:9"));

    let err = assert_err!(math.calculate("divide", 1.0, 2.0).await);
    assert_eq!(err.kind(), InvocationErrorKind::UnsupportedOperation);
    assert_eq!(err.to_string(), "Unsupported math operation 'divide'");
}

#[tokio::test]
async fn concurrent_invocations_share_one_client() {
    let base = common::spawn_math().await;
    let math = MathClient::new(common::client(&base));

    let (sum, product, difference) = tokio::join!(
        math.add(1.0, 2.0),
        math.multiply(3.0, 4.0),
        math.subtract(9.0, 5.0),
    );
    assert_eq!(assert_ok!(sum).result["total"].as_f64(), Some(3.0));
    assert_eq!(assert_ok!(product).result["total"].as_f64(), Some(12.0));
    assert_eq!(assert_ok!(difference).result["total"].as_f64(), Some(4.0));
}

#[tokio::test]
async fn discover_reads_manifest() {
    let base = common::spawn_weather().await;
    let manifest = assert_ok!(common::client(&base).discover().await);

    assert_eq!(manifest.tools, vec!["current_weather"]);
    assert!(manifest.descriptors[0].input_schema.is_some());
}
