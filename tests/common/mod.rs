use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use futures::StreamExt;
use serde_json::Value;
use streaming_mcp_host::core::{ToolServer, tool_server_routes};
use streaming_mcp_host::domains::client::ToolClient;
use streaming_mcp_host::domains::tools::definitions::{
    MATH_SERVER_NAME, WEATHER_SERVER_NAME, math_metadata, math_registry, weather_registry,
};
use tower::ServiceExt;

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port should bind");
    let addr = listener.local_addr().expect("listener should have an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server should run");
    });
    format!("http://{addr}")
}

/// Serve a tool server and return its base URL.
pub async fn spawn_tool_server(server: ToolServer) -> String {
    spawn(tool_server_routes(server)).await
}

#[allow(dead_code)]
pub async fn spawn_math() -> String {
    spawn_tool_server(
        ToolServer::new(MATH_SERVER_NAME, math_registry()).with_metadata(math_metadata()),
    )
    .await
}

#[allow(dead_code)]
pub async fn spawn_weather() -> String {
    spawn_tool_server(
        ToolServer::new(WEATHER_SERVER_NAME, weather_registry()).with_progress_heartbeat(true),
    )
    .await
}

pub fn client(base_url: &str) -> ToolClient {
    ToolClient::with_http_client(base_url, reqwest::Client::new())
}

/// POST raw arguments and decode every non-empty body line.
#[allow(dead_code)]
pub async fn stream_events(base_url: &str, tool: &str, arguments: Value) -> (u16, Vec<Value>) {
    let response = reqwest::Client::new()
        .post(format!("{base_url}/tools/{tool}"))
        .json(&arguments)
        .send()
        .await
        .expect("request should be sent");
    let status = response.status().as_u16();

    // Keep whatever arrived before an aborted body.
    let mut body = Vec::new();
    let mut chunks = response.bytes_stream();
    while let Some(Ok(chunk)) = chunks.next().await {
        body.extend_from_slice(&chunk);
    }

    let events = String::from_utf8_lossy(&body)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("every line should be JSON"))
        .collect();
    (status, events)
}

/// Send a JSON POST through an in-process router and return `(status, body)`.
#[allow(dead_code)]
pub async fn post_json(app: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request build should succeed"),
        )
        .await
        .expect("app should handle request");

    let status = resp.status();
    let body = to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("response body should be readable");
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}
