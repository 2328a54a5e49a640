//! HTTP transport implementation.
//!
//! Two applications share this transport:
//!
//! - a tool server: `POST /tools/{tool_name}` streams newline-delimited
//!   events, `GET /.well-known/mcp.json` describes the registry;
//! - the conversation host: `POST /conversation`.

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use futures::StreamExt;
use serde_json::{Map, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

use super::{TransportConfig, TransportError, TransportResult};
use crate::core::server::{EventStream, ToolServer};
use crate::domains::client::MANIFEST_PATH;
use crate::domains::conversation::{
    ConversationError, ConversationRequest, ConversationResponse, ConversationRouter,
};
use crate::domains::tools::{EVENT_STREAM_CONTENT_TYPE, ToolError};

/// HTTP transport handler.
pub struct HttpTransport {
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Serve `app` until the listener fails.
    pub async fn run(self, app: Router) -> TransportResult<()> {
        let addr = self.address();

        let mut app = app.layer(TraceLayer::new_for_http());

        // Add CORS if enabled
        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::serve(&addr, e))?;

        Ok(())
    }
}

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "detail": message.into() }))).into_response()
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

// ============================================================================
// Tool server
// ============================================================================

/// Routes of a tool server.
pub fn tool_server_routes(server: ToolServer) -> Router {
    Router::new()
        .route("/tools/{tool_name}", post(invoke_tool))
        .route(MANIFEST_PATH, get(manifest))
        .route("/health", get(health_check))
        .route("/", get(tool_server_root))
        .with_state(server)
}

/// Root handler - provides API info.
async fn tool_server_root(State(server): State<ToolServer>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": server.name(),
        "version": env!("CARGO_PKG_VERSION"),
        "transport": "HTTP",
        "endpoints": {
            "invoke": "/tools/{tool_name}",
            "metadata": MANIFEST_PATH,
            "health": "/health"
        }
    }))
}

async fn manifest(State(server): State<ToolServer>) -> impl IntoResponse {
    Json(server.manifest())
}

/// Decode the request body into keyword arguments. An empty body means none.
fn decode_arguments(body: &[u8]) -> Result<Map<String, Value>, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(arguments)) => Ok(arguments),
        Ok(_) => Err("Request body must be a JSON object".to_string()),
        Err(e) => Err(format!("Request body is not valid JSON: {e}")),
    }
}

/// Invoke a tool and stream its events.
#[instrument(skip(server, body))]
async fn invoke_tool(
    State(server): State<ToolServer>,
    Path(tool_name): Path<String>,
    body: Bytes,
) -> Response {
    let invocation = match server.prepare(&tool_name) {
        Ok(invocation) => invocation,
        Err(e) => return detail(StatusCode::NOT_FOUND, e.to_string()),
    };

    let arguments = match decode_arguments(&body) {
        Ok(arguments) => arguments,
        Err(message) => {
            warn!("Rejected arguments for {}: {}", tool_name, message);
            return detail(StatusCode::BAD_REQUEST, message);
        }
    };

    (
        [(header::CONTENT_TYPE, EVENT_STREAM_CONTENT_TYPE)],
        event_body(tool_name, invocation.stream(arguments)),
    )
        .into_response()
}

/// Encode events as lines. A tool failure aborts the body after its
/// `error` event has been handed to the connection.
fn event_body(tool_name: String, mut events: EventStream) -> Body {
    let lines = async_stream::stream! {
        while let Some(item) = events.next().await {
            match item {
                Ok(event) => match event.to_line() {
                    Ok(line) => yield Ok(line),
                    Err(e) => {
                        error!("Failed to encode event for {}: {}", tool_name, e);
                        yield Err(ToolError::internal(e.to_string()));
                        break;
                    }
                },
                Err(err) => {
                    // Returning Pending once lets the connection flush the error event.
                    tokio::task::yield_now().await;
                    error!("Tool {} failed: {}", tool_name, err);
                    yield Err(err);
                }
            }
        }
    };
    Body::from_stream(lines)
}

// ============================================================================
// Conversation host
// ============================================================================

/// Routes of the conversation host.
pub fn conversation_routes(router: ConversationRouter) -> Router {
    Router::new()
        .route("/conversation", post(conversation))
        .route("/health", get(health_check))
        .route("/", get(conversation_root))
        .with_state(router)
}

async fn conversation_root() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "conversation-host",
        "status": "ok"
    }))
}

#[instrument(skip_all)]
async fn conversation(
    State(router): State<ConversationRouter>,
    Json(request): Json<ConversationRequest>,
) -> Result<Json<ConversationResponse>, ConversationError> {
    info!("Received conversation turn: {}", request.interaction_id);
    router.respond(request).await.map(Json)
}

impl IntoResponse for ConversationError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UpstreamFailure { .. } => StatusCode::BAD_GATEWAY,
        };
        detail(status, self.to_string())
    }
}
