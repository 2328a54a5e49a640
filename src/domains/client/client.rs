//! Generic streaming tool client.

use std::time::Duration;

use futures::StreamExt;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use super::decoder::{EventAccumulator, LineBuffer, ToolResponse};
use super::ToolInvocationError;
use crate::core::server::ServerManifest;

/// Default bound on a whole invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the metadata document on a tool server.
pub const MANIFEST_PATH: &str = "/.well-known/mcp.json";

/// Client for one tool server.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ToolClient {
    base_url: String,
    http: reqwest::Client,
    timeout: Duration,
}

impl ToolClient {
    /// Create a client with its own connection pool.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http_client(base_url, http).with_timeout(timeout))
    }

    /// Create a client on top of an existing `reqwest::Client`.
    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Invoke a tool and reduce its event stream.
    ///
    /// Either every event up to the terminal one is consumed and reduced,
    /// or a classified error is returned; the response body is dropped on
    /// every path.
    #[instrument(skip(self, arguments), fields(base_url = %self.base_url))]
    pub async fn invoke(
        &self,
        tool_name: &str,
        arguments: Map<String, Value>,
    ) -> Result<ToolResponse, ToolInvocationError> {
        info!("Invoking remote tool: {}", tool_name);

        let response = self
            .http
            .post(self.url(&format!("/tools/{tool_name}")))
            .timeout(self.timeout)
            .json(&Value::Object(arguments))
            .send()
            .await
            .map_err(|e| ToolInvocationError::transport(tool_name, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Tool {} rejected with status {}", tool_name, status);
            return Err(ToolInvocationError::InvocationRejected {
                tool: tool_name.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let mut lines = LineBuffer::new();
        let mut events = EventAccumulator::new(tool_name);
        let mut body = response.bytes_stream();

        while let Some(chunk) = body.next().await {
            match chunk {
                Ok(bytes) => {
                    for line in lines.push(&bytes) {
                        events.push_line(&line)?;
                    }
                }
                // The server aborts the body right after an `error` event;
                // once a terminal event is in hand it decides the outcome.
                Err(e) if events.has_terminal() => {
                    debug!("Stream for {} closed after terminal event: {}", tool_name, e);
                    break;
                }
                Err(e) => return Err(ToolInvocationError::transport(tool_name, e)),
            }
        }

        if let Some(line) = lines.finish() {
            events.push_line(&line)?;
        }

        debug!("Received {} events from {}", events.len(), tool_name);
        events.finish()
    }

    /// Fetch the server's metadata document.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn discover(&self) -> Result<ServerManifest, ToolInvocationError> {
        let response = self
            .http
            .get(self.url(MANIFEST_PATH))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ToolInvocationError::transport(MANIFEST_PATH, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolInvocationError::InvocationRejected {
                tool: MANIFEST_PATH.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ServerManifest>()
            .await
            .map_err(|e| ToolInvocationError::transport(MANIFEST_PATH, e))
    }
}
