//! Line-delimited JSON serving loop
//!
//! The host writes one request per line and reads one response per line:
//!
//! ```text
//! {"op":"schema"}
//! {"op":"create","resource":"wistia_project","state":{"name":"Demo"}}
//! ```
//!
//! Every request gets exactly one response, including malformed ones.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};
use wistia_client::WistiaClient;

use crate::error::{Action, ProviderError};
use crate::resources::ResourceRegistry;
use crate::schema::ResourceSchema;

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Request {
    Schema,
    Create { resource: String, state: Value },
    Read { resource: String, state: Value },
    Update { resource: String, state: Value },
    Delete { resource: String, state: Value },
}

impl Request {
    fn into_parts(self) -> Option<(Action, String, Value)> {
        match self {
            Self::Schema => None,
            Self::Create { resource, state } => Some((Action::Create, resource, state)),
            Self::Read { resource, state } => Some((Action::Read, resource, state)),
            Self::Update { resource, state } => Some((Action::Update, resource, state)),
            Self::Delete { resource, state } => Some((Action::Delete, resource, state)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<ResourceSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    fn ok(state: Option<Value>) -> Self {
        Self {
            ok: true,
            state,
            schemas: None,
            error: None,
        }
    }

    fn schemas(schemas: Vec<ResourceSchema>) -> Self {
        Self {
            schemas: Some(schemas),
            ..Self::ok(None)
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            state: None,
            schemas: None,
            error: Some(message.into()),
        }
    }
}

/// Serves resource requests against one Wistia account.
#[derive(Clone)]
pub struct ProviderServer {
    client: WistiaClient,
    registry: ResourceRegistry,
}

impl ProviderServer {
    #[must_use]
    pub fn new(client: WistiaClient, registry: ResourceRegistry) -> Self {
        Self { client, registry }
    }

    /// Answer a single request line.
    pub async fn handle_line(&self, line: &str) -> Response {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Malformed request");
                return Response::error(format!("malformed request: {e}"));
            }
        };

        let Some((action, resource, state)) = request.into_parts() else {
            return Response::schemas(self.registry.schemas());
        };

        match self.dispatch(action, &resource, state).await {
            Ok(state) => Response::ok(state),
            Err(e) => {
                error!(%resource, %action, error = %e, "Resource request failed");
                Response::error(e.to_string())
            }
        }
    }

    async fn dispatch(
        &self,
        action: Action,
        resource: &str,
        state: Value,
    ) -> Result<Option<Value>, ProviderError> {
        self.registry
            .get(resource)?
            .apply(&self.client, action, state)
            .await
    }

    /// Serve requests from `reader` until it reaches end of input.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            debug!(len = line.len(), "Request received");
            let response = self.handle_line(&line).await;
            let mut encoded = serde_json::to_vec(&response)
                .unwrap_or_else(|e| encode_fallback(&e.to_string()));
            encoded.push(b'\n');
            writer.write_all(&encoded).await?;
            writer.flush().await?;
        }
        info!("Input closed, stopping");
        Ok(())
    }
}

fn encode_fallback(message: &str) -> Vec<u8> {
    serde_json::json!({"ok": false, "error": message})
        .to_string()
        .into_bytes()
}

/// Wait for a shutdown signal (SIGTERM or SIGINT/Ctrl+C)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("Received Ctrl+C"); }
        () = terminate => { info!("Received SIGTERM"); }
    }
}
