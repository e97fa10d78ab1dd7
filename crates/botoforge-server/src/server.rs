// botoforge-server/src/server.rs
// ============================================================================
// Module: HTTP Server
// Description: axum routes for code generation and health checks.
// Purpose: Map pipeline outcomes onto the public HTTP response shapes.
// Dependencies: axum, botoforge-config, botoforge-core, tokio
// ============================================================================

//! ## Overview
//! The server exposes `POST /generate` and `GET /health`. Request bodies are
//! read as raw bytes so malformed or oversized payloads map to the client
//! input error shape instead of a framework rejection. The pipeline core is
//! blocking, so generation runs inside `tokio::task::block_in_place` and the
//! server requires a multi-thread runtime.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use botoforge_config::BotoForgeConfig;
use botoforge_core::CompletionService;
use botoforge_core::DocumentationStore;
use botoforge_core::Pipeline;
use botoforge_core::PipelineError;
use botoforge_core::PipelineOutcome;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::audit::AuditSink;
use crate::audit::RequestAuditEvent;
use crate::audit::build_audit_sink;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Server construction and transport errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration is invalid for serving.
    #[error("server config error: {0}")]
    Config(String),
    /// Listener or connection handling failure.
    #[error("server transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// HTTP server wrapping a narrowing pipeline.
///
/// # Invariants
/// - `/generate` responses use the stable public shapes only.
/// - One audit event is recorded per `/generate` request.
pub struct BotoForgeServer<S, C> {
    /// Shared handler state.
    state: Arc<AppState<S, C>>,
    /// Bind address for the listener.
    bind: String,
}

impl<S, C> BotoForgeServer<S, C>
where
    S: DocumentationStore + Send + Sync + 'static,
    C: CompletionService + Send + Sync + 'static,
{
    /// Builds a server from configuration and injected pipeline dependencies.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the audit sink cannot be constructed.
    pub fn new(config: &BotoForgeConfig, store: S, completion: C) -> Result<Self, ServerError> {
        let audit = build_audit_sink(&config.audit)?;
        let state = Arc::new(AppState {
            pipeline: Pipeline::new(store, completion),
            audit,
            max_body_bytes: config.server.max_body_bytes,
        });
        Ok(Self {
            state,
            bind: config.server.bind.clone(),
        })
    }

    /// Returns the axum router for this server.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.state))
    }

    /// Serves requests until the listener fails.
    ///
    /// Must run on a multi-thread tokio runtime; generation blocks in place.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr: SocketAddr = self
            .bind
            .parse()
            .map_err(|_| ServerError::Config("invalid bind address".to_string()))?;
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app)
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()))
    }
}

/// Shared state for request handlers.
struct AppState<S, C> {
    /// Blocking narrowing pipeline.
    pipeline: Pipeline<S, C>,
    /// Sink receiving one event per generate request.
    audit: Arc<dyn AuditSink>,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
}

/// Builds the application router.
fn build_router<S, C>(state: Arc<AppState<S, C>>) -> Router
where
    S: DocumentationStore + Send + Sync + 'static,
    C: CompletionService + Send + Sync + 'static,
{
    Router::new()
        .route("/generate", post(handle_generate::<S, C>))
        .route("/health", get(handle_health))
        .with_state(state)
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Incoming generate request payload.
#[derive(Debug, Deserialize)]
struct GenerateRequest {
    /// Natural-language query to narrow.
    #[serde(default)]
    query: Option<String>,
}

/// Handles `POST /generate`.
async fn handle_generate<S, C>(
    State(state): State<Arc<AppState<S, C>>>,
    bytes: Bytes,
) -> impl IntoResponse
where
    S: DocumentationStore + Send + Sync + 'static,
    C: CompletionService + Send + Sync + 'static,
{
    let (status, body, event) = if bytes.len() > state.max_body_bytes {
        invalid_input_response()
    } else {
        match serde_json::from_slice::<GenerateRequest>(&bytes) {
            Ok(request) => {
                let query = request.query.unwrap_or_default();
                let result = tokio::task::block_in_place(|| state.pipeline.run(&query));
                generate_response(result)
            }
            Err(_) => invalid_input_response(),
        }
    };
    state.audit.record(&event);
    (status, axum::Json(body))
}

/// Handles `GET /health`.
async fn handle_health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(json!({
            "status": "OK",
            "message": "AWS Code Generator API is running"
        })),
    )
}

// ============================================================================
// SECTION: Response Mapping
// ============================================================================

/// Maps a pipeline result onto the public response shape and audit event.
fn generate_response(
    result: Result<PipelineOutcome, PipelineError>,
) -> (StatusCode, Value, RequestAuditEvent) {
    match result {
        Ok(PipelineOutcome::Completed(result)) => {
            let services = result.services_used.len();
            let methods = result.methods_used.iter().map(|(_, methods)| methods.len()).sum();
            match serde_json::to_value(&result) {
                Ok(Value::Object(mut map)) => {
                    map.insert("success".to_string(), Value::Bool(true));
                    (
                        StatusCode::OK,
                        Value::Object(map),
                        RequestAuditEvent::new("completed", services, methods, None),
                    )
                }
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to generate code",
                        "details": "result serialization failed"
                    }),
                    RequestAuditEvent::new("error", services, methods, Some("serialization")),
                ),
            }
        }
        Ok(PipelineOutcome::NoServices) => (
            StatusCode::BAD_REQUEST,
            json!({"error": "No relevant AWS services found for your query"}),
            RequestAuditEvent::new("no_services", 0, 0, None),
        ),
        Err(PipelineError::Input) => invalid_input_response(),
        Err(err) => {
            let kind = match &err {
                PipelineError::Store(_) => "store",
                PipelineError::Selection(_) => "selection",
                PipelineError::Completion(_) => "completion",
                PipelineError::Input => "input",
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to generate code",
                    "details": err.to_string()
                }),
                RequestAuditEvent::new("error", 0, 0, Some(kind)),
            )
        }
    }
}

/// Response triple for client input errors.
fn invalid_input_response() -> (StatusCode, Value, RequestAuditEvent) {
    (
        StatusCode::BAD_REQUEST,
        json!({"error": "Query is required"}),
        RequestAuditEvent::new("invalid_query", 0, 0, Some("input")),
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================
