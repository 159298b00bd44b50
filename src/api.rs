//! HTTP surface of the bridge
//!
//! | Method | Path           | Description                              |
//! |--------|----------------|------------------------------------------|
//! | GET    | `/`            | Test page embedding the camera stream    |
//! | ANY    | `/cam`, `/cam/*` | Proxied camera stream                  |
//! | GET    | `/status`      | Reachability of both devices             |
//! | POST   | `/comando`     | Accept a command (mailbox + direct push) |
//! | GET    | `/nextCommand` | Poll-and-clear the pending command       |

use crate::command::Vocabulary;
use crate::device::{Forwarder, StatusReporter, StreamRelay};
use crate::error::{Error, Result};
use crate::mailbox::Mailbox;
use axum::{
    extract::{Path, RawQuery, State},
    http::{header, Method},
    response::{Html, IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state for all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
    pub mailbox: Arc<Mailbox>,
    pub status: Arc<StatusReporter>,
    pub relay: Arc<StreamRelay>,
    pub vocabulary: Vocabulary,
    pub shared_secret: Option<String>,
}

/// Build the complete bridge HTTP application.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/cam", any(relay_root))
        .route("/cam/*path", any(relay_subpath))
        .route("/status", get(device_status))
        .route("/comando", post(accept_command))
        .route("/nextCommand", get(next_command))
        .layer(build_cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any)
}

// =============================================================================
// Handlers
// =============================================================================

async fn index() -> Html<&'static str> {
    Html(
        r#"<h1>📡 Stream de ESP32-CAM</h1>
<img src="/cam" style="width: 100%; max-width: 640px;" />"#,
    )
}

async fn relay_root(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Result<Response> {
    state.relay.proxy(&method, "", query.as_deref()).await
}

async fn relay_subpath(
    State(state): State<AppState>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response> {
    state.relay.proxy(&method, &path, query.as_deref()).await
}

async fn device_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.status.report().await)
}

#[derive(Debug, Deserialize)]
struct CommandRequest {
    cmd: String,
    secret: Option<String>,
}

/// `POST /comando` — validate, store for polling, best-effort direct push.
///
/// The mailbox write happens before the direct push and already
/// guarantees eventual delivery, so a push failure is logged and the
/// request still succeeds.
async fn accept_command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<serde_json::Value>> {
    if let Some(expected) = &state.shared_secret {
        if request.secret.as_deref() != Some(expected.as_str()) {
            return Err(Error::Unauthorized);
        }
    }

    if !state.vocabulary.contains(&request.cmd) {
        return Err(Error::Validation(request.cmd));
    }

    state.mailbox.set(&request.cmd);

    if let Err(e) = state.forwarder.send(&request.cmd).await {
        tracing::warn!(
            command = %request.cmd,
            error = %e,
            "Direct push failed, command stays queued for polling"
        );
    }

    Ok(Json(
        serde_json::json!({"status": "ok", "enviado": request.cmd}),
    ))
}

async fn next_command(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "cmd": state.mailbox.take() }))
}
