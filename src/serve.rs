//! HTTP serving of the built site.
//!
//! A thin axum server with exactly two jobs:
//!
//! - serve the rendered `dist/` tree as static files (content types guessed
//!   from the extension, directory requests fall back to `index.html`)
//! - answer `GET /api/health` with a fixed-shape status payload for the
//!   deployment platform's liveness probe
//!
//! The health endpoint cannot fail: it reads two environment variables with
//! literal fallbacks and stamps the current time. Keep it that way — probes
//! that can error are worse than no probes.

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Health probe payload.
///
/// Shape is fixed; every field is always present. `version` is the short
/// deploy commit (Railway injects `RAILWAY_GIT_COMMIT_SHA`) or `"local"`,
/// `environment` is `RAILWAY_ENVIRONMENT` or `"development"`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub environment: String,
}

impl HealthStatus {
    /// Snapshot the current process health. Always succeeds.
    pub fn current() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: short_version(std::env::var("RAILWAY_GIT_COMMIT_SHA").ok()),
            environment: environment_name(std::env::var("RAILWAY_ENVIRONMENT").ok()),
        }
    }
}

/// First seven characters of the deploy commit, or the `"local"` literal.
fn short_version(sha: Option<String>) -> String {
    sha.filter(|s| !s.is_empty())
        .map(|s| s.chars().take(7).collect())
        .unwrap_or_else(|| "local".to_string())
}

/// Deployment environment name, or the `"development"` literal.
fn environment_name(env: Option<String>) -> String {
    env.filter(|e| !e.is_empty())
        .unwrap_or_else(|| "development".to_string())
}

struct AppState {
    dist: PathBuf,
}

/// Build the site router: health endpoint plus static fallback over `dist`.
pub fn router(dist: PathBuf) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .fallback(get(static_file))
        .with_state(Arc::new(AppState { dist }))
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(dist: PathBuf, addr: SocketAddr) -> Result<(), ServeError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, dist = %dist.display(), "serving site");
    axum::serve(listener, router(dist)).await?;
    Ok(())
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::current())
}

/// Serve a file from the dist tree.
///
/// `/` and `/sermons/` style requests resolve to the directory's
/// `index.html`. Anything that escapes the tree or does not exist is a 404.
async fn static_file(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let Some(path) = resolve_request_path(&state.dist, uri.path()) else {
        return not_found();
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            tracing::debug!(path = %path.display(), "served");
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.to_string())],
                bytes,
            )
                .into_response()
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "not found");
            not_found()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "not found").into_response()
}

/// Map a request path onto the dist tree, or `None` if it tries to escape.
///
/// Directory requests (trailing slash, or a path that names a directory)
/// resolve to their `index.html`.
fn resolve_request_path(dist: &Path, request: &str) -> Option<PathBuf> {
    let trimmed = request.trim_start_matches('/');
    if trimmed.split('/').any(|seg| seg == "..") {
        return None;
    }

    let mut path = dist.join(trimmed);
    if trimmed.is_empty() || request.ends_with('/') || path.is_dir() {
        path = path.join("index.html");
    }
    Some(path)
}
