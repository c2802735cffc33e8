//! HTTP front end for the placeholder renderer.
//!
//! Routes:
//! - `GET /{color}-{width}-{height}.png`
//! - `GET /{color}-{width}-{height}-{x}.png` (with cross)
//! - `GET /{text}/{color}-{width}-{height}[-{x}].png`
//! - `GET /health`

pub mod config;
pub mod routes;

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use params::{RawParams, ValidationError};
use render::{RenderError, RenderOptions};
use tracing::{error, info, warn};

pub use config::ServerConfig;

#[derive(Debug, Clone)]
pub struct AppState {
    pub options: RenderOptions,
    pub content_type: &'static str,
}

impl From<&ServerConfig> for AppState {
    fn from(cfg: &ServerConfig) -> Self {
        Self {
            options: cfg.render,
            content_type: cfg.content_type,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            ApiError::Invalid(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            ApiError::Render(_) | ApiError::Task(_) => {
                error!("failed to produce image: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/:file", get(image_handler))
        .route("/:text/:file", get(captioned_image_handler))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Bind `0.0.0.0:{port}` and serve until Ctrl-C.
pub async fn serve(cfg: ServerConfig) -> anyhow::Result<()> {
    let app = router(AppState::from(&cfg));
    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;
    info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("server error: {e}"))?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn image_handler(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, ApiError> {
    respond_with_image(&state, None, &file).await
}

async fn captioned_image_handler(
    State(state): State<AppState>,
    Path((text, file)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    respond_with_image(&state, Some(&text), &file).await
}

async fn respond_with_image(
    state: &AppState,
    text: Option<&str>,
    file: &str,
) -> Result<Response, ApiError> {
    let parts = routes::parse_file(file).ok_or(ApiError::NotFound)?;
    let req = params::validate(RawParams {
        color: routes::non_empty(parts.color),
        width: routes::non_empty(parts.width),
        height: routes::non_empty(parts.height),
        text,
        cross: parts.cross,
    })?;

    // Rendering is CPU-bound; a panic in there comes back as a JoinError.
    let options = state.options;
    let png = tokio::task::spawn_blocking(move || render::render_png(&req, &options))
        .await??;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, state.content_type)],
        png,
    )
        .into_response())
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let res = next.run(req).await;

    info!(
        "{} {} -> {} in {:?}",
        method,
        path,
        res.status().as_u16(),
        started.elapsed()
    );
    res
}
