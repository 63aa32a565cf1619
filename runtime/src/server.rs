//! HTTP API: `POST /extract` and `GET /health`.

use crate::acquisition::http_client::HttpClient;
use crate::acquisition::page_loader::{normalize_target_url, PageLoader};
use crate::audit::logger::{record_run, RunRecord};
use crate::config::RuntimeConfig;
use crate::renderer::Renderer;
use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bloombox_signals::{BrandSignals, PageInput, Pipeline, RenderedSample};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// Shared, read-only server state.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    client: HttpClient,
    config: Arc<RuntimeConfig>,
    renderer: Option<Arc<dyn Renderer>>,
}

impl AppState {
    pub fn new(config: RuntimeConfig, client: HttpClient) -> Self {
        Self {
            pipeline: Arc::new(Pipeline::new(config.pipeline.clone())),
            client,
            config: Arc::new(config),
            renderer: None,
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }
}

/// Body of `POST /extract`. Exactly one of `html` or `url` is required.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExtractRequest {
    pub html: Option<String>,
    pub base_url: Option<String>,
    /// Pre-computed style sample to pair with `html`.
    pub rendered: Option<RenderedSample>,
    pub url: Option<String>,
    pub render: bool,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upstream(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, "bad_request", m),
            ApiError::Upstream(m) => (StatusCode::BAD_GATEWAY, "upstream_failed", m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", m),
        };
        (status, Json(json!({ "error": kind, "message": message }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/extract", post(extract))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{addr}");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("received shutdown signal");
        })
        .await?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn extract(
    State(state): State<AppState>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<BrandSignals>, ApiError> {
    let Json(req) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let start = Instant::now();
    let (page, source) = match (req.html, req.url) {
        (Some(html), None) => {
            let mut page = PageInput::from_html(html);
            if let Some(base) = req.base_url {
                page = page.with_base_url(base);
            }
            if let Some(rendered) = req.rendered {
                page = page.with_rendered(rendered);
            }
            (page, "inline".to_string())
        }
        (None, Some(url)) => {
            let url = normalize_target_url(&url).map_err(|e| ApiError::BadRequest(e.to_string()))?;
            let mut loader = PageLoader::new(&state.client, &state.config);
            match (&state.renderer, req.render) {
                (Some(renderer), true) => loader = loader.with_renderer(renderer.as_ref()),
                (None, true) => warn!(url = %url, "render requested but no browser is running"),
                _ => {}
            }
            let page = match loader.load(&url).await {
                Ok(page) => page,
                Err(e) => {
                    let message = format!("{e:#}");
                    record_run(
                        state.config.audit_log.as_deref(),
                        &RunRecord::failure("serve", url.as_str(), &message, elapsed_ms(start)),
                    );
                    return Err(ApiError::Upstream(message));
                }
            };
            (page, url.to_string())
        }
        _ => {
            return Err(ApiError::BadRequest(
                "provide exactly one of \"html\" or \"url\"".to_string(),
            ))
        }
    };

    let rendered = page.rendered.is_some();
    let pipeline = state.pipeline.clone();
    let signals = tokio::task::spawn_blocking(move || pipeline.run(&page))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    record_run(
        state.config.audit_log.as_deref(),
        &RunRecord::success("serve", &source, &signals, rendered, elapsed_ms(start)),
    );
    Ok(Json(signals))
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
