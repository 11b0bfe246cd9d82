//! HTTP API for browser front ends.
//!
//! - `POST /api/parse-recipe`: forwards `{ "url": ... }` to the parsing
//!   webhook and returns its JSON answer
//! - `GET /api/get-signed-url`: a signed voice-conversation URL for the
//!   configured agent, so the API key stays on the server
//! - `GET /api/recipes` and `GET /api/recipes/{id}`: stored recipes

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info, warn};
use remy_core::{AssistantConfig, CookingError, RecipeLibrary, SignedUrlClient, WebhookClient};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Shared handles for the route handlers.
#[derive(Clone)]
pub struct AppState {
    library: RecipeLibrary,
    webhook: Option<WebhookClient>,
    signed_urls: Option<SignedUrls>,
}

#[derive(Clone)]
struct SignedUrls {
    client: SignedUrlClient,
    agent_id: String,
}

impl AppState {
    /// Build the state from configuration. Routes whose service is not
    /// configured answer with their generic failure.
    pub fn from_config(library: RecipeLibrary, config: &AssistantConfig) -> remy_core::Result<Self> {
        let webhook = match config.require_webhook_url() {
            Ok(url) => Some(WebhookClient::new(url, config.request_timeout)?),
            Err(e) => {
                warn!("Recipe parsing disabled: {e}");
                None
            }
        };

        let signed_urls = match (config.require_api_key(), config.require_agent_id()) {
            (Ok(api_key), Ok(agent_id)) => Some(SignedUrls {
                client: SignedUrlClient::new(
                    config.signed_url_endpoint.as_str(),
                    api_key,
                    config.request_timeout,
                )?,
                agent_id: agent_id.to_string(),
            }),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Signed conversation URLs disabled: {e}");
                None
            }
        };

        Ok(Self {
            library,
            webhook,
            signed_urls,
        })
    }
}

#[derive(Deserialize)]
struct ParseRecipeRequest {
    url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignedUrlResponse {
    signed_url: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn parse_recipe(State(state): State<AppState>, body: Bytes) -> Response {
    const FAILED: &str = "Failed to parse recipe";

    let request: ParseRecipeRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            error!("Error parsing recipe: invalid request body: {e}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, FAILED);
        }
    };

    let url = match request.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => return error_response(StatusCode::BAD_REQUEST, "URL is required"),
    };

    let Some(webhook) = &state.webhook else {
        error!("Error parsing recipe: no webhook configured");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, FAILED);
    };

    match webhook.submit_raw(&url).await {
        Ok(Value::Null) => {
            error!("Error parsing recipe: webhook answered without JSON");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, FAILED)
        }
        Ok(recipe) => Json(recipe).into_response(),
        Err(e) => {
            error!("Error parsing recipe: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, FAILED)
        }
    }
}

async fn get_signed_url(State(state): State<AppState>) -> Response {
    const FAILED: &str = "Failed to generate signed URL";

    let Some(signed_urls) = &state.signed_urls else {
        error!("Signed URL requested but the API key or agent ID is not configured");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, FAILED);
    };

    match signed_urls.client.signed_url(&signed_urls.agent_id).await {
        Ok(signed_url) => Json(SignedUrlResponse { signed_url }).into_response(),
        Err(e) => {
            error!("Failed to get signed URL: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, FAILED)
        }
    }
}

async fn list_recipes(State(state): State<AppState>) -> Response {
    Json(state.library.recipes_for_selection().await.0).into_response()
}

async fn get_recipe(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.library.require_recipe(&id).await {
        Ok(recipe) => Json(recipe).into_response(),
        Err(CookingError::RecipeNotFound { .. }) => {
            error_response(StatusCode::NOT_FOUND, "Recipe not found")
        }
        Err(e) => {
            error!("Failed to load recipe {id}: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load recipe")
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/parse-recipe", post(parse_recipe))
        .route("/api/get-signed-url", get(get_signed_url))
        .route("/api/recipes", get(list_recipes))
        .route("/api/recipes/{id}", get(get_recipe))
        .layer(cors)
        .with_state(state)
}

/// Serve the API on `addr` until SIGINT or SIGTERM.
pub async fn run_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Remy API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Remy API shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(mut sigint), Ok(mut sigterm)) => {
                tokio::select! {
                    _ = sigint.recv() => info!("Received SIGINT, shutting down gracefully..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully..."),
                }
            }
            _ => {
                warn!("Failed to install signal handlers, falling back to Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received Ctrl-C, shutting down gracefully...");
    }
}
