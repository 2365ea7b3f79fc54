//! Route definitions and handlers.

use crate::{ApiError, ApiState};
use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::future::Future;
use steward_core::{Configuration, ConfigurationDraft, ConfigurationId, GuildId, StatusId};
use steward_error::PlatformErrorKind;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, instrument};

type ApiResult<T> = Result<T, ApiError>;

/// Body of `POST /api/setup`.
#[derive(Debug, Deserialize)]
struct SetupRequest {
    guild_id: GuildId,
    config_id: ConfigurationId,
}

#[derive(Debug, Serialize)]
struct SetupAccepted {
    message: &'static str,
    status_id: StatusId,
}

/// Creates the API router.
pub fn create_router(state: ApiState) -> Router {
    let api = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .route("/configs", post(create_config).get(list_configs))
        .route(
            "/configs/:id",
            get(get_config).put(update_config).delete(delete_config),
        )
        .route("/bot/status", get(bot_status))
        .route("/bot/start", post(start_bot))
        .route("/setup", post(trigger_setup))
        .route("/setup/status/:id", get(setup_status));

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve the API until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve<F>(addr: &str, state: ApiState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP API listening");
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Unwrap a JSON body, reporting malformed input as `422`.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text()))
}

async fn root(State(state): State<ApiState>) -> impl IntoResponse {
    Json(json!({
        "message": "Steward server provisioning API",
        "bot_status": state.platform.snapshot(),
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Get current metrics snapshot.
async fn get_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.orchestrator.metrics().snapshot();
    (StatusCode::OK, Json(snapshot))
}

#[instrument(skip_all)]
async fn create_config(
    State(state): State<ApiState>,
    body: Result<Json<ConfigurationDraft>, JsonRejection>,
) -> ApiResult<Json<Configuration>> {
    let config = Configuration::from_draft(json_body(body)?)?;
    state.configs.insert(config.clone()).await?;
    info!(config_id = %config.id, name = %config.name, "Configuration created");
    Ok(Json(config))
}

async fn list_configs(State(state): State<ApiState>) -> ApiResult<Json<Vec<Configuration>>> {
    Ok(Json(state.configs.list().await?))
}

async fn get_config(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Configuration>> {
    Ok(Json(state.configs.get(&ConfigurationId::from(id.as_str())).await?))
}

#[instrument(skip(state, body))]
async fn update_config(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    body: Result<Json<ConfigurationDraft>, JsonRejection>,
) -> ApiResult<Json<Configuration>> {
    let draft = json_body(body)?;
    let mut config = state.configs.get(&ConfigurationId::from(id.as_str())).await?;
    config.apply_draft(draft)?;
    state.configs.replace(config.clone()).await?;
    info!("Configuration updated");
    Ok(Json(config))
}

#[instrument(skip(state))]
async fn delete_config(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state
        .configs
        .delete(&ConfigurationId::from(id.as_str()))
        .await?;
    info!("Configuration deleted");
    Ok(Json(json!({"message": "Configuration deleted successfully"})))
}

async fn bot_status(State(state): State<ApiState>) -> impl IntoResponse {
    Json(state.platform.snapshot())
}

#[instrument(skip_all)]
async fn start_bot(State(state): State<ApiState>) -> ApiResult<impl IntoResponse> {
    match state.platform.connect().await {
        Ok(()) => Ok(Json(json!({"message": "Bot is starting..."}))),
        Err(e) if matches!(e.kind(), PlatformErrorKind::AlreadyRunning) => {
            Ok(Json(json!({"message": "Bot is already running"})))
        }
        Err(e) => Err(e.into()),
    }
}

/// Queue a provisioning run and return its status id immediately.
///
/// The configuration and server are resolved before any status is
/// recorded, so an unknown id leaves nothing behind.
#[instrument(skip_all)]
async fn trigger_setup(
    State(state): State<ApiState>,
    body: Result<Json<SetupRequest>, JsonRejection>,
) -> ApiResult<Json<SetupAccepted>> {
    let request = json_body(body)?;
    let config = state.configs.get(&request.config_id).await?;
    let guild = state.platform.guild(request.guild_id).await?;
    let (status_id, _handle) = state.orchestrator.spawn(guild, config).await?;
    info!(
        guild_id = %request.guild_id,
        config_id = %request.config_id,
        %status_id,
        "Server setup queued"
    );
    Ok(Json(SetupAccepted {
        message: "Server setup queued",
        status_id,
    }))
}

async fn setup_status(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let status = state
        .orchestrator
        .tracker()
        .get(&StatusId::from(id.as_str()))
        .await?;
    Ok(Json(status))
}
