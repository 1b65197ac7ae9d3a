//! HTTP surface for the compatibility service.
//!
//! Bodies are taken as raw bytes and parsed here, so an empty or malformed
//! body becomes a field-level 400 instead of the framework's rejection.
//! Ephemeris-backed handlers run on the blocking pool.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use milan::{MatchError, Matchmaker, ValidationError};
use milan_config::{Environment, Settings};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub const ROUTES: [&str; 3] = ["/name-match", "/rashi-match", "/lagna-match"];

pub struct AppState {
    pub matchmaker: Matchmaker,
    pub environment: Environment,
    pub url: String,
}

impl AppState {
    pub fn new(matchmaker: Matchmaker, settings: &Settings) -> Self {
        Self {
            matchmaker,
            environment: settings.environment,
            url: settings.server.url(),
        }
    }
}

pub type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/name-match", post(name_match))
        .route("/rashi-match", post(rashi_match))
        .route("/lagna-match", post(lagna_match))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(ValidationError),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(e) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.message, "field": e.field })),
            )
                .into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response(),
        }
    }
}

/// Log computation failures with their inputs; only the category reaches the client.
fn api_error(endpoint: &str, body: &Value, err: MatchError) -> ApiError {
    match err {
        MatchError::Validation(e) => {
            log::debug!("{}: rejected request: {}", endpoint, e);
            ApiError::BadRequest(e)
        }
        MatchError::Computation(e) => {
            log::error!("{}: computation failed for {}: {}", endpoint, body, e);
            ApiError::Internal
        }
    }
}

/// Empty or non-JSON bodies parse to `Null` and fail validation as "body".
fn parse_body(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).unwrap_or(Value::Null)
}

async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "message": "Milan compatibility API is running",
        "environment": state.environment.label(),
        "url": state.url,
        "routes": ROUTES,
    }))
}

async fn name_match(State(state): State<SharedState>, bytes: Bytes) -> Result<Json<Value>, ApiError> {
    let body = parse_body(&bytes);
    let result = state
        .matchmaker
        .name_from_json(&body)
        .map_err(|e| api_error("/name-match", &body, e))?;
    to_json(&result)
}

async fn rashi_match(State(state): State<SharedState>, bytes: Bytes) -> Result<Json<Value>, ApiError> {
    blocking("/rashi-match", state, parse_body(&bytes), |mm, body| {
        mm.rashi_from_json(body)
    })
    .await
}

async fn lagna_match(State(state): State<SharedState>, bytes: Bytes) -> Result<Json<Value>, ApiError> {
    blocking("/lagna-match", state, parse_body(&bytes), |mm, body| {
        mm.lagna_from_json(body)
    })
    .await
}

/// Run an oracle-backed match off the async workers; the resolver lock may block.
async fn blocking<T, F>(
    endpoint: &'static str,
    state: SharedState,
    body: Value,
    run: F,
) -> Result<Json<Value>, ApiError>
where
    T: Serialize + Send + 'static,
    F: FnOnce(&Matchmaker, &Value) -> Result<T, MatchError> + Send + 'static,
{
    let joined = tokio::task::spawn_blocking(move || {
        run(&state.matchmaker, &body).map_err(|e| api_error(endpoint, &body, e))
    })
    .await;
    match joined {
        Ok(result) => to_json(&result?),
        Err(e) => {
            log::error!("{}: worker task failed: {}", endpoint, e);
            Err(ApiError::Internal)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Json<Value>, ApiError> {
    serde_json::to_value(value).map(Json).map_err(|e| {
        log::error!("response serialization failed: {}", e);
        ApiError::Internal
    })
}
