//! HTTP gateway between browser/CLI clients and the language model.
//!
//! One route, `/api/external`. Each request passes the origin check and
//! the rate limit before any method handling, then input validation,
//! then exactly one bounded call to the model.

pub mod config;
pub mod error;
pub mod input;
pub mod origin;
pub mod rate_limit;
pub mod upstream;

use std::sync::Arc;
use std::time::Duration;

use authorcheck::wire::GatewayReply;
use axum::body::{Body, Bytes};
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

pub use config::GatewayConfig;
use error::ApiError;
use origin::{OriginCheck, OriginPolicy};
use rate_limit::RateLimiter;
use upstream::{ModelClient, UpstreamError};

pub struct AppState {
    pub config: GatewayConfig,
    origins: OriginPolicy,
    limiter: RateLimiter,
    model: ModelClient,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_limiter(config, RateLimiter::in_memory())
    }

    pub fn with_limiter(config: GatewayConfig, limiter: RateLimiter) -> Self {
        Self {
            origins: OriginPolicy::new(config.allowed_origins.clone(), config.require_origin),
            model: ModelClient::new(config.endpoint.clone(), config.api_key.clone()),
            limiter,
            config,
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors_origins = state.origins.clone();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| cors_origins.is_allowed(o))
                .unwrap_or(false)
        }))
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/external", any(external))
        .with_state(state)
        .layer(cors)
        .layer(security_header(header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .layer(security_header(header::X_FRAME_OPTIONS, "DENY"))
        .layer(security_header(header::X_XSS_PROTECTION, "1; mode=block"))
        .layer(security_header(
            header::REFERRER_POLICY,
            "strict-origin-when-cross-origin",
        ))
}

fn security_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

async fn external(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let check = state.origins.check(&headers);
    match &check {
        OriginCheck::Missing => warn!("request without origin or referer header"),
        OriginCheck::Rejected(origin) => warn!(%origin, "blocked request from unauthorized origin"),
        OriginCheck::Allowed(_) => {}
    }
    if !state.origins.permits(&check) {
        return Err(ApiError::ForbiddenOrigin);
    }

    let client = rate_limit::client_id(&headers);
    if !state.limiter.check(&client) {
        warn!(%client, %method, "rate limit exceeded");
        return Err(ApiError::RateLimited);
    }

    if method == Method::GET {
        info!(%client, "GET request redirected");
        return Ok(redirect_home());
    }
    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    if !is_json {
        return Err(ApiError::InvalidContentType);
    }

    let body = body.map_err(|rejection| {
        warn!(%client, status = %rejection.status(), "request body rejected");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::InvalidInput(format!(
                "Text too long. Maximum {} characters allowed",
                input::MAX_TEXT_CHARS
            ))
        } else {
            ApiError::InvalidInput("Request body must be a JSON object".into())
        }
    })?;
    let request: Value = serde_json::from_slice(&body)
        .ok()
        .filter(Value::is_object)
        .ok_or_else(|| ApiError::InvalidInput("Request body must be a JSON object".into()))?;

    let text = input::validate_text(request.get("text"))?;
    let timeout_ms = input::request_timeout(request.get("timeout"), state.config.default_timeout_ms);

    if !state.config.has_api_key() {
        error!("API key not configured");
        return Err(ApiError::Unavailable);
    }

    let data = state
        .model
        .analyze(&text, Duration::from_millis(timeout_ms))
        .await
        .map_err(upstream_failure)?;

    info!(%client, text_len = text.chars().count(), "analysis completed");
    let reply = GatewayReply::success(data, state.config.model.clone(), chrono::Utc::now());
    Ok((StatusCode::OK, Json(reply)).into_response())
}

/// Log the cause and turn it into the caller-facing error.
fn upstream_failure(err: UpstreamError) -> ApiError {
    match err {
        UpstreamError::Timeout(after) => {
            let error_id = Uuid::new_v4().to_string();
            error!(%error_id, ?after, "model request timed out");
            ApiError::Timeout { error_id }
        }
        UpstreamError::Status { status, body } => {
            error!(status, %body, "model endpoint error");
            ApiError::ExternalService
        }
        UpstreamError::Model(detail) => {
            error!(%detail, "model returned an error");
            ApiError::AnalysisFailed("Unable to process the text analysis")
        }
        UpstreamError::Empty => {
            error!("empty response from model");
            ApiError::AnalysisFailed("No analysis data received")
        }
        UpstreamError::Parse(reason) => {
            error!(%reason, "failed to parse model response");
            ApiError::Processing
        }
        UpstreamError::Transport(e) => {
            let error_id = Uuid::new_v4().to_string();
            error!(%error_id, error = %e, "model request failed");
            ApiError::Internal { error_id }
        }
    }
}

fn redirect_home() -> Response {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, "/")
        .body(Body::empty())
        .unwrap_or_else(|_| StatusCode::FOUND.into_response())
}
