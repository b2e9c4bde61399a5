use authorcheck::wire::GatewayReply;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::rate_limit::MAX_REQUESTS_PER_WINDOW;

/// Every failure the gateway reports to its caller. `Display` is the
/// public `error` string; upstream causes are logged, never returned.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Forbidden: Invalid origin")]
    ForbiddenOrigin,
    #[error("Too many requests")]
    RateLimited,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Invalid Content-Type. Expected application/json")]
    InvalidContentType,
    #[error("Invalid input")]
    InvalidInput(String),
    #[error("Service temporarily unavailable")]
    Unavailable,
    #[error("Request timeout")]
    Timeout { error_id: String },
    #[error("External service error")]
    ExternalService,
    #[error("Analysis failed")]
    AnalysisFailed(&'static str),
    #[error("Analysis processing failed")]
    Processing,
    #[error("Internal server error")]
    Internal { error_id: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ForbiddenOrigin => StatusCode::FORBIDDEN,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidContentType | ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            ApiError::Unavailable
            | ApiError::ExternalService
            | ApiError::AnalysisFailed(_)
            | ApiError::Processing
            | ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn details(&self) -> Option<String> {
        match self {
            ApiError::RateLimited => Some(format!(
                "Maximum {} requests per minute allowed",
                MAX_REQUESTS_PER_WINDOW
            )),
            ApiError::InvalidInput(details) => Some(details.clone()),
            ApiError::ExternalService => {
                Some("The analysis service is temporarily unavailable".to_string())
            }
            ApiError::AnalysisFailed(details) => Some(details.to_string()),
            ApiError::Processing => Some("Unable to parse the analysis results".to_string()),
            ApiError::Internal { .. } => Some(
                "An unexpected error occurred while processing your request".to_string(),
            ),
            _ => None,
        }
    }

    pub fn error_id(&self) -> Option<&str> {
        match self {
            ApiError::Timeout { error_id } | ApiError::Internal { error_id } => Some(error_id),
            _ => None,
        }
    }

    pub fn reply(&self) -> GatewayReply {
        GatewayReply::failure(
            self.to_string(),
            self.details(),
            self.error_id().map(str::to_string),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.reply())).into_response()
    }
}
