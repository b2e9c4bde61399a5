//! JSON bodies exchanged between the orchestrator and the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::AiAnalysis;

/// Bounds applied by the gateway to a caller-supplied timeout.
pub const MIN_TIMEOUT_MS: u64 = 5_000;
pub const MAX_TIMEOUT_MS: u64 = 60_000;

pub fn clamp_timeout(ms: u64) -> u64 {
    ms.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS)
}

/// Body POSTed to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
    /// Milliseconds; the gateway clamps it into [5000, 60000].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            text: text.into(),
            timeout: Some(timeout_ms),
        }
    }
}

/// Every gateway response body, successful or not.
///
/// Success: `{success: true, data, model, timestamp}`.
/// Failure: `{success: false, error, details?, errorId?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AiAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
}

impl GatewayReply {
    pub fn success(data: AiAnalysis, model: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            success: true,
            data: Some(data),
            model: Some(model.into()),
            timestamp: Some(timestamp),
            error: None,
            details: None,
            error_id: None,
        }
    }

    pub fn failure(
        error: impl Into<String>,
        details: Option<String>,
        error_id: Option<String>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            model: None,
            timestamp: None,
            error: Some(error.into()),
            details,
            error_id,
        }
    }
}
