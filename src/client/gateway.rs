use std::time::Duration;

use tracing::debug;

use super::{AnalysisBackend, ClientError};
use crate::analysis::AiAnalysis;
use crate::wire::{clamp_timeout, AnalysisRequest, GatewayReply};

/// Grace period on top of the gateway's own upstream timeout, so the
/// gateway gets to answer 408 before the client gives up.
const CLIENT_GRACE: Duration = Duration::from_secs(5);

const DEFAULT_REJECTION: &str = "External API request failed";
const DEFAULT_FAILURE: &str = "AI analysis failed";

/// [`AnalysisBackend`] that POSTs to a running analysis gateway.
pub struct HttpGateway {
    client: reqwest::Client,
    url: String,
}

impl HttpGateway {
    pub fn new(url: impl Into<String>, timeout_ms: u64) -> Result<Self, ClientError> {
        let timeout = Duration::from_millis(clamp_timeout(timeout_ms)) + CLIENT_GRACE;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("authorcheck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AnalysisBackend for HttpGateway {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AiAnalysis, ClientError> {
        let resp = self.client.post(&self.url).json(request).send().await?;
        let status = resp.status();
        debug!(%status, url = %self.url, "gateway responded");

        if !status.is_success() {
            // Error bodies are best-effort; a proxy may answer with HTML.
            let error = resp
                .json::<GatewayReply>()
                .await
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                error,
            });
        }

        let reply = resp.json::<GatewayReply>().await?;
        match reply {
            GatewayReply {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            other => Err(ClientError::Unsuccessful(
                other.error.unwrap_or_else(|| DEFAULT_FAILURE.to_string()),
            )),
        }
    }
}
