//! Client Analysis Orchestrator: runs the local statistics and the remote
//! gateway call for one piece of text and merges them into a complete
//! [`AnalysisResult`].

#[cfg(feature = "client")]
pub mod gateway;

use std::future::Future;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::analysis::{AiAnalysis, AnalysisResult};
use crate::config::ClientConfig;
use crate::heuristics;
use crate::stats;
use crate::wire::AnalysisRequest;

/// Text sent by [`Analyzer::check_connection`].
pub const PROBE_TEXT: &str = "Test connection";

#[derive(Debug, Error)]
pub enum ClientError {
    #[cfg(feature = "client")]
    #[error("gateway unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("gateway rejected the request ({status}): {error}")]
    Rejected { status: u16, error: String },
    #[error("AI analysis failed: {0}")]
    Unsuccessful(String),
}

/// Something that can produce the model-derived analysis for a request.
pub trait AnalysisBackend {
    fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<AiAnalysis, ClientError>> + Send;
}

/// How an analysis ended. Every variant comes with a complete result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input; nothing was computed or requested.
    Skipped,
    /// Remote analysis switched off in the config.
    Disabled,
    /// The gateway answered with a usable analysis.
    Success,
    /// The gateway failed and the fallback analysis was substituted.
    Fallback { reason: String },
    /// The gateway failed with fallback switched off; the default analysis
    /// still fills the result.
    Error { reason: String },
}

impl Outcome {
    pub fn is_remote(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub outcome: Outcome,
}

pub struct Analyzer<B> {
    backend: B,
    config: ClientConfig,
}

impl<B: AnalysisBackend> Analyzer<B> {
    pub fn new(backend: B, config: ClientConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Analyze `text`. Never fails: every path yields a complete result.
    /// No retries; a failed gateway call is final for this invocation.
    pub async fn analyze(&self, text: &str) -> Analysis {
        if text.trim().is_empty() {
            return Analysis {
                result: AnalysisResult::default(),
                outcome: Outcome::Skipped,
            };
        }

        if !self.config.enabled {
            debug!("remote analysis disabled");
            return Analysis {
                result: AnalysisResult::new(stats::analyze_text(text), self.fallback_analysis(text)),
                outcome: Outcome::Disabled,
            };
        }

        let request = AnalysisRequest::new(text, self.config.timeout_ms);
        debug!(chars = text.chars().count(), "requesting remote analysis");

        let (stats, remote) = tokio::join!(
            async { stats::analyze_text(text) },
            self.backend.analyze(&request)
        );

        let (ai_analysis, outcome) = match remote {
            Ok(ai) => (ai.normalize(), Outcome::Success),
            Err(e) if self.config.enable_fallback => {
                warn!(error = %e, "AI analysis failed, using fallback analysis");
                (
                    self.fallback_analysis(text),
                    Outcome::Fallback {
                        reason: e.to_string(),
                    },
                )
            }
            Err(e) => {
                error!(error = %e, "AI analysis failed");
                (
                    AiAnalysis::default(),
                    Outcome::Error {
                        reason: e.to_string(),
                    },
                )
            }
        };

        Analysis {
            result: AnalysisResult::new(stats, ai_analysis),
            outcome,
        }
    }

    /// Send a short test text through the gateway and report whether it answered.
    pub async fn check_connection(&self) -> bool {
        let request = AnalysisRequest::new(PROBE_TEXT, self.config.timeout_ms);
        match self.backend.analyze(&request).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "gateway connection check failed");
                false
            }
        }
    }

    fn fallback_analysis(&self, text: &str) -> AiAnalysis {
        if self.config.heuristic_fallback {
            heuristics::local_analysis(text)
        } else {
            AiAnalysis::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Authorship;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubBackend {
        reply: Result<AiAnalysis, String>,
        calls: AtomicUsize,
    }

    impl StubBackend {
        fn ok(ai: AiAnalysis) -> Self {
            Self {
                reply: Ok(ai),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AnalysisBackend for StubBackend {
        async fn analyze(&self, _request: &AnalysisRequest) -> Result<AiAnalysis, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().map_err(|e| ClientError::Rejected {
                status: 500,
                error: e,
            })
        }
    }

    impl AnalysisBackend for &StubBackend {
        async fn analyze(&self, request: &AnalysisRequest) -> Result<AiAnalysis, ClientError> {
            (**self).analyze(request).await
        }
    }

    fn model_reply() -> AiAnalysis {
        AiAnalysis {
            ai_or_human: Authorship::Human,
            ai_or_human_confidence: 81,
            ai_or_human_explanation: "Personal anecdotes and uneven rhythm.".into(),
            ..AiAnalysis::default()
        }
    }

    const TEXT: &str = "I loved the trip. The food was great and the people were kind.";

    #[tokio::test]
    async fn blank_text_skips_everything() {
        let backend = StubBackend::ok(model_reply());
        let analyzer = Analyzer::new(&backend, ClientConfig::default());
        let analysis = analyzer.analyze("   \n ").await;
        assert_eq!(analysis.outcome, Outcome::Skipped);
        assert_eq!(analysis.result, AnalysisResult::default());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn merges_stats_and_model_analysis() {
        let backend = StubBackend::ok(model_reply());
        let analyzer = Analyzer::new(&backend, ClientConfig::default());
        let analysis = analyzer.analyze(TEXT).await;
        assert_eq!(analysis.outcome, Outcome::Success);
        assert!(analysis.outcome.is_remote());
        assert_eq!(analysis.result.stats, stats::analyze_text(TEXT));
        assert_eq!(analysis.result.ai_analysis, model_reply());
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn stats_do_not_depend_on_model_reply() {
        let a = StubBackend::ok(model_reply());
        let b = StubBackend::ok(AiAnalysis::default());
        let first = Analyzer::new(&a, ClientConfig::default()).analyze(TEXT).await;
        let second = Analyzer::new(&b, ClientConfig::default()).analyze(TEXT).await;
        assert_eq!(first.result.stats, second.result.stats);
        assert_ne!(first.result.ai_analysis, second.result.ai_analysis);
    }

    #[tokio::test]
    async fn disabled_never_calls_the_gateway() {
        let backend = StubBackend::ok(model_reply());
        let config = ClientConfig {
            enabled: false,
            ..ClientConfig::default()
        };
        let analysis = Analyzer::new(&backend, config).analyze(TEXT).await;
        assert_eq!(analysis.outcome, Outcome::Disabled);
        assert_eq!(analysis.result.ai_analysis, AiAnalysis::default());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn failure_falls_back_to_default_analysis() {
        let backend = StubBackend::failing("External service error");
        let analysis = Analyzer::new(&backend, ClientConfig::default())
            .analyze(TEXT)
            .await;
        assert!(matches!(analysis.outcome, Outcome::Fallback { ref reason } if reason.contains("External service error")));
        assert_eq!(analysis.result.ai_analysis, AiAnalysis::default());
        assert_eq!(analysis.result.stats, stats::analyze_text(TEXT));
    }

    #[tokio::test]
    async fn failure_without_fallback_still_yields_complete_result() {
        let backend = StubBackend::failing("Request timeout");
        let config = ClientConfig {
            enable_fallback: false,
            heuristic_fallback: true,
            ..ClientConfig::default()
        };
        let analysis = Analyzer::new(&backend, config).analyze(TEXT).await;
        assert!(matches!(analysis.outcome, Outcome::Error { .. }));
        assert_eq!(analysis.result.ai_analysis, AiAnalysis::default());
        assert_eq!(analysis.result.stats.word_count, 13);
    }

    #[tokio::test]
    async fn heuristic_fallback_uses_local_classifiers() {
        let backend = StubBackend::failing("External service error");
        let config = ClientConfig {
            heuristic_fallback: true,
            ..ClientConfig::default()
        };
        let analysis = Analyzer::new(&backend, config).analyze(TEXT).await;
        assert!(matches!(analysis.outcome, Outcome::Fallback { .. }));
        assert_eq!(analysis.result.ai_analysis, heuristics::local_analysis(TEXT));
        assert_ne!(analysis.result.ai_analysis, AiAnalysis::default());
    }

    #[tokio::test]
    async fn connection_check_reports_backend_health() {
        let up = StubBackend::ok(AiAnalysis::default());
        assert!(Analyzer::new(&up, ClientConfig::default()).check_connection().await);
        let down = StubBackend::failing("nope");
        assert!(!Analyzer::new(&down, ClientConfig::default()).check_connection().await);
    }
}
