//! The single outbound call to the language model.

use std::time::Duration;

use authorcheck::analysis::AiAnalysis;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// First `{` through last `}`.
static JSON_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

const USER_AGENT: &str = concat!("AuthorCheck/", env!("CARGO_PKG_VERSION"));

const PROMPT_HEAD: &str = "Analyze the following text and provide a comprehensive analysis in JSON format.

Text to analyze:
\"";

const PROMPT_TAIL: &str = r#""

Please provide analysis in the following JSON format:
{
  "advancedSentiment": {
    "emotions": [
      {
        "emotion": "emotion_name",
        "score": 0.85,
        "intensity": "high|medium|low"
      }
    ],
    "confidence": 0.92,
    "context": "Brief description of the overall emotional context"
  },
  "topics": [
    {
      "topic": "topic_name",
      "relevance": 0.95,
      "keywords": ["keyword1", "keyword2"]
    }
  ],
  "writingStyle": {
    "tone": "Professional|Casual|Academic|Creative",
    "formality": "formal|neutral|casual",
    "complexity": "simple|moderate|complex",
    "style": ["style1", "style2"],
    "audience": "target audience description"
  },
  "insights": [
    {
      "type": "strength|improvement|observation",
      "title": "Insight title",
      "description": "Detailed description",
      "suggestion": "Optional suggestion"
    }
  ],
  "plagiarismRisk": {
    "score": 15,
    "level": "low|medium|high",
    "details": "Risk assessment details"
  },
  "contentQuality": {
    "overall": 85,
    "clarity": 90,
    "coherence": 88,
    "engagement": 82,
    "originality": 87
  },
  "aiOrHuman": "ai|human|unknown",
  "aiOrHumanConfidence": 92,
  "aiOrHumanExplanation": "This text is likely AI-generated because of its consistent tone, lack of personal anecdotes, and formal structure."
}

Focus on providing accurate, detailed analysis. Ensure all scores are between 0-100 and relevance scores are between 0-1. For aiOrHuman, classify as 'ai' if the text is likely AI-generated, 'human' if likely human-written, or 'unknown' if unsure."#;

pub fn build_prompt(text: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_HEAD.len() + text.len() + PROMPT_TAIL.len());
    prompt.push_str(PROMPT_HEAD);
    prompt.push_str(text);
    prompt.push_str(PROMPT_TAIL);
    prompt
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),
    #[error("model endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model reply carried an error: {0}")]
    Model(Value),
    #[error("model reply had no candidate text")]
    Empty,
    #[error("cannot read analysis from model reply: {0}")]
    Parse(String),
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
            response_mime_type: "application/json",
        }
    }
}

/// Client for a Gemini-style `generateContent` endpoint.
#[derive(Clone)]
pub struct ModelClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ModelClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Send the prompt for `text` and read the analysis out of the reply.
    /// The whole exchange, body included, is bounded by `timeout`.
    pub async fn analyze(&self, text: &str, timeout: Duration) -> Result<AiAnalysis, UpstreamError> {
        let prompt = build_prompt(text);
        match tokio::time::timeout(timeout, self.exchange(&prompt)).await {
            Ok(Err(UpstreamError::Transport(e))) if e.is_timeout() => {
                Err(UpstreamError::Timeout(timeout))
            }
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(timeout)),
        }
    }

    async fn exchange(&self, prompt: &str) -> Result<AiAnalysis, UpstreamError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig::default(),
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: Value = resp.json().await?;
        if let Some(error) = reply.get("error").filter(|e| !e.is_null()) {
            return Err(UpstreamError::Model(error.clone()));
        }

        let text = reply
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if text.is_empty() {
            return Err(UpstreamError::Empty);
        }

        parse_analysis(text)
    }
}

/// Outermost `{...}` span of a model reply.
pub fn extract_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT.find(text).map(|m| m.as_str())
}

/// Read an [`AiAnalysis`] out of free-form model output.
pub fn parse_analysis(text: &str) -> Result<AiAnalysis, UpstreamError> {
    let json = extract_json_object(text)
        .ok_or_else(|| UpstreamError::Parse("no JSON object in reply".into()))?;
    let value: Value =
        serde_json::from_str(json).map_err(|e| UpstreamError::Parse(e.to_string()))?;
    if !value.is_object() {
        return Err(UpstreamError::Parse("reply is not a JSON object".into()));
    }
    let analysis =
        AiAnalysis::from_value(value).map_err(|e| UpstreamError::Parse(e.to_string()))?;
    Ok(analysis.normalize())
}
