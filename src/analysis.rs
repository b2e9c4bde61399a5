use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder text carried by every descriptive field of the fallback analysis.
pub const NOT_AVAILABLE: &str = "Analysis not available";

/// Maximum number of topics kept from a model reply.
pub const MAX_TOPICS: usize = 3;

// ── Enumerations ──────────────────────────────────────────────────
//
// Model replies are loosely typed: casing varies and the prompt template
// itself uses values like "high|medium|low". Every enum therefore
// deserializes from any string (or null) and falls back to its default.

macro_rules! lenient_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? } default $default:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "Option<String>")]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl From<Option<String>> for $name {
            fn from(value: Option<String>) -> Self {
                let value = value.unwrap_or_default();
                match value.trim().to_ascii_lowercase().as_str() {
                    $($text => Self::$variant,)+
                    _ => Self::$default,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

lenient_enum!(SentimentLabel {
    Positive => "positive",
    Negative => "negative",
    Neutral => "neutral",
} default Neutral);

lenient_enum!(Intensity {
    Low => "low",
    Medium => "medium",
    High => "high",
} default Low);

lenient_enum!(Formality {
    Formal => "formal",
    Neutral => "neutral",
    Casual => "casual",
} default Neutral);

lenient_enum!(Complexity {
    Simple => "simple",
    Moderate => "moderate",
    Complex => "complex",
} default Moderate);

lenient_enum!(InsightKind {
    Strength => "strength",
    Improvement => "improvement",
    Observation => "observation",
} default Observation);

lenient_enum!(RiskLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
} default Low);

lenient_enum!(Authorship {
    Ai => "ai",
    Human => "human",
    Unknown => "unknown",
} default Unknown);

// ── Deterministic statistics ──────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Normalized score in [-1, 1].
    pub score: f64,
    pub label: SentimentLabel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorshipFeatures {
    pub avg_words_per_sentence: f64,
    pub avg_sentences_per_paragraph: f64,
    /// Unitless, unbounded.
    pub complexity_score: f64,
    /// Distinct words as a percentage of all words (0-100).
    pub vocabulary_richness: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

/// The locally computed half of an [`AnalysisResult`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub word_count: usize,
    pub character_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    /// Simplified Flesch Reading Ease, 0-100.
    pub readability_score: u32,
    pub sentiment: Sentiment,
    pub authorship_features: AuthorshipFeatures,
    pub top_words: Vec<WordFrequency>,
    /// Minutes at 200 words per minute, rounded up.
    pub estimated_reading_time: usize,
}

// ── Model-derived analysis ────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Emotion {
    pub emotion: String,
    #[serde(deserialize_with = "unit")]
    pub score: f64,
    pub intensity: Intensity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSentiment {
    pub emotions: Vec<Emotion>,
    #[serde(deserialize_with = "confidence")]
    pub confidence: u8,
    pub context: String,
}

impl Default for AdvancedSentiment {
    fn default() -> Self {
        Self {
            emotions: Vec::new(),
            confidence: 0,
            context: NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topic {
    pub topic: String,
    #[serde(deserialize_with = "unit")]
    pub relevance: f64,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WritingStyle {
    pub tone: String,
    pub formality: Formality,
    pub complexity: Complexity,
    pub style: Vec<String>,
    pub audience: String,
}

impl Default for WritingStyle {
    fn default() -> Self {
        Self {
            tone: "Neutral".to_string(),
            formality: Formality::Neutral,
            complexity: Complexity::Moderate,
            style: Vec::new(),
            audience: "General".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlagiarismRisk {
    #[serde(deserialize_with = "percent")]
    pub score: u8,
    pub level: RiskLevel,
    pub details: String,
}

impl Default for PlagiarismRisk {
    fn default() -> Self {
        Self {
            score: 0,
            level: RiskLevel::Low,
            details: NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentQuality {
    #[serde(deserialize_with = "percent")]
    pub overall: u8,
    #[serde(deserialize_with = "percent")]
    pub clarity: u8,
    #[serde(deserialize_with = "percent")]
    pub coherence: u8,
    #[serde(deserialize_with = "percent")]
    pub engagement: u8,
    #[serde(deserialize_with = "percent")]
    pub originality: u8,
}

/// Everything the language model contributes to an [`AnalysisResult`].
///
/// `Default` is the neutral fallback analysis substituted whenever the
/// model is disabled or unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiAnalysis {
    pub advanced_sentiment: AdvancedSentiment,
    pub topics: Vec<Topic>,
    pub writing_style: WritingStyle,
    pub insights: Vec<Insight>,
    pub plagiarism_risk: PlagiarismRisk,
    pub content_quality: ContentQuality,
    pub ai_or_human: Authorship,
    #[serde(deserialize_with = "percent")]
    pub ai_or_human_confidence: u8,
    pub ai_or_human_explanation: String,
}

impl Default for AiAnalysis {
    fn default() -> Self {
        Self {
            advanced_sentiment: AdvancedSentiment::default(),
            topics: Vec::new(),
            writing_style: WritingStyle::default(),
            insights: Vec::new(),
            plagiarism_risk: PlagiarismRisk::default(),
            content_quality: ContentQuality::default(),
            ai_or_human: Authorship::Unknown,
            ai_or_human_confidence: 0,
            ai_or_human_explanation: NOT_AVAILABLE.to_string(),
        }
    }
}

impl AiAnalysis {
    /// Read a model reply leniently: `null` anywhere counts as absent, and
    /// scores may arrive as numeric strings.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(strip_nulls(value))
    }

    /// Bring a value built outside the deserializer back inside its
    /// documented ranges.
    pub fn normalize(mut self) -> Self {
        self.topics.truncate(MAX_TOPICS);
        for topic in &mut self.topics {
            topic.relevance = clamp_unit(topic.relevance);
        }
        for emotion in &mut self.advanced_sentiment.emotions {
            emotion.score = clamp_unit(emotion.score);
        }
        self.advanced_sentiment.confidence = self.advanced_sentiment.confidence.min(100);
        self.plagiarism_risk.score = self.plagiarism_risk.score.min(100);
        self.ai_or_human_confidence = self.ai_or_human_confidence.min(100);

        let q = &mut self.content_quality;
        for score in [
            &mut q.overall,
            &mut q.clarity,
            &mut q.coherence,
            &mut q.engagement,
            &mut q.originality,
        ] {
            *score = (*score).min(100);
        }
        self
    }
}

/// The complete value handed to renderers: local statistics plus the
/// model-derived part, always fully populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub stats: TextStats,
    pub ai_analysis: AiAnalysis,
}

impl AnalysisResult {
    pub fn new(stats: TextStats, ai_analysis: AiAnalysis) -> Self {
        Self { stats, ai_analysis }
    }
}

// ── Lenient number readers ────────────────────────────────────────

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn to_percent(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

/// Any JSON value as a number: numbers as-is, numeric strings (an optional
/// trailing `%` is ignored) parsed, everything else 0.
fn loose_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn unit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    loose_number(deserializer).map(clamp_unit)
}

fn percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    loose_number(deserializer).map(to_percent)
}

/// Like `percent`, but a value in (0, 1] is read as a ratio.
/// The analysis prompt shows `"confidence": 0.92`, so models often answer
/// on that scale.
fn confidence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = loose_number(deserializer)?;
    if value > 0.0 && value <= 1.0 {
        Ok(to_percent(value * 100.0))
    } else {
        Ok(to_percent(value))
    }
}

/// Drop `null` object members and array items, so they read as absent and
/// take their field defaults.
fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        other => other,
    }
}
