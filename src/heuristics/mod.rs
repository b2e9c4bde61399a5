//! Keyword heuristics that approximate the model-derived analysis offline.
//!
//! Everything here is deterministic. It is used as the fallback analysis
//! when `heuristic_fallback` is switched on in the client config.

pub mod emotion;
pub mod insights;
pub mod quality;
pub mod style;
pub mod topics;

use std::collections::HashSet;

use crate::analysis::{AiAnalysis, Authorship};
use crate::stats::Tokens;

pub const HEURISTIC_EXPLANATION: &str = "Local heuristics cannot determine authorship";

/// Lowercased view of a text for keyword lookups.
pub struct Keywords {
    lower: String,
    tokens: HashSet<String>,
}

impl Keywords {
    pub fn new(text: &str) -> Self {
        let lower = text.to_lowercase();
        let tokens = lower
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| c.is_ascii_punctuation()).to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self { lower, tokens }
    }

    /// Whole-word match.
    pub fn has(&self, keyword: &str) -> bool {
        self.tokens.contains(keyword)
    }

    /// Substring match, for multi-word phrases.
    pub fn has_phrase(&self, phrase: &str) -> bool {
        self.lower.contains(phrase)
    }

    pub fn matching<'k>(&self, keywords: &[&'k str]) -> Vec<&'k str> {
        keywords.iter().copied().filter(|k| self.has(k)).collect()
    }

    pub fn count(&self, keywords: &[&str]) -> usize {
        keywords.iter().filter(|k| self.has(k)).count()
    }
}

/// Build a complete [`AiAnalysis`] from keyword heuristics alone.
pub fn local_analysis(text: &str) -> AiAnalysis {
    if text.trim().is_empty() {
        return AiAnalysis::default();
    }

    let tokens = Tokens::new(text);
    let keywords = Keywords::new(text);
    let plagiarism_risk = quality::plagiarism_risk(&keywords);
    let content_quality = quality::content_quality(&tokens, plagiarism_risk.score);

    AiAnalysis {
        advanced_sentiment: emotion::advanced_sentiment(&keywords),
        topics: topics::detect(&keywords),
        writing_style: style::writing_style(&tokens, &keywords),
        insights: insights::generate(&tokens),
        plagiarism_risk,
        content_quality,
        ai_or_human: Authorship::Unknown,
        ai_or_human_confidence: 0,
        ai_or_human_explanation: HEURISTIC_EXPLANATION.to_string(),
    }
    .normalize()
}
