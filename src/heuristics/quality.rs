use crate::analysis::{ContentQuality, PlagiarismRisk, RiskLevel};
use crate::stats::{vocabulary, Tokens};

use super::insights::sentence_length_spread;
use super::Keywords;

/// Stock phrases common in boilerplate and recycled writing.
const STOCK_PHRASES: &[&str] = &[
    "in conclusion",
    "it is important to note",
    "furthermore",
    "moreover",
    "as a result",
    "therefore",
    "in addition",
    "on the other hand",
];

const POINTS_PER_PHRASE: usize = 10;

pub fn risk_level(score: u8) -> RiskLevel {
    match score {
        0..=29 => RiskLevel::Low,
        30..=69 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

pub fn plagiarism_risk(keywords: &Keywords) -> PlagiarismRisk {
    let hits = STOCK_PHRASES
        .iter()
        .filter(|p| keywords.has_phrase(p))
        .count();
    let score = (hits * POINTS_PER_PHRASE).min(100) as u8;
    let level = risk_level(score);
    PlagiarismRisk {
        score,
        level,
        details: format!(
            "Based on phrase analysis and text patterns, this content shows {} similarity \
             to common writing patterns.",
            level
        ),
    }
}

fn bounded(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

/// Clarity falls as sentences grow past 15 words. Coherence and engagement
/// follow sentence-length spread; originality follows vocabulary richness
/// and the plagiarism score.
pub fn content_quality(tokens: &Tokens<'_>, plagiarism_score: u8) -> ContentQuality {
    let spread = sentence_length_spread(tokens);
    let richness = vocabulary::richness(&tokens.words) / 100.0;

    let clarity = bounded(100.0 - (tokens.avg_words_per_sentence() - 15.0) * 2.0);
    let coherence = bounded(100.0 - spread.min(20.0));
    let engagement = bounded(60.0 + 40.0 * (spread / 10.0).min(1.0));
    let originality =
        bounded(70.0 + 30.0 * richness * (1.0 - f64::from(plagiarism_score) / 100.0));

    let overall = bounded(
        (f64::from(clarity) + f64::from(coherence) + f64::from(engagement) + f64::from(originality))
            / 4.0,
    );

    ContentQuality {
        overall,
        clarity,
        coherence,
        engagement,
        originality,
    }
}
