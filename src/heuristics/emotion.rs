use crate::analysis::{AdvancedSentiment, Emotion, Intensity};
use crate::stats::round2;

use super::Keywords;

const EMOTIONS: &[(&str, &[&str])] = &[
    ("joy", &["happy", "excited", "wonderful", "amazing", "fantastic", "great"]),
    ("sadness", &["sad", "depressed", "unhappy", "miserable", "disappointed"]),
    ("anger", &["angry", "furious", "mad", "irritated", "frustrated"]),
    ("fear", &["scared", "afraid", "terrified", "worried", "anxious"]),
    ("surprise", &["surprised", "shocked", "amazed", "astonished", "incredible"]),
    ("trust", &["trust", "believe", "confident", "sure", "certain"]),
];

pub fn intensity(score: f64) -> Intensity {
    if score > 0.7 {
        Intensity::High
    } else if score > 0.3 {
        Intensity::Medium
    } else {
        Intensity::Low
    }
}

pub fn advanced_sentiment(keywords: &Keywords) -> AdvancedSentiment {
    let emotions: Vec<Emotion> = EMOTIONS
        .iter()
        .map(|(emotion, words)| {
            let score = round2(keywords.count(words) as f64 / words.len() as f64);
            Emotion {
                emotion: emotion.to_string(),
                score,
                intensity: intensity(score),
            }
        })
        .filter(|e| e.score > 0.0)
        .collect();

    let confidence = (60 + 15 * emotions.len()).min(95) as u8;
    AdvancedSentiment {
        context: context(&emotions),
        emotions,
        confidence,
    }
}

fn context(emotions: &[Emotion]) -> String {
    // max_by keeps the last maximum; fold keeps the first
    let primary = emotions.iter().fold(None::<&Emotion>, |best, e| match best {
        Some(b) if b.score >= e.score => Some(b),
        _ => Some(e),
    });
    match primary {
        Some(e) => format!(
            "The text primarily conveys {} with {} intensity.",
            e.emotion, e.intensity
        ),
        None => "The text appears to be emotionally neutral.".to_string(),
    }
}
