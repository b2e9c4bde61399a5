use crate::analysis::{Sentiment, SentimentLabel};

const POSITIVE: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
    "love",
    "like",
    "happy",
    "joy",
    "beautiful",
    "perfect",
    "best",
    "awesome",
    "brilliant",
];

const NEGATIVE: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "horrible",
    "hate",
    "dislike",
    "sad",
    "angry",
    "worst",
    "disgusting",
    "ugly",
    "disappointed",
    "frustrating",
    "annoying",
];

/// Scores above this are positive, below its negation negative.
const LABEL_THRESHOLD: f64 = 0.1;

/// Lexicon sentiment over whitespace tokens.
pub fn analyze(words: &[&str]) -> Sentiment {
    if words.is_empty() {
        return Sentiment::default();
    }

    let raw: i64 = words
        .iter()
        .map(|w| normalize_token(w))
        .map(|w| {
            if POSITIVE.contains(&w.as_str()) {
                1
            } else if NEGATIVE.contains(&w.as_str()) {
                -1
            } else {
                0
            }
        })
        .sum();

    let score = (raw as f64 / words.len() as f64 * 10.0).clamp(-1.0, 1.0);
    let label = if score > LABEL_THRESHOLD {
        SentimentLabel::Positive
    } else if score < -LABEL_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    Sentiment {
        score: super::round2(score),
        label,
    }
}

/// Lowercase and drop punctuation hugging the token ("great!" -> "great").
fn normalize_token(word: &str) -> String {
    word.trim_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase()
}
