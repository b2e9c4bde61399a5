use once_cell::sync::Lazy;
use regex::Regex;

use super::Tokens;

static SILENT_ENDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").unwrap());
static LEADING_Y: Lazy<Regex> = Lazy::new(|| Regex::new(r"^y").unwrap());
static VOWEL_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[aeiouy]{1,2}").unwrap());

/// Estimate the syllables in one whitespace token.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    if word.chars().count() <= 3 {
        return 1;
    }
    let word = SILENT_ENDING.replace(&word, "");
    let word = LEADING_Y.replace(&word, "");
    VOWEL_GROUP.find_iter(&word).count().max(1)
}

pub fn avg_syllables_per_word(words: &[&str]) -> f64 {
    let total: usize = words.iter().map(|w| count_syllables(w)).sum();
    super::ratio(total, words.len())
}

/// Simplified Flesch Reading Ease, clamped to 0..=100 and rounded.
/// Text without a single sentence scores 0.
pub fn flesch_reading_ease(tokens: &Tokens<'_>) -> u32 {
    if tokens.words.is_empty() || tokens.sentences.is_empty() {
        return 0;
    }
    let score = 206.835
        - 1.015 * tokens.avg_words_per_sentence()
        - 84.6 * avg_syllables_per_word(&tokens.words);
    score.clamp(0.0, 100.0).round() as u32
}

/// Human label for a reading-ease score.
pub fn band(score: u32) -> &'static str {
    match score {
        90.. => "Very Easy",
        80..=89 => "Easy",
        70..=79 => "Fairly Easy",
        60..=69 => "Standard",
        50..=59 => "Fairly Difficult",
        30..=49 => "Difficult",
        _ => "Very Confusing",
    }
}
