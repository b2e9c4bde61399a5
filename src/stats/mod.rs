pub mod readability;
pub mod sentiment;
pub mod vocabulary;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::{AuthorshipFeatures, TextStats};

/// Words read per minute when estimating reading time.
pub const WORDS_PER_MINUTE: usize = 200;

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Text split into the three units every statistic is built from.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    pub words: Vec<&'a str>,
    pub sentences: Vec<&'a str>,
    pub paragraphs: Vec<&'a str>,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            words: text.split_whitespace().collect(),
            sentences: SENTENCE_BREAK
                .split(text)
                .filter(|s| !s.trim().is_empty())
                .collect(),
            paragraphs: PARAGRAPH_BREAK
                .split(text)
                .filter(|p| !p.trim().is_empty())
                .collect(),
        }
    }

    /// Paragraph count, never below 1 for non-empty text.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len().max(1)
    }

    pub fn avg_words_per_sentence(&self) -> f64 {
        ratio(self.words.len(), self.sentences.len())
    }

    pub fn avg_word_length(&self) -> f64 {
        let chars: usize = self.words.iter().map(|w| w.chars().count()).sum();
        ratio(chars, self.words.len())
    }
}

/// Compute every deterministic statistic for `text`.
/// Blank input yields the all-zero default.
pub fn analyze_text(text: &str) -> TextStats {
    if text.trim().is_empty() {
        return TextStats::default();
    }

    let tokens = Tokens::new(text);
    let word_count = tokens.words.len();
    let sentence_count = tokens.sentences.len();
    let paragraph_count = tokens.paragraph_count();

    TextStats {
        word_count,
        character_count: text.chars().count(),
        sentence_count,
        paragraph_count,
        readability_score: readability::flesch_reading_ease(&tokens),
        sentiment: sentiment::analyze(&tokens.words),
        authorship_features: AuthorshipFeatures {
            avg_words_per_sentence: round1(tokens.avg_words_per_sentence()),
            avg_sentences_per_paragraph: round1(ratio(sentence_count, paragraph_count)),
            complexity_score: round1(vocabulary::complexity_score(&tokens)),
            vocabulary_richness: round1(vocabulary::richness(&tokens.words)),
        },
        top_words: vocabulary::top_words(&tokens.words, vocabulary::TOP_WORDS),
        estimated_reading_time: word_count.div_ceil(WORDS_PER_MINUTE),
    }
}

/// `a / b`, or 0 when `b` is 0.
pub(crate) fn ratio(a: usize, b: usize) -> f64 {
    if b == 0 {
        0.0
    } else {
        a as f64 / b as f64
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SentimentLabel;

    const SAMPLE: &str = "The quick brown fox jumps over the lazy dog. It was a great day!\n\n\
                          Foxes are clever animals. Dogs are loyal animals?";

    #[test]
    fn blank_text_is_all_zero() {
        for text in ["", "   ", "\n\t\n"] {
            let stats = analyze_text(text);
            assert_eq!(stats, TextStats::default());
            assert_eq!(stats.sentiment.label, SentimentLabel::Neutral);
            assert!(stats.top_words.is_empty());
        }
    }

    #[test]
    fn counts_words_sentences_paragraphs() {
        let stats = analyze_text(SAMPLE);
        assert_eq!(stats.word_count, 22);
        assert_eq!(stats.sentence_count, 4);
        assert_eq!(stats.paragraph_count, 2);
        assert_eq!(stats.character_count, SAMPLE.chars().count());
    }

    #[test]
    fn word_count_ignores_runs_of_whitespace() {
        let stats = analyze_text("  one\t\ttwo \n three   ");
        assert_eq!(stats.word_count, 3);
    }

    #[test]
    fn single_paragraph_without_blank_lines() {
        let stats = analyze_text("One line.\nAnother line.");
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.sentence_count, 2);
    }

    #[test]
    fn punctuation_runs_count_once() {
        let stats = analyze_text("Really?! Yes... Absolutely!!!");
        assert_eq!(stats.sentence_count, 3);
    }

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(analyze_text("word").estimated_reading_time, 1);
        let two_hundred = "word ".repeat(200);
        assert_eq!(analyze_text(&two_hundred).estimated_reading_time, 1);
        let two_hundred_one = "word ".repeat(201);
        assert_eq!(analyze_text(&two_hundred_one).estimated_reading_time, 2);
    }

    #[test]
    fn authorship_features_are_rounded_to_one_decimal() {
        let stats = analyze_text("One two three. Four five six seven.");
        assert_eq!(stats.authorship_features.avg_words_per_sentence, 3.5);
        assert_eq!(stats.authorship_features.avg_sentences_per_paragraph, 2.0);
        assert_eq!(stats.authorship_features.vocabulary_richness, 100.0);
    }

    #[test]
    fn punctuation_only_text_stays_finite() {
        let stats = analyze_text("...");
        assert_eq!(stats.word_count, 1);
        assert_eq!(stats.sentence_count, 0);
        assert_eq!(stats.readability_score, 0);
        assert!(stats.authorship_features.complexity_score.is_finite());
        assert!(stats.authorship_features.avg_words_per_sentence.is_finite());
    }

    #[test]
    fn stats_are_reproducible() {
        assert_eq!(analyze_text(SAMPLE), analyze_text(SAMPLE));
    }
}
