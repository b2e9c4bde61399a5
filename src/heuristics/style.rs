use crate::analysis::{Complexity, Formality, WritingStyle};
use crate::stats::Tokens;

use super::Keywords;

const FORMAL_MARKERS: &[&str] = &[
    "therefore",
    "furthermore",
    "moreover",
    "consequently",
    "subsequently",
];
const CASUAL_MARKERS: &[&str] = &["hey", "cool", "awesome", "gonna", "wanna", "gotta"];

const TONES: &[(&str, &[&str])] = &[
    ("Professional", &["analysis", "research", "study", "report", "findings"]),
    ("Conversational", &["you", "we", "let's", "think", "imagine"]),
    ("Academic", &["theory", "hypothesis", "methodology", "conclusion", "evidence"]),
    ("Creative", &["imagine", "dream", "vision", "inspire", "create"]),
];

pub fn formality(keywords: &Keywords) -> Formality {
    let formal = keywords.count(FORMAL_MARKERS);
    let casual = keywords.count(CASUAL_MARKERS);
    match formal.cmp(&casual) {
        std::cmp::Ordering::Greater => Formality::Formal,
        std::cmp::Ordering::Less => Formality::Casual,
        std::cmp::Ordering::Equal => Formality::Neutral,
    }
}

pub fn complexity(tokens: &Tokens<'_>) -> Complexity {
    let word_len = tokens.avg_word_length();
    let sentence_len = tokens.avg_words_per_sentence();
    if word_len < 4.5 && sentence_len < 15.0 {
        Complexity::Simple
    } else if word_len > 6.0 || sentence_len > 25.0 {
        Complexity::Complex
    } else {
        Complexity::Moderate
    }
}

/// Highest-scoring tone, first listed on ties, "Neutral" if nothing matches.
pub fn tone(keywords: &Keywords) -> &'static str {
    let mut best = ("Neutral", 0);
    for (tone, words) in TONES {
        let score = keywords.count(words);
        if score > best.1 {
            best = (tone, score);
        }
    }
    best.0
}

fn audience(formality: Formality, complexity: Complexity) -> &'static str {
    match (formality, complexity) {
        (Formality::Formal, Complexity::Complex) => "Academic/Professional",
        (Formality::Casual, Complexity::Simple) => "General Public",
        (_, Complexity::Complex) => "Specialized",
        _ => "General",
    }
}

pub fn writing_style(tokens: &Tokens<'_>, keywords: &Keywords) -> WritingStyle {
    let formality = formality(keywords);
    let complexity = complexity(tokens);
    let tone = tone(keywords);
    WritingStyle {
        tone: tone.to_string(),
        formality,
        complexity,
        style: vec![
            formality.to_string(),
            complexity.to_string(),
            tone.to_string(),
        ],
        audience: audience(formality, complexity).to_string(),
    }
}
