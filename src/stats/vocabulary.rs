use std::collections::{HashMap, HashSet};

use crate::analysis::WordFrequency;

use super::Tokens;

/// How many entries `top_words` keeps for a report.
pub const TOP_WORDS: usize = 5;

/// Function words never reported as top words.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "must", "can", "this", "that", "these", "those", "i", "you",
    "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
];

/// Distinct lowercase tokens as a percentage of all tokens.
pub fn richness(words: &[&str]) -> f64 {
    let unique: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
    super::ratio(unique.len(), words.len()) * 100.0
}

/// Average token length plus average sentence length, halved.
pub fn complexity_score(tokens: &Tokens<'_>) -> f64 {
    (tokens.avg_word_length() + tokens.avg_words_per_sentence()) / 2.0
}

/// Most frequent content words, highest count first.
/// Equal counts keep the order in which the words first appeared.
pub fn top_words(words: &[&str], limit: usize) -> Vec<WordFrequency> {
    let mut order: Vec<WordFrequency> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for word in words {
        let clean: String = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase())
            .collect();
        if clean.len() <= 2 || STOP_WORDS.contains(&clean.as_str()) {
            continue;
        }
        match index.get(&clean) {
            Some(&i) => order[i].count += 1,
            None => {
                index.insert(clean.clone(), order.len());
                order.push(WordFrequency {
                    word: clean,
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so first-seen order survives among ties
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(limit);
    order
}
