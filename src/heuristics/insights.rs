use std::collections::HashSet;

use crate::analysis::{Insight, InsightKind};
use crate::stats::{ratio, Tokens};

/// Population standard deviation of the words-per-sentence counts.
pub fn sentence_length_spread(tokens: &Tokens<'_>) -> f64 {
    let lengths: Vec<f64> = tokens
        .sentences
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .collect();
    if lengths.is_empty() {
        return 0.0;
    }
    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<f64>() / n;
    (lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / n).sqrt()
}

fn strength(title: &str, description: &str) -> Insight {
    Insight {
        kind: InsightKind::Strength,
        title: title.to_string(),
        description: description.to_string(),
        suggestion: None,
    }
}

fn improvement(title: &str, description: &str, suggestion: &str) -> Insight {
    Insight {
        kind: InsightKind::Improvement,
        title: title.to_string(),
        description: description.to_string(),
        suggestion: Some(suggestion.to_string()),
    }
}

pub fn generate(tokens: &Tokens<'_>) -> Vec<Insight> {
    let mut insights = Vec::new();
    if tokens.words.is_empty() {
        return insights;
    }

    if !tokens.sentences.is_empty() {
        if sentence_length_spread(tokens) < 3.0 {
            insights.push(improvement(
                "Sentence Variety",
                "Your sentences have similar lengths, which can make the text monotonous.",
                "Try varying sentence lengths to create more engaging rhythm.",
            ));
        } else {
            insights.push(strength(
                "Good Sentence Variety",
                "Your text has good sentence length variety, creating engaging rhythm.",
            ));
        }
    }

    let unique: HashSet<String> = tokens.words.iter().map(|w| w.to_lowercase()).collect();
    if ratio(unique.len(), tokens.words.len()) < 0.4 {
        insights.push(improvement(
            "Vocabulary Diversity",
            "Consider using more diverse vocabulary to make your writing more engaging.",
            "Try using synonyms and varied expressions.",
        ));
    } else {
        insights.push(strength(
            "Rich Vocabulary",
            "Your text demonstrates good vocabulary diversity.",
        ));
    }

    if tokens.avg_words_per_sentence() > 25.0 {
        insights.push(improvement(
            "Sentence Length",
            "Some sentences are quite long and may be difficult to read.",
            "Consider breaking long sentences into shorter, clearer ones.",
        ));
    }

    if ratio(tokens.sentences.len(), tokens.paragraph_count()) > 8.0 {
        insights.push(improvement(
            "Paragraph Structure",
            "Consider breaking up long paragraphs for better readability.",
            "Aim for 3-5 sentences per paragraph for optimal reading flow.",
        ));
    }

    insights
}
