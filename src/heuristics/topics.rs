use crate::analysis::{Topic, MAX_TOPICS};
use crate::stats::round2;

use super::Keywords;

const TOPICS: &[(&str, &[&str])] = &[
    (
        "Technology",
        &["technology", "software", "computer", "digital", "ai", "machine", "data", "algorithm"],
    ),
    (
        "Business",
        &["business", "company", "market", "profit", "strategy", "management", "leadership"],
    ),
    (
        "Science",
        &["science", "research", "study", "experiment", "theory", "discovery", "analysis"],
    ),
    (
        "Health",
        &["health", "medical", "disease", "treatment", "patient", "doctor", "medicine"],
    ),
    (
        "Education",
        &["education", "learning", "student", "teacher", "school", "university", "knowledge"],
    ),
    (
        "Politics",
        &["politics", "government", "policy", "election", "democracy", "political"],
    ),
    (
        "Environment",
        &["environment", "climate", "nature", "sustainability", "green", "pollution"],
    ),
];

/// Topics with relevance above this are reported.
const MIN_RELEVANCE: f64 = 0.1;

pub fn detect(keywords: &Keywords) -> Vec<Topic> {
    let mut topics: Vec<Topic> = TOPICS
        .iter()
        .map(|(topic, words)| {
            let matched = keywords.matching(words);
            Topic {
                topic: topic.to_string(),
                relevance: round2(matched.len() as f64 / words.len() as f64),
                keywords: matched.into_iter().map(String::from).collect(),
            }
        })
        .filter(|t| t.relevance > MIN_RELEVANCE)
        .collect();

    topics.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    topics.truncate(MAX_TOPICS);
    topics
}
