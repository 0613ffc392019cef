//! Topic frequency extraction from the document's full text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Common Dutch function words that never count as topics.
const STOPWORDS: [&str; 15] = [
    "de", "het", "een", "en", "van", "in", "op", "voor", "met", "door", "aan", "is", "zijn",
    "worden", "werd",
];

/// How many topics the dashboard shows.
const TOP_N: usize = 10;

/// A topic term with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCount {
    /// Lowercased term, at least four ASCII letters
    pub term: String,

    /// Number of occurrences, at least one
    pub count: usize,
}

/// Tokenizes the full text and ranks terms by frequency.
pub struct TopicExtractor {
    word: Regex,
}

impl TopicExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self {
            word: Regex::new(r"\b[a-zA-Z]{4,}\b").unwrap(),
        }
    }

    /// Return the top topics, ranked descending by count.
    ///
    /// The sort is stable: terms with equal counts keep their first-seen
    /// order. Fewer than ten qualifying terms returns all of them.
    pub fn extract(&self, full_text: &str) -> Vec<TopicCount> {
        let text = full_text.to_lowercase();

        let mut topics: Vec<TopicCount> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for m in self.word.find_iter(&text) {
            let token = m.as_str();
            if STOPWORDS.contains(&token) {
                continue;
            }
            match index.get(token) {
                Some(&i) => topics[i].count += 1,
                None => {
                    index.insert(token.to_string(), topics.len());
                    topics.push(TopicCount {
                        term: token.to_string(),
                        count: 1,
                    });
                }
            }
        }

        topics.sort_by(|a, b| b.count.cmp(&a.count));
        topics.truncate(TOP_N);
        topics
    }
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_case_folding() {
        let topics = TopicExtractor::new().extract("Wonen wonen WONEN mobiliteit");
        assert_eq!(topics[0].term, "wonen");
        assert_eq!(topics[0].count, 3);
        assert_eq!(topics[1].term, "mobiliteit");
        assert_eq!(topics[1].count, 1);
    }

    #[test]
    fn test_short_tokens_and_stopwords_dropped() {
        let topics = TopicExtractor::new().extract("de het een voor met wijk ov fiets");
        let terms: Vec<&str> = topics.iter().map(|t| t.term.as_str()).collect();
        // "wijk" and "fiets" survive; stopwords and tokens under four letters don't.
        assert_eq!(terms, vec!["wijk", "fiets"]);
    }

    #[test]
    fn test_tie_break_keeps_first_seen_order() {
        let topics =
            TopicExtractor::new().extract("duurzaamheid economie wonen economie duurzaamheid wonen");
        let terms: Vec<&str> = topics.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(terms, vec!["duurzaamheid", "economie", "wonen"]);
    }

    #[test]
    fn test_top_ten_cap() {
        let text = ('a'..='o')
            .map(|c| format!("onderwerp{c}"))
            .collect::<Vec<_>>()
            .join(" ");
        let topics = TopicExtractor::new().extract(&text);
        assert_eq!(topics.len(), 10);
    }

    #[test]
    fn test_empty_text() {
        assert!(TopicExtractor::new().extract("").is_empty());
    }
}
