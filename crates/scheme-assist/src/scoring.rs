/// Keyword relevance scoring for a single scheme record.
///
/// Each query word earns points from the first tier it matches, in order:
/// exact keyword (10.0), title substring (5.0), description substring (2.0),
/// substring of any token in the combined text (0.5). Words shorter than
/// `MIN_WORD_CHARS` are ignored.
use crate::model::SchemeRecord;

pub const KEYWORD_MATCH: f64 = 10.0;
pub const TITLE_MATCH: f64 = 5.0;
pub const DESCRIPTION_MATCH: f64 = 2.0;
pub const PARTIAL_MATCH: f64 = 0.5;

const MIN_WORD_CHARS: usize = 2;

/// Score `record` against lower-cased, whitespace-split `query_words`.
///
/// Pure; a score of zero means the record is irrelevant.
pub fn score<S: AsRef<str>>(record: &SchemeRecord, query_words: &[S]) -> f64 {
    let fields = LoweredFields::new(record);
    query_words
        .iter()
        .map(|word| fields.word_score(word.as_ref()))
        .sum()
}

/// Split a raw query into the lower-cased words `score` expects.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

struct LoweredFields {
    title: String,
    description: String,
    keywords: Vec<String>,
    combined: String,
}

impl LoweredFields {
    fn new(record: &SchemeRecord) -> Self {
        let title = record.title.to_lowercase();
        let description = record.description.to_lowercase();
        let keywords: Vec<String> = record.keywords.iter().map(|k| k.to_lowercase()).collect();
        let combined = format!("{title} {description} {}", keywords.join(" "));
        Self {
            title,
            description,
            keywords,
            combined,
        }
    }

    fn word_score(&self, word: &str) -> f64 {
        let word = word.to_lowercase();
        if word.chars().count() < MIN_WORD_CHARS {
            return 0.0;
        }

        if self.keywords.iter().any(|k| *k == word) {
            KEYWORD_MATCH
        } else if self.title.contains(&word) {
            TITLE_MATCH
        } else if self.description.contains(&word) {
            DESCRIPTION_MATCH
        } else if self.combined.split_whitespace().any(|token| token.contains(&word)) {
            PARTIAL_MATCH
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, description: &str, keywords: &[&str]) -> SchemeRecord {
        SchemeRecord {
            title: title.to_string(),
            description: description.to_string(),
            link: "https://example.gov.in".to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn tiers_are_mutually_exclusive() {
        let r = record(
            "Pradhan Mantri Awas Yojana",
            "Financial help to build a pucca house",
            &["housing", "घर", "home loan"],
        );

        // keyword also appears nowhere else; exact keyword wins
        assert_eq!(score(&r, &["housing"]), KEYWORD_MATCH);
        assert_eq!(score(&r, &["घर"]), KEYWORD_MATCH);
        // "awas" is in the title only
        assert_eq!(score(&r, &["awas"]), TITLE_MATCH);
        // "pucca" is in the description only
        assert_eq!(score(&r, &["pucca"]), DESCRIPTION_MATCH);
        // "loan" is part of a multi-word keyword, not an exact keyword
        assert_eq!(score(&r, &["loan"]), PARTIAL_MATCH);
        assert_eq!(score(&r, &["tractor"]), 0.0);
    }

    #[test]
    fn keyword_that_is_also_in_title_counts_once() {
        let r = record("Housing for All", "housing everywhere", &["housing"]);
        assert_eq!(score(&r, &["housing"]), KEYWORD_MATCH);
    }

    #[test]
    fn short_words_are_ignored() {
        let r = record("A scheme", "a b c", &["a"]);
        assert_eq!(score(&r, &["a", "b"]), 0.0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let r = record("MGNREGA", "Rural Employment", &["Job"]);
        assert_eq!(score(&r, &["job"]), KEYWORD_MATCH);
        assert_eq!(score(&r, &["MGNREGA"]), TITLE_MATCH);
        assert_eq!(score(&r, &tokenize("RURAL")), DESCRIPTION_MATCH);
    }

    #[test]
    fn scores_sum_across_words() {
        let r = record("Kisan Samman Nidhi", "Income support to farmers", &["kisan", "किसान"]);
        let total = score(&r, &tokenize("Kisan income farmers"));
        assert_eq!(total, KEYWORD_MATCH + DESCRIPTION_MATCH + DESCRIPTION_MATCH);
    }

    #[test]
    fn adding_a_matching_word_never_decreases_score() {
        let r = record("Ayushman Bharat", "Health cover for poor families", &["health", "इलाज"]);
        let mut words = tokenize("xyz qqq");
        let mut previous = score(&r, &words);
        for extra in ["health", "ayushman", "families", "इलाज", "he"] {
            words.push(extra.to_string());
            let current = score(&r, &words);
            assert!(current >= previous, "{extra}: {current} < {previous}");
            previous = current;
        }
        assert!(previous > 0.0);
    }

    #[test]
    fn keyword_query_beats_unrelated_query() {
        let r = record("Scheme X", "Something", &["alpha"]);
        assert!(score(&r, &["alpha"]) > score(&r, &["unrelated", "words"]));
        assert_eq!(score(&r, &["unrelated", "words"]), 0.0);
    }

    #[test]
    fn tokenize_lowercases_and_splits() {
        assert_eq!(tokenize("  Ghar  BANANE\tki yojana "), vec!["ghar", "banane", "ki", "yojana"]);
        assert!(tokenize("   ").is_empty());
    }
}
