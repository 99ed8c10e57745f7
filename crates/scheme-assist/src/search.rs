/// Linear keyword search over the in-memory catalog.
///
/// Every record is scored, zero scores are dropped, and the rest are ordered by score
/// descending. Ties keep catalog order because the sort is stable.
use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::SchemeCatalog;
use crate::config::SearchLimits;
use crate::model::SchemeRecord;
use crate::scoring;

pub struct SchemeSearch {
    catalog: Arc<SchemeCatalog>,
    limits: SearchLimits,
}

#[derive(Debug, Clone)]
pub struct ScoredMatch<'a> {
    pub category: &'a str,
    pub scheme: &'a SchemeRecord,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    pub matches: Vec<ScoredMatch<'a>>,
    /// Number of scoring records before truncation.
    pub total_found: usize,
    pub query: String,
    /// The query was too short to search at all.
    pub rejected: bool,
}

impl SearchOutcome<'_> {
    pub fn top(&self) -> Option<&ScoredMatch<'_>> {
        self.matches.first()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl SchemeSearch {
    pub fn new(catalog: Arc<SchemeCatalog>, limits: SearchLimits) -> Self {
        Self { catalog, limits }
    }

    pub fn catalog(&self) -> &SchemeCatalog {
        &self.catalog
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    pub fn search(&self, query: &str) -> SearchOutcome<'_> {
        if query.trim().chars().count() < self.limits.min_query_len {
            debug!(query, "query too short, skipping search");
            return SearchOutcome {
                matches: Vec::new(),
                total_found: 0,
                query: query.to_string(),
                rejected: true,
            };
        }

        let words = scoring::tokenize(query);
        let mut matches: Vec<ScoredMatch<'_>> = self
            .catalog
            .iter()
            .filter_map(|(category, scheme)| {
                let score = scoring::score(scheme, &words);
                (score > 0.0).then_some(ScoredMatch {
                    category,
                    scheme,
                    score,
                })
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        let total_found = matches.len();
        matches.truncate(self.limits.max_results);

        info!(
            query,
            total_found,
            returned = matches.len(),
            "scheme search complete"
        );

        SearchOutcome {
            matches,
            total_found,
            query: query.to_string(),
            rejected: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(json: &str) -> Arc<SchemeCatalog> {
        Arc::new(SchemeCatalog::from_json_str(json).unwrap())
    }

    fn sample() -> Arc<SchemeCatalog> {
        catalog(
            r#"{"schemes": {
                "housing": [
                    {"title": "Awas Yojana", "description": "house for rural poor", "link": "https://pmay.gov.in", "keywords": ["house", "घर"]},
                    {"title": "Urban Housing", "description": "house in cities", "link": "https://pmaymis.gov.in", "keywords": ["urban"]}
                ],
                "health": [
                    {"title": "Ayushman Bharat", "description": "health insurance", "link": "https://pmjay.gov.in", "keywords": ["health", "इलाज"]}
                ]
            }}"#,
        )
    }

    #[test]
    fn short_queries_return_nothing() {
        let search = SchemeSearch::new(sample(), SearchLimits::default());
        for q in ["", " ", "a", "  घ  "] {
            let outcome = search.search(q);
            assert!(outcome.is_empty(), "query {q:?}");
            assert_eq!(outcome.total_found, 0);
            assert!(outcome.rejected);
            assert_eq!(outcome.query, q);
        }
    }

    #[test]
    fn results_are_sorted_by_score() {
        let search = SchemeSearch::new(sample(), SearchLimits::default());
        let outcome = search.search("house urban");
        assert!(!outcome.rejected);
        let scores: Vec<f64> = outcome.matches.iter().map(|m| m.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
        // Urban Housing: "house" in description (2) + "urban" keyword (10)
        assert_eq!(outcome.top().unwrap().scheme.title, "Urban Housing");
        assert_eq!(outcome.top().unwrap().category, "housing");
        assert_eq!(outcome.total_found, 2);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let search = SchemeSearch::new(
            catalog(
                r#"{"schemes": {
                    "a": [{"title": "First", "description": "", "link": "https://1.in", "keywords": ["pension"]}],
                    "b": [
                        {"title": "Unrelated", "description": "", "link": "https://0.in", "keywords": []},
                        {"title": "Second", "description": "", "link": "https://2.in", "keywords": ["pension"]}
                    ]
                }}"#,
            ),
            SearchLimits::default(),
        );
        let outcome = search.search("pension");
        let titles: Vec<&str> = outcome.matches.iter().map(|m| m.scheme.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert_eq!(outcome.matches[0].score, outcome.matches[1].score);
    }

    #[test]
    fn truncates_but_reports_total() {
        let search = SchemeSearch::new(
            sample(),
            SearchLimits {
                max_results: 1,
                min_query_len: 2,
            },
        );
        let outcome = search.search("house");
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.total_found, 2);
    }

    #[test]
    fn no_match_is_not_rejected() {
        let search = SchemeSearch::new(sample(), SearchLimits::default());
        let outcome = search.search("tractor subsidy");
        assert!(outcome.is_empty());
        assert!(!outcome.rejected);
        assert_eq!(outcome.total_found, 0);
    }

    #[test]
    fn keyword_round_trip_returns_record_on_top() {
        let search = SchemeSearch::new(
            catalog(
                r#"{"metadata": {}, "schemes": {"misc": [
                    {"title": "Other", "description": "nothing here", "link": "https://o.in", "keywords": ["beta"]},
                    {"title": "Scheme X", "description": "", "link": "https://x.in", "keywords": ["alpha"]}
                ]}}"#,
            ),
            SearchLimits::default(),
        );
        let outcome = search.search("alpha");
        assert_eq!(outcome.top().unwrap().scheme.title, "Scheme X");
    }

    #[test]
    fn empty_catalog_never_matches() {
        let search = SchemeSearch::new(Arc::new(SchemeCatalog::empty()), SearchLimits::default());
        let outcome = search.search("house");
        assert!(outcome.is_empty());
        assert_eq!(outcome.total_found, 0);
    }
}
