/// Structured reading of a free-text query.
///
/// The provider is asked for a JSON object; the first `{...}` span of its reply is
/// deserialized. Anything else (no provider, call failure, no JSON, bad JSON) lands on a
/// fixed keyword mapping.
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{info, warn};

use crate::error::GenerationError;
use crate::messages;
use crate::model::{EnhancedQuery, QueryCategory, QueryIntent};
use crate::provider::{GenerationSettings, Prompt, TextGenerator};

static JSON_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid JSON span regex"));

const ENHANCE_SETTINGS: GenerationSettings = GenerationSettings {
    temperature: 0.2,
    max_tokens: 400,
    top_p: None,
};

const HOUSING_WORDS: &[&str] = &["घर", "आवास", "house", "housing", "मकान"];
const EMPLOYMENT_WORDS: &[&str] = &["नौकरी", "काम", "employment", "job", "रोजगार"];
const HEALTH_WORDS: &[&str] = &["स्वास्थ्य", "इलाज", "health", "medical", "hospital"];

pub struct QueryEnhancer {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl QueryEnhancer {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub async fn enhance(&self, query: &str) -> EnhancedQuery {
        let Some(generator) = &self.generator else {
            return fallback_enhancement(query);
        };

        match self.ask(generator.as_ref(), query).await {
            Ok(enhanced) => {
                info!(query, category = ?enhanced.category, "enhanced query with provider");
                enhanced
            }
            Err(e) => {
                warn!(query, error = %e, "query enhancement failed, using keyword mapping");
                fallback_enhancement(query)
            }
        }
    }

    async fn ask(
        &self,
        generator: &dyn TextGenerator,
        query: &str,
    ) -> Result<EnhancedQuery, GenerationError> {
        let prompt = Prompt::new(
            messages::enhancement_system_prompt(),
            messages::enhancement_prompt(query),
        );
        let reply = generator.generate(&prompt, ENHANCE_SETTINGS).await?;
        parse_enhancement(&reply)
    }
}

fn parse_enhancement(reply: &str) -> Result<EnhancedQuery, GenerationError> {
    let span = JSON_SPAN_RE
        .find(reply)
        .ok_or_else(|| GenerationError::Malformed("no JSON object in reply".to_string()))?;
    serde_json::from_str(span.as_str()).map_err(|e| GenerationError::Malformed(e.to_string()))
}

/// Deterministic mapping used whenever the provider cannot help.
pub fn fallback_enhancement(query: &str) -> EnhancedQuery {
    let lowered = query.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| lowered.contains(w));

    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    if mentions(HOUSING_WORDS) {
        EnhancedQuery {
            search_keywords: owned(&["housing scheme", "pradhan mantri awas yojana", "home construction"]),
            hindi_keywords: owned(&["आवास योजना", "घर निर्माण"]),
            category: QueryCategory::Housing,
            intent: QueryIntent::SchemeInfo,
            target_websites: owned(&["pmay.gov.in", "india.gov.in", "myscheme.gov.in"]),
        }
    } else if mentions(EMPLOYMENT_WORDS) {
        EnhancedQuery {
            search_keywords: owned(&["employment scheme", "job guarantee", "mgnrega"]),
            hindi_keywords: owned(&["रोजगार योजना", "नौकरी"]),
            category: QueryCategory::Employment,
            intent: QueryIntent::SchemeInfo,
            target_websites: owned(&["nrega.nic.in", "pmkvyofficial.org", "india.gov.in"]),
        }
    } else if mentions(HEALTH_WORDS) {
        EnhancedQuery {
            search_keywords: owned(&["health scheme", "ayushman bharat", "medical insurance"]),
            hindi_keywords: owned(&["स्वास्थ्य योजना", "इलाज"]),
            category: QueryCategory::Health,
            intent: QueryIntent::SchemeInfo,
            target_websites: owned(&["pmjay.gov.in", "nhm.gov.in", "india.gov.in"]),
        }
    } else {
        EnhancedQuery {
            search_keywords: vec![query.to_string(), "government scheme".to_string()],
            hindi_keywords: vec![query.to_string()],
            category: QueryCategory::General,
            intent: QueryIntent::SchemeInfo,
            target_websites: owned(&["india.gov.in", "myscheme.gov.in"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::tests::FakeGenerator;

    #[test]
    fn fallback_maps_known_topics() {
        assert_eq!(fallback_enhancement("घर बनाने की योजना").category, QueryCategory::Housing);
        assert_eq!(fallback_enhancement("Need a JOB").category, QueryCategory::Employment);
        assert_eq!(fallback_enhancement("hospital bills").category, QueryCategory::Health);
    }

    #[test]
    fn fallback_checks_housing_before_employment() {
        let enhanced = fallback_enhancement("घर और नौकरी");
        assert_eq!(enhanced.category, QueryCategory::Housing);
    }

    #[test]
    fn fallback_general_keeps_raw_query() {
        let enhanced = fallback_enhancement("tractor subsidy");
        assert_eq!(enhanced.category, QueryCategory::General);
        assert_eq!(enhanced.search_keywords[0], "tractor subsidy");
        assert_eq!(enhanced.hindi_keywords, vec!["tractor subsidy".to_string()]);
    }

    #[test]
    fn parses_json_wrapped_in_prose() {
        let reply = "Here you go:\n```json\n{\"search_keywords\": [\"pension\"], \"category\": \"pension\", \"intent\": \"eligibility\"}\n```";
        let enhanced = parse_enhancement(reply).unwrap();
        assert_eq!(enhanced.search_keywords, vec!["pension".to_string()]);
        assert_eq!(enhanced.category, QueryCategory::Pension);
        assert_eq!(enhanced.intent, QueryIntent::Eligibility);
        assert!(enhanced.target_websites.is_empty());
    }

    #[test]
    fn unknown_category_becomes_general() {
        let enhanced = parse_enhancement(r#"{"category": "transport", "intent": "other"}"#).unwrap();
        assert_eq!(enhanced.category, QueryCategory::General);
        assert_eq!(enhanced.intent, QueryIntent::SchemeInfo);
    }

    #[test]
    fn reply_without_json_is_malformed() {
        assert!(matches!(
            parse_enhancement("sorry, I cannot help"),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn provider_reply_is_used_when_valid() {
        let fake = FakeGenerator::replying(r#"{"search_keywords": ["scholarship"], "category": "education"}"#);
        let enhancer = QueryEnhancer::new(Some(fake.clone()));
        let enhanced = enhancer.enhance("padhai").await;
        assert_eq!(enhanced.category, QueryCategory::Education);
        assert!(fake.prompts.lock().unwrap()[0].user.contains("padhai"));
    }

    #[tokio::test]
    async fn provider_garbage_falls_back() {
        let enhancer = QueryEnhancer::new(Some(FakeGenerator::replying("not json at all")));
        assert_eq!(enhancer.enhance("house").await, fallback_enhancement("house"));

        let enhancer = QueryEnhancer::new(Some(FakeGenerator::failing()));
        assert_eq!(enhancer.enhance("job").await, fallback_enhancement("job"));
    }

    #[tokio::test]
    async fn no_provider_uses_fallback() {
        let enhancer = QueryEnhancer::new(None);
        assert_eq!(enhancer.enhance("इलाज").await.category, QueryCategory::Health);
    }
}
