/// Turns search results into the text a citizen reads.
///
/// With a provider configured, the composer asks it to phrase the answer and returns the
/// trimmed text. Every provider failure falls through to a deterministic template built
/// from the scheme's own fields, so composing never fails.
use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::{ReplyCache, ReplyKind};
use crate::error::GenerationError;
use crate::messages::{self, ErrorReason, Language};
use crate::model::SchemeRecord;
use crate::provider::{GenerationSettings, Prompt, TextGenerator};

const FALLBACK_EXCERPT_CHARS: usize = 150;
const PROMPT_EXCERPT_CHARS: usize = 200;
const MULTI_SCHEME_LIMIT: usize = 3;

pub struct ResponseComposer {
    generator: Option<Arc<dyn TextGenerator>>,
    cache: Arc<ReplyCache>,
    language: Language,
}

/// Result of a provider liveness probe, reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    NotConfigured,
    Reachable,
    Unreachable(String),
}

impl ResponseComposer {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        cache: Arc<ReplyCache>,
        language: Language,
    ) -> Self {
        Self {
            generator,
            cache,
            language,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn generator(&self) -> Option<&Arc<dyn TextGenerator>> {
        self.generator.as_ref()
    }

    pub fn is_provider_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub fn compose_error(&self, query: &str, reason: ErrorReason) -> String {
        messages::error_message(self.language, reason, query)
    }

    /// Answer for the best match, or the `no_results` message when there is none.
    pub async fn compose(&self, top: Option<&SchemeRecord>, query: &str) -> String {
        let Some(scheme) = top else {
            return self.compose_error(query, ErrorReason::NoResults);
        };

        let prompt = Prompt::new(
            messages::system_prompt(self.language),
            messages::single_scheme_prompt(
                self.language,
                query,
                &scheme.title,
                &scheme.description,
                &scheme.link,
            ),
        );

        match self
            .generate_cached(ReplyKind::Single, &[scheme], query, &prompt, None)
            .await
        {
            Ok(text) => {
                info!(scheme = %scheme.title, "composed provider reply");
                text
            }
            Err(e) => {
                log_fallback(&e, &scheme.title);
                self.fallback(scheme)
            }
        }
    }

    /// Longer answer covering up to three matches.
    pub async fn compose_many(&self, schemes: &[&SchemeRecord], query: &str) -> String {
        let Some(main) = schemes.first() else {
            return self.compose_error(query, ErrorReason::NoResults);
        };

        let shown = &schemes[..schemes.len().min(MULTI_SCHEME_LIMIT)];
        let block: String = shown
            .iter()
            .enumerate()
            .map(|(i, s)| {
                messages::scheme_block_entry(
                    self.language,
                    i + 1,
                    &s.title,
                    &excerpt(&s.description, PROMPT_EXCERPT_CHARS),
                    &s.link,
                )
            })
            .collect();
        let prompt = Prompt::new(
            messages::system_prompt(self.language),
            messages::multi_scheme_prompt(self.language, query, &block),
        );
        let settings = GenerationSettings {
            temperature: 0.3,
            max_tokens: 500,
            top_p: Some(0.9),
        };
        match self
            .generate_cached(ReplyKind::Multi, shown, query, &prompt, Some(settings))
            .await
        {
            Ok(text) => {
                info!(schemes = shown.len(), "composed provider reply for several schemes");
                text
            }
            Err(e) => {
                log_fallback(&e, &main.title);
                self.fallback_many(schemes)
            }
        }
    }

    /// Deterministic single-scheme answer. Always contains the scheme's link.
    pub fn fallback(&self, scheme: &SchemeRecord) -> String {
        let mut parts = vec![messages::scheme_available(self.language, &scheme.title)];
        if !scheme.description.trim().is_empty() {
            parts.push(messages::description_excerpt(
                self.language,
                &excerpt(&scheme.description, FALLBACK_EXCERPT_CHARS),
            ));
        }
        parts.push(messages::apply_call_to_action(self.language, &scheme.link));
        parts.join(" ")
    }

    pub fn fallback_many(&self, schemes: &[&SchemeRecord]) -> String {
        let Some(main) = schemes.first() else {
            return String::new();
        };
        let mut parts = vec![messages::scheme_suitable(self.language, &main.title)];
        if !main.description.trim().is_empty() {
            parts.push(messages::description_excerpt(
                self.language,
                &excerpt(&main.description, FALLBACK_EXCERPT_CHARS),
            ));
        }
        if schemes.len() > 1 {
            parts.push(messages::more_schemes(self.language, schemes.len() - 1));
        }
        parts.push(messages::apply_call_to_action(self.language, &main.link));
        parts.join(" ")
    }

    pub async fn check_provider(&self) -> ProviderStatus {
        let Some(generator) = &self.generator else {
            return ProviderStatus::NotConfigured;
        };
        let (system, user) = messages::ping_prompt(self.language);
        match generator.ping(&Prompt::new(system, user)).await {
            Ok(()) => ProviderStatus::Reachable,
            Err(e) => {
                warn!(provider = generator.provider(), error = %e, "provider liveness check failed");
                ProviderStatus::Unreachable(e.to_string())
            }
        }
    }

    async fn generate_cached(
        &self,
        kind: ReplyKind,
        schemes: &[&SchemeRecord],
        query: &str,
        prompt: &Prompt,
        settings: Option<GenerationSettings>,
    ) -> Result<String, GenerationError> {
        let generator = self.generator.as_ref().ok_or(GenerationError::NotConfigured)?;

        if let Some(cached) = self.cache.get_reply(self.language, kind, schemes, query).await {
            info!(query, "reply cache hit");
            return Ok(cached);
        }

        let settings = settings.unwrap_or_else(|| generator.default_settings());
        let text = generator.generate(prompt, settings).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        self.cache.set_reply(self.language, kind, schemes, query, text).await;
        Ok(text.to_string())
    }
}

fn log_fallback(err: &GenerationError, title: &str) {
    match err {
        GenerationError::NotConfigured => info!(scheme = %title, "using fallback reply"),
        other => warn!(scheme = %title, error = %other, "provider reply failed, using fallback"),
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
