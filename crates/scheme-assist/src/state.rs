use std::sync::Arc;

use scheme_common::redis::RedisCache;
use tracing::info;

use crate::cache::ReplyCache;
use crate::catalog::SchemeCatalog;
use crate::compose::ResponseComposer;
use crate::config::{Config, SearchLimits};
use crate::enhance::QueryEnhancer;
use crate::error::AppError;
use crate::messages::Language;
use crate::provider::{ChatCompletionGenerator, TextGenerator};
use crate::search::SchemeSearch;

/// Everything a request needs, built once at startup and shared behind an `Arc`.
///
/// Nothing in here is mutated after construction.
pub struct AppContext {
    pub search: SchemeSearch,
    pub composer: ResponseComposer,
    pub enhancer: QueryEnhancer,
    provider_name: String,
}

impl AppContext {
    pub fn new(
        catalog: SchemeCatalog,
        limits: SearchLimits,
        generator: Option<Arc<dyn TextGenerator>>,
        cache: ReplyCache,
        language: Language,
        provider_name: impl Into<String>,
    ) -> Self {
        let cache = Arc::new(cache);
        Self {
            search: SchemeSearch::new(Arc::new(catalog), limits),
            composer: ResponseComposer::new(generator.clone(), cache, language),
            enhancer: QueryEnhancer::new(generator),
            provider_name: provider_name.into(),
        }
    }

    /// Wire up the production context: catalog from disk, provider client, Redis cache.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let catalog = SchemeCatalog::load_or_empty(&config.catalog_path);

        let generator: Option<Arc<dyn TextGenerator>> = match &config.provider {
            Some(provider) => {
                info!(
                    provider = %provider.name,
                    model = %provider.model,
                    base_url = %provider.base_url,
                    timeout_ms = provider.timeout.as_millis(),
                    max_retries = provider.max_retries,
                    "text generation provider configured"
                );
                Some(Arc::new(ChatCompletionGenerator::new(provider)?))
            }
            None => {
                info!("no provider key configured, replies use fallback templates");
                None
            }
        };

        let cache = ReplyCache::new(
            RedisCache::new(config.redis_url.as_deref()),
            config.reply_cache_ttl_secs,
        );
        if config.redis_url.is_some() {
            match cache.ping().await {
                Ok(()) => info!("redis connected"),
                Err(e) => info!(error = %e, "redis unavailable, running without reply cache"),
            }
        }

        Ok(Self::new(
            catalog,
            config.search,
            generator,
            cache,
            config.language,
            config.provider_name(),
        ))
    }

    pub fn catalog(&self) -> &SchemeCatalog {
        self.search.catalog()
    }

    pub fn language(&self) -> Language {
        self.composer.language()
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn provider_available(&self) -> bool {
        self.composer.is_provider_configured()
    }

    pub fn model(&self) -> Option<&str> {
        self.composer.generator().map(|g| g.model())
    }
}
