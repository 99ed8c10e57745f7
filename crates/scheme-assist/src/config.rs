use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use scheme_common::openai::OpenAiClientConfig;

use crate::error::AppError;
use crate::messages::Language;

const PLACEHOLDER_API_KEY: &str = "your-groq-api-key-here";

/// Application configuration loaded explicitly from environment variables.
///
/// Nothing here is required: the catalog path and bind address have defaults, and an
/// absent provider key simply disables remote phrasing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the curated schemes JSON document.
    pub catalog_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub search: SearchLimits,
    pub language: Language,
    /// `None` when no usable API key is configured.
    pub provider: Option<ProviderConfig>,
    /// Redis connection URL. `None` disables the reply cache.
    pub redis_url: Option<String>,
    pub reply_cache_ttl_secs: u64,
    /// Serve MCP tools over stdio instead of HTTP.
    pub mcp_stdio: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_results: usize,
    pub min_query_len: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_results: 10,
            min_query_len: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Short provider name used in health routes, e.g. "groq".
    pub name: String,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl ProviderConfig {
    pub fn client_config(&self) -> OpenAiClientConfig {
        OpenAiClientConfig::new(&self.base_url, Some(self.api_key.clone()))
            .with_timeout(self.timeout)
            .with_max_retries(self.max_retries)
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Optional:
    /// - `SCHEMES_DB_PATH` (default: "schemes_database.json")
    /// - `SCHEME_BIND_ADDR` (default: "0.0.0.0:8000")
    /// - `SEARCH_MAX_RESULTS` (default: 10), `SEARCH_MIN_QUERY_LEN` (default: 2)
    /// - `RESPONSE_LANGUAGE`: "hi" (default) or "en"
    /// - `GROQ_API_KEY`, `GROQ_MODEL`, `GROQ_TEMPERATURE`, `GROQ_MAX_TOKENS`
    /// - `LLM_BASE_URL`, `LLM_TIMEOUT_SECS`, `LLM_MAX_RETRIES`
    /// - `REDIS_URL`, `REPLY_CACHE_TTL_SECS`
    /// - `SCHEME_MCP_STDIO`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let catalog_path = var("SCHEMES_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("schemes_database.json"));

        let bind_addr = parse_or(var("SCHEME_BIND_ADDR"), "SCHEME_BIND_ADDR", || {
            SocketAddr::from(([0, 0, 0, 0], 8000))
        })?;

        let defaults = SearchLimits::default();
        let search = SearchLimits {
            max_results: parse_or(var("SEARCH_MAX_RESULTS"), "SEARCH_MAX_RESULTS", || {
                defaults.max_results
            })?,
            min_query_len: parse_or(var("SEARCH_MIN_QUERY_LEN"), "SEARCH_MIN_QUERY_LEN", || {
                defaults.min_query_len
            })?,
        };
        if search.max_results == 0 {
            return Err(AppError::Config(
                "SEARCH_MAX_RESULTS must be greater than zero".to_string(),
            ));
        }

        let language = parse_or(var("RESPONSE_LANGUAGE"), "RESPONSE_LANGUAGE", || {
            Language::Hindi
        })?;

        let provider = match var("GROQ_API_KEY").filter(|k| k != PLACEHOLDER_API_KEY) {
            Some(api_key) => Some(ProviderConfig {
                name: "groq".to_string(),
                base_url: var("LLM_BASE_URL")
                    .unwrap_or_else(|| "https://api.groq.com/openai/v1".to_string()),
                api_key,
                model: var("GROQ_MODEL").unwrap_or_else(|| "llama-3.3-70b-versatile".to_string()),
                temperature: parse_or(var("GROQ_TEMPERATURE"), "GROQ_TEMPERATURE", || 0.3)?,
                max_tokens: parse_or(var("GROQ_MAX_TOKENS"), "GROQ_MAX_TOKENS", || 300)?,
                timeout: Duration::from_secs(parse_or(
                    var("LLM_TIMEOUT_SECS"),
                    "LLM_TIMEOUT_SECS",
                    || 30,
                )?),
                max_retries: parse_or(var("LLM_MAX_RETRIES"), "LLM_MAX_RETRIES", || 0)?,
            }),
            None => None,
        };

        Ok(Self {
            catalog_path,
            bind_addr,
            search,
            language,
            provider,
            redis_url: var("REDIS_URL"),
            reply_cache_ttl_secs: parse_or(
                var("REPLY_CACHE_TTL_SECS"),
                "REPLY_CACHE_TTL_SECS",
                || 3600,
            )?,
            mcp_stdio: var("SCHEME_MCP_STDIO")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    /// Provider name reported when no provider is configured.
    pub fn provider_name(&self) -> &str {
        self.provider.as_ref().map(|p| p.name.as_str()).unwrap_or("groq")
    }
}

fn parse_or<T, D>(raw: Option<String>, key: &str, default: D) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    D: FnOnce() -> T,
{
    match raw {
        Some(value) => value
            .parse::<T>()
            .map_err(|e| AppError::Config(format!("invalid {key} value '{value}': {e}"))),
        None => Ok(default()),
    }
}
