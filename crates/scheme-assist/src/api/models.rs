use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{EnhancedQuery, SchemeRecord};

#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeResult {
    pub title: String,
    pub description: String,
    pub link: String,
}

impl From<&SchemeRecord> for SchemeResult {
    fn from(record: &SchemeRecord) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            link: record.link.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub provider_available: bool,
    pub search_type: &'static str,
    pub llm_enhanced: bool,
    pub total_schemes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderHealth {
    Healthy,
    Degraded,
    UnknownProvider,
}

#[derive(Debug, Serialize)]
pub struct ProviderHealthResponse {
    pub provider: String,
    pub client_initialized: bool,
    pub api_connection: bool,
    pub model: Option<String>,
    pub status: ProviderHealth,
    pub fallback_available: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SchemeResult>,
    pub total_found: usize,
    pub search_query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub reply: String,
    pub link: String,
    pub scheme_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub reply: String,
    pub schemes: Vec<SchemeResult>,
    pub total_found: usize,
}

#[derive(Debug, Serialize)]
pub struct SchemeListResponse {
    pub message: &'static str,
    pub categories: Vec<String>,
    pub total_schemes: usize,
    pub note: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DebugMatch {
    pub title: String,
    pub category: String,
    pub score: f64,
    pub link: String,
}

#[derive(Debug, Serialize)]
pub struct DatabaseInfo {
    pub total_categories: usize,
    pub categories: Vec<String>,
    pub total_schemes: usize,
    pub metadata: Value,
}

#[derive(Debug, Serialize)]
pub struct DebugResponse {
    pub query: String,
    pub provider_available: bool,
    pub rejected: bool,
    pub total_found: usize,
    pub search_results: Vec<DebugMatch>,
    pub enhanced_query: EnhancedQuery,
    pub database_info: DatabaseInfo,
}
