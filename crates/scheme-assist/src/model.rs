use serde::{Deserialize, Serialize};

/// One curated welfare scheme, validated at catalog load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeRecord {
    pub title: String,
    pub description: String,
    pub link: String,
    pub keywords: Vec<String>,
}

/// A named group of schemes, in catalog file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub schemes: Vec<SchemeRecord>,
}

/// Structured reading of a free-text query, produced per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedQuery {
    #[serde(default)]
    pub search_keywords: Vec<String>,
    #[serde(default)]
    pub hindi_keywords: Vec<String>,
    #[serde(default)]
    pub category: QueryCategory,
    #[serde(default)]
    pub intent: QueryIntent,
    #[serde(default)]
    pub target_websites: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryCategory {
    Housing,
    Employment,
    Education,
    Health,
    Agriculture,
    Pension,
    Women,
    #[default]
    #[serde(other)]
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    ApplicationProcess,
    Eligibility,
    Benefits,
    #[default]
    #[serde(other)]
    SchemeInfo,
}
