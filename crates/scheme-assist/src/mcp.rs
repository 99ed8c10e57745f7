/// MCP server exposing the scheme catalog as tools.
///
/// Exposes three tools:
/// - `search_schemes`: ranked keyword search
/// - `ask_scheme`: composed answer for the best match
/// - `list_categories`: category names with scheme counts
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::messages::ErrorReason;
use crate::state::AppContext;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchSchemesParams {
    /// Free-text question in Hindi or English, e.g. "घर बनाने की योजना".
    pub query: String,
    /// Maximum number of results to return (default: configured limit).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AskSchemeParams {
    /// Free-text question in Hindi or English.
    pub query: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SchemeHit {
    pub title: String,
    pub category: String,
    pub description: String,
    pub link: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SearchSchemesResponse {
    pub results: Vec<SchemeHit>,
    pub total_found: usize,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct AskSchemeResponse {
    pub reply: String,
    pub scheme_name: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CategorySummary {
    pub name: String,
    pub scheme_count: usize,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategorySummary>,
    pub total_schemes: usize,
}

#[derive(Clone)]
pub struct SchemeToolServer {
    ctx: Arc<AppContext>,
    tool_router: ToolRouter<SchemeToolServer>,
}

impl SchemeToolServer {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl SchemeToolServer {
    #[tool(description = "Search Indian government welfare schemes by keyword. Returns schemes ranked by relevance.")]
    async fn search_schemes(
        &self,
        Parameters(params): Parameters<SearchSchemesParams>,
    ) -> Result<Json<SearchSchemesResponse>, String> {
        let outcome = self.ctx.search.search(&params.query);
        if outcome.rejected {
            return Ok(Json(SearchSchemesResponse {
                results: Vec::new(),
                total_found: 0,
            }));
        }

        let limit = params
            .limit
            .map(|l| l as usize)
            .unwrap_or(usize::MAX);
        let results = outcome
            .matches
            .iter()
            .take(limit)
            .map(|m| SchemeHit {
                title: m.scheme.title.clone(),
                category: m.category.to_string(),
                description: m.scheme.description.clone(),
                link: m.scheme.link.clone(),
                score: m.score,
            })
            .collect();

        Ok(Json(SearchSchemesResponse {
            results,
            total_found: outcome.total_found,
        }))
    }

    #[tool(description = "Answer a citizen's question with the most relevant government scheme, in simple language, including the official link.")]
    async fn ask_scheme(
        &self,
        Parameters(params): Parameters<AskSchemeParams>,
    ) -> Result<Json<AskSchemeResponse>, String> {
        let composer = &self.ctx.composer;
        let outcome = self.ctx.search.search(&params.query);
        if outcome.rejected {
            return Err(composer.compose_error(&params.query, ErrorReason::InvalidQuery));
        }
        let top = outcome
            .top()
            .map(|m| m.scheme)
            .ok_or_else(|| composer.compose_error(&params.query, ErrorReason::NoResults))?;

        info!(query = %params.query, scheme = %top.title, "ask_scheme tool invoked");
        let reply = composer.compose(Some(top), &params.query).await;
        Ok(Json(AskSchemeResponse {
            reply,
            scheme_name: top.title.clone(),
            link: top.link.clone(),
        }))
    }

    #[tool(description = "List the scheme categories in the catalog with the number of schemes in each.")]
    async fn list_categories(&self) -> Result<Json<CategoryListResponse>, String> {
        let catalog = self.ctx.catalog();
        let categories = catalog
            .categories()
            .iter()
            .map(|c| CategorySummary {
                name: c.name.clone(),
                scheme_count: c.schemes.len(),
            })
            .collect();

        Ok(Json(CategoryListResponse {
            categories,
            total_schemes: catalog.total_schemes(),
        }))
    }
}

#[tool_handler]
impl ServerHandler for SchemeToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "scheme-assist".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Indian government welfare scheme assistant. Use search_schemes to find \
                 schemes for a need, ask_scheme for a ready-to-read answer with the official \
                 link, and list_categories to browse the catalog."
                    .to_string(),
            ),
        }
    }
}
