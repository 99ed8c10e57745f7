use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use super::errors::ApiError;
use super::models::*;
use crate::compose::ProviderStatus;
use crate::messages::ErrorReason;
use crate::model::SchemeRecord;
use crate::search::SearchOutcome;
use crate::state::AppContext;

pub async fn root(State(ctx): State<Arc<AppContext>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Scheme assist API is running!",
        status: "healthy",
        provider_available: ctx.provider_available(),
        search_type: "curated_database",
        llm_enhanced: ctx.provider_available(),
        total_schemes: ctx.catalog().total_schemes(),
    })
}

/// Always 200; the body says whether remote phrasing works.
pub async fn provider_health(
    State(ctx): State<Arc<AppContext>>,
    Path(provider): Path<String>,
) -> Json<ProviderHealthResponse> {
    if !provider.eq_ignore_ascii_case(ctx.provider_name()) {
        return Json(ProviderHealthResponse {
            message: format!(
                "unknown provider '{provider}', expected '{}'",
                ctx.provider_name()
            ),
            provider,
            client_initialized: false,
            api_connection: false,
            model: None,
            status: ProviderHealth::UnknownProvider,
            fallback_available: true,
        });
    }

    let status = ctx.composer.check_provider().await;
    let api_connection = status == ProviderStatus::Reachable;
    let message = match &status {
        ProviderStatus::Reachable => format!("{provider} integration working properly"),
        ProviderStatus::NotConfigured => "provider not configured, using fallback responses".to_string(),
        ProviderStatus::Unreachable(_) => "provider unreachable, using fallback responses".to_string(),
    };

    Json(ProviderHealthResponse {
        provider,
        client_initialized: ctx.provider_available(),
        api_connection,
        model: ctx.model().map(str::to_string),
        status: if api_connection {
            ProviderHealth::Healthy
        } else {
            ProviderHealth::Degraded
        },
        fallback_available: true,
        message,
    })
}

pub async fn search(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(req) = payload?;
    info!(query = %req.query, "search request received");
    let outcome = ctx.search.search(&req.query);
    Ok(Json(SearchResponse {
        results: outcome
            .matches
            .iter()
            .map(|m| SchemeResult::from(m.scheme))
            .collect(),
        total_found: outcome.total_found,
        search_query: outcome.query,
    }))
}

pub async fn query(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(req) = payload?;
    info!(query = %req.query, "query request received");
    let outcome = answerable(&ctx, &req.query)?;
    let top = outcome
        .top()
        .map(|m| m.scheme)
        .ok_or_else(|| not_found(&ctx, &req.query))?;

    let reply = ctx.composer.compose(Some(top), &req.query).await;
    Ok(Json(QueryResponse {
        reply,
        link: top.link.clone(),
        scheme_name: top.title.clone(),
    }))
}

pub async fn answer(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let Json(req) = payload?;
    info!(query = %req.query, "answer request received");
    let outcome = answerable(&ctx, &req.query)?;
    let top: Vec<&SchemeRecord> = outcome.matches.iter().take(3).map(|m| m.scheme).collect();
    if top.is_empty() {
        return Err(not_found(&ctx, &req.query));
    }

    let reply = ctx.composer.compose_many(&top, &req.query).await;
    Ok(Json(AnswerResponse {
        reply,
        schemes: top.into_iter().map(SchemeResult::from).collect(),
        total_found: outcome.total_found,
    }))
}

pub async fn list_schemes(State(ctx): State<Arc<AppContext>>) -> Json<SchemeListResponse> {
    let catalog = ctx.catalog();
    Json(SchemeListResponse {
        message: "Available government scheme categories",
        categories: catalog.category_names().into_iter().map(str::to_string).collect(),
        total_schemes: catalog.total_schemes(),
        note: "Use the /search or /query endpoint to find specific schemes",
    })
}

pub async fn debug_search(
    State(ctx): State<Arc<AppContext>>,
    Path(query): Path<String>,
) -> Json<DebugResponse> {
    info!(query = %query, "debug search");
    let outcome = ctx.search.search(&query);
    let enhanced_query = ctx.enhancer.enhance(&query).await;
    let catalog = ctx.catalog();

    Json(DebugResponse {
        provider_available: ctx.provider_available(),
        rejected: outcome.rejected,
        total_found: outcome.total_found,
        search_results: outcome
            .matches
            .iter()
            .map(|m| DebugMatch {
                title: m.scheme.title.clone(),
                category: m.category.to_string(),
                score: m.score,
                link: m.scheme.link.clone(),
            })
            .collect(),
        enhanced_query,
        database_info: DatabaseInfo {
            total_categories: catalog.category_count(),
            categories: catalog.category_names().into_iter().map(str::to_string).collect(),
            total_schemes: catalog.total_schemes(),
            metadata: catalog.metadata().clone(),
        },
        query,
    })
}

fn answerable<'a>(ctx: &'a AppContext, query: &str) -> Result<SearchOutcome<'a>, ApiError> {
    let outcome = ctx.search.search(query);
    if outcome.rejected {
        return Err(ApiError::BadRequest(
            ctx.composer.compose_error(query, ErrorReason::InvalidQuery),
        ));
    }
    Ok(outcome)
}

fn not_found(ctx: &AppContext, query: &str) -> ApiError {
    ApiError::NotFound(ctx.composer.compose_error(query, ErrorReason::NoResults))
}
