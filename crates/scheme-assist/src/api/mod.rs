//! HTTP surface.
//!
//! | Method | Path                 | Purpose                                   |
//! |--------|----------------------|-------------------------------------------|
//! | GET    | `/`                  | liveness and catalog size                 |
//! | GET    | `/health/{provider}` | provider reachability, always 200         |
//! | POST   | `/search`            | ranked scheme list                        |
//! | POST   | `/query`             | one composed answer for the best match    |
//! | POST   | `/answer`            | one composed answer over the top three    |
//! | GET    | `/schemes`           | category names in catalog order           |
//! | GET    | `/debug/{query}`     | scores, categories and query enhancement  |

pub mod errors;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppContext;

pub fn create_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health/{provider}", get(handlers::provider_health))
        .route("/search", post(handlers::search))
        .route("/query", post(handlers::query))
        .route("/answer", post(handlers::answer))
        .route("/schemes", get(handlers::list_schemes))
        .route("/debug/{query}", get(handlers::debug_search))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
