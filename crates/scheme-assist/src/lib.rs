pub mod api;
pub mod cache;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod enhance;
pub mod error;
pub mod mcp;
pub mod messages;
pub mod model;
pub mod provider;
pub mod scoring;
pub mod search;
pub mod state;

pub use api::create_router;
pub use state::AppContext;
