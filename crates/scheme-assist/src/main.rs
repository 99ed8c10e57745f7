use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scheme_assist::config::Config;
use scheme_assist::mcp::SchemeToolServer;
use scheme_assist::{AppContext, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting scheme-assist");

    let config = Config::from_env()?;
    info!(
        catalog = %config.catalog_path.display(),
        language = %config.language,
        max_results = config.search.max_results,
        min_query_len = config.search.min_query_len,
        "config loaded"
    );

    let ctx = Arc::new(AppContext::from_config(&config).await?);
    info!(
        categories = ctx.catalog().category_count(),
        total_schemes = ctx.catalog().total_schemes(),
        provider_available = ctx.provider_available(),
        "catalog ready"
    );

    if config.mcp_stdio {
        info!("MCP server ready, serving on stdio");
        let service = SchemeToolServer::new(ctx)
            .serve(stdio())
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, "MCP server error");
            })?;
        service.waiting().await?;
        info!("MCP server shut down");
        return Ok(());
    }

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "HTTP server listening");
    axum::serve(listener, create_router(ctx))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    info!("HTTP server shut down");
    Ok(())
}
