//! quote-gateway server entry point.
//!
//! Connects the quote store, then serves `/quote` and `/health` over HTTP.

use quote_gateway::api;
use quote_gateway::app_state::AppState;
use quote_gateway::config::GatewayConfig;
use quote_gateway::persistence::SqliteQuoteStore;
use quote_gateway::service::{QuoteService, UpstreamClient};
use quote_gateway::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = GatewayConfig::from_env()?;
    telemetry::init(config.log_format);
    tracing::info!(
        addr = %config.listen_addr,
        provider = %config.provider_url,
        budgets = ?config.budgets,
        "starting quote-gateway"
    );

    // Build persistence layer; schema bootstrap happens once, here
    let store = SqliteQuoteStore::connect(
        &config.database_url,
        config.database_max_connections,
        config.store_busy_timeout(),
    )
    .await?;
    store.bootstrap().await?;

    // Build service layer
    let http = reqwest::Client::builder().build()?;
    let upstream = UpstreamClient::new(http, config.provider_url, config.currency_pair);
    let quote_service = QuoteService::new(upstream, store, config.budgets);

    // Build router
    let app = api::build_app(AppState::new(quote_service));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
