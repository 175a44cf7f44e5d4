//! quote-client entry point.
//!
//! Pulls one quote from the gateway and writes it to a local file. Any
//! failure aborts the run with a non-zero exit and nothing written.

use anyhow::Context;

use quote_gateway::client::{self, FileSink, QuoteRequester};
use quote_gateway::config::ClientConfig;
use quote_gateway::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();
    telemetry::init(config.log_format);

    let http = reqwest::Client::builder()
        .build()
        .context("failed to build HTTP client")?;
    let requester = QuoteRequester::new(http, config.quote_url.as_str(), config.budget);
    let sink = FileSink::new(config.output_path, config.label);

    let quote = client::run_once(&requester, &sink)
        .await
        .with_context(|| format!("quote run against {} failed", config.quote_url))?;

    tracing::info!(bid = %quote.bid, path = %sink.path().display(), "quote saved");
    Ok(())
}
