//! Client side of `/quote`.

use std::time::Duration;

use crate::domain::{CorrelationId, Quote, RequestContext, correlation_id};
use crate::error::FetchError;
use crate::fetch;

/// Pulls one quote from the gateway under a fixed client budget.
#[derive(Debug, Clone)]
pub struct QuoteRequester {
    http: reqwest::Client,
    quote_url: String,
    budget: Duration,
}

impl QuoteRequester {
    /// Creates a requester for the gateway's `/quote` endpoint at
    /// `quote_url`.
    #[must_use]
    pub fn new(http: reqwest::Client, quote_url: impl Into<String>, budget: Duration) -> Self {
        Self {
            http,
            quote_url: quote_url.into(),
            budget,
        }
    }

    /// Issues one `GET` to the gateway and decodes `{"bid": "..."}`.
    ///
    /// A fresh correlation identifier is minted per call and sent in the
    /// `x-correlation-id` header.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the request cannot be built, the call
    /// fails or times out, the gateway answers with an error status, or
    /// the body is not a quote.
    pub async fn run(&self) -> Result<Quote, FetchError> {
        let id = CorrelationId::new();
        let ctx = RequestContext::with_budget(self.budget).with_correlation_id(id);

        let request = self
            .http
            .get(&self.quote_url)
            .header(correlation_id::HEADER, id.to_string());

        let quote: Quote = fetch::get_json(&self.http, request, &ctx).await?;
        tracing::info!(correlation_id = %id, bid = %quote.bid, "quote fetched");
        Ok(quote)
    }
}
