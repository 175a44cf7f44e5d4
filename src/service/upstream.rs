//! Upstream quote provider client.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::{Quote, RequestContext};
use crate::error::FetchError;
use crate::fetch;

/// One entry of the provider payload. Every field other than `bid` is
/// ignored.
#[derive(Debug, Deserialize)]
struct ProviderRate {
    bid: String,
}

/// Client for the upstream provider.
///
/// The provider answers `GET <url>` with an envelope keyed by currency
/// pair, e.g. `{"USDBRL": {"bid": "5.25", "ask": "5.26", ...}}`. Only the
/// configured pair's `bid` is extracted.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
    pair: String,
}

impl UpstreamClient {
    /// Creates a client for `url`, extracting the bid of `pair`.
    #[must_use]
    pub fn new(http: reqwest::Client, url: impl Into<String>, pair: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            pair: pair.into(),
        }
    }

    /// Fetches the current quote within `ctx`'s deadline.
    ///
    /// The caller is expected to have capped `ctx` already (see
    /// [`RequestContext::child`]); this method uses whatever time is left.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::RequestBuild`] for an unusable URL,
    /// [`FetchError::Transport`] / [`FetchError::DeadlineExceeded`] for
    /// network failures, error statuses and timeouts,
    /// [`FetchError::BudgetExhausted`] if `ctx` had no time left, and
    /// [`FetchError::Decode`] if the payload lacks the pair or its `bid`.
    pub async fn fetch(&self, ctx: &RequestContext) -> Result<Quote, FetchError> {
        let request = self.http.get(&self.url);
        let mut envelope: HashMap<String, serde_json::Value> =
            fetch::get_json(&self.http, request, ctx).await?;

        let entry = envelope
            .remove(&self.pair)
            .ok_or_else(|| FetchError::Decode(format!("pair {} missing from payload", self.pair)))?;
        let rate: ProviderRate =
            serde_json::from_value(entry).map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(Quote::new(rate.bid))
    }
}
