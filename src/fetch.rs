//! Bounded JSON GET shared by the upstream client and the quote client.

use serde::de::DeserializeOwned;

use crate::domain::RequestContext;
use crate::error::FetchError;

/// Sends `request` and decodes a JSON body, all within `ctx`'s deadline.
///
/// The deadline bounds connect, headers and body alike: reqwest gets the
/// remaining time as its own timeout, and the whole exchange is wrapped in
/// `timeout_at` on the same deadline.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    request: reqwest::RequestBuilder,
    ctx: &RequestContext,
) -> Result<T, FetchError> {
    let budget = ctx.remaining();
    if budget.is_zero() {
        return Err(FetchError::BudgetExhausted);
    }

    let request = request
        .timeout(budget)
        .build()
        .map_err(FetchError::RequestBuild)?;

    let exchange = async {
        let response = http
            .execute(request)
            .await
            .map_err(|e| FetchError::from_reqwest(e, budget))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("unexpected status {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(e, budget))?;

        serde_json::from_slice::<T>(&body).map_err(|e| FetchError::Decode(e.to_string()))
    };

    tokio::time::timeout_at(ctx.deadline(), exchange)
        .await
        .map_err(|_| FetchError::DeadlineExceeded(budget))?
}
