//! Quote endpoint handler.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::{CorrelationId, Quote, RequestContext, correlation_id};
use crate::error::GatewayError;

/// `GET /quote` — Current bid from the upstream provider.
///
/// # Errors
///
/// Returns [`GatewayError`] when the provider fails or exceeds its budget.
#[utoipa::path(
    get,
    path = "/quote",
    tag = "Quotes",
    summary = "Get the current bid",
    description = "Fetches the current bid from the upstream provider. The quote is recorded asynchronously; storage problems never affect this response.",
    params(
        ("x-correlation-id" = Option<String>, Header, description = "UUID linking this call to client-side logs"),
    ),
    responses(
        (status = 200, description = "Quote fetched", body = Quote),
        (status = 500, description = "Upstream provider failed or timed out", body = String, content_type = "text/plain"),
    )
)]
pub async fn get_quote(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, GatewayError> {
    let ctx = RequestContext::with_budget(state.quote_service.budgets().request)
        .with_correlation_id(correlation_from(&headers));

    let quote = state.quote_service.handle(&ctx).await?;
    Ok(Json(quote))
}

/// Adopts the caller's correlation identifier, or mints one when the
/// header is missing or not a UUID.
fn correlation_from(headers: &HeaderMap) -> CorrelationId {
    headers
        .get(correlation_id::HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

/// Quote routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/quote", get(get_quote))
}
