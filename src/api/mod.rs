//! REST API layer: route handlers, OpenAPI document, and router
//! composition.

pub mod handlers;
pub mod openapi;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::Budgets;

/// Slack on top of the request budget before the outer timeout fires.
/// The handler enforces the budget itself; this layer only catches
/// requests stuck outside it.
const TIMEOUT_GRACE: Duration = Duration::from_millis(50);

/// Outer request timeout: the request budget plus a short grace.
/// Answers `500`, the same status a failed upstream call gets.
#[must_use]
pub fn outer_timeout(budgets: &Budgets) -> TimeoutLayer {
    TimeoutLayer::with_status_code(
        StatusCode::INTERNAL_SERVER_ERROR,
        budgets.request + TIMEOUT_GRACE,
    )
}

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    handlers::routes()
}

/// Builds the application: routes, tracing, the outer request timeout and
/// (with the `swagger-ui` feature) the API docs, bound to `state`.
pub fn build_app(state: AppState) -> Router {
    let timeout = outer_timeout(state.quote_service.budgets());

    let app = Router::new()
        .merge(build_router())
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    app
}
