//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::QuoteService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Quote service owning the upstream client and the store handle.
    pub quote_service: Arc<QuoteService>,
}

impl AppState {
    /// Wraps a service into shared state.
    #[must_use]
    pub fn new(quote_service: QuoteService) -> Self {
        Self {
            quote_service: Arc::new(quote_service),
        }
    }
}
