//! OpenAPI document for the gateway.

use utoipa::OpenApi;

use super::handlers;
use crate::domain::Quote;

/// Generated OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "quote-gateway", description = "FX quote relay with detached persistence"),
    paths(handlers::quote::get_quote, handlers::system::health_handler),
    components(schemas(Quote, handlers::system::HealthResponse)),
    tags(
        (name = "Quotes", description = "Current bid from the upstream provider"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/quote"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
