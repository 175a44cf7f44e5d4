//! Domain layer: the quote value, deadline scopes, and correlation ids.
//!
//! These types carry no I/O. The service, persistence and client layers
//! pass them between hops.

pub mod correlation_id;
pub mod quote;
pub mod request_context;

pub use correlation_id::CorrelationId;
pub use quote::Quote;
pub use request_context::RequestContext;
