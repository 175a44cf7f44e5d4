//! Service layer: the `/quote` orchestration.
//!
//! [`QuoteService`] drives the [`UpstreamClient`] under a cascaded
//! deadline and hands every observed quote to a detached writer.

pub mod quote_service;
pub mod upstream;

pub use quote_service::{PersistOutcome, QuoteService};
pub use upstream::UpstreamClient;
