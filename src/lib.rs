//! # quote-gateway
//!
//! HTTP gateway that relays a foreign-exchange bid from an upstream provider
//! and records every observed quote in SQLite, plus the client that pulls the
//! quote and writes it to a local file.
//!
//! Every hop carries its own time budget. Persisting a quote happens in a
//! detached task with a freshly rooted deadline, so a slow or broken store
//! can never delay or fail the response the caller sees.
//!
//! ## Architecture
//!
//! ```text
//! quote-client (client/)
//!     │  GET /quote            ≤ client budget (300 ms)
//!     ▼
//! REST Handlers (api/)         ≤ request budget (250 ms)
//!     │
//!     ├── QuoteService (service/)
//!     │     ├── UpstreamClient ≤ min(remaining, provider budget = 200 ms)
//!     │     └── spawn ──► SqliteQuoteStore (persistence/)
//!     │                      ≤ store budget (10 ms), fresh deadline
//!     ▼
//! {"bid": "..."}
//! ```

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
mod fetch;
pub mod persistence;
pub mod service;
pub mod telemetry;
