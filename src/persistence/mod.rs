//! Persistence layer: append-only quote log in SQLite.
//!
//! The concrete implementation uses `sqlx::SqlitePool` for async access.
//! Writes are bounded by a caller-supplied deadline; see
//! [`sqlite::SqliteQuoteStore::append`].

pub mod models;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod test_support;

pub use models::QuoteRecord;
pub use sqlite::SqliteQuoteStore;
