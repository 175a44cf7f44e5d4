//! Database models for recorded quotes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored row from the `quotes` table.
///
/// Rows are append-only: one per successful write, never updated or
/// deleted by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Auto-increment row ID.
    pub id: i64,
    /// Bid exactly as received from the provider.
    pub bid: String,
    /// Write timestamp assigned by the database.
    pub observed_at: DateTime<Utc>,
}
