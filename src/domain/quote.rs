//! The quote value passed between hops.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A bid observed from the upstream provider.
///
/// The bid is kept as the provider formatted it and never parsed into a
/// number, so no precision or locale conversion happens on the way
/// through. Also the exact body of a successful `/quote` response:
/// `{"bid": "5.25"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Quote {
    /// Decimal-formatted bid, e.g. `"5.2531"`.
    pub bid: String,
}

impl Quote {
    /// Creates a quote from a bid string.
    #[must_use]
    pub fn new(bid: impl Into<String>) -> Self {
        Self { bid: bid.into() }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bid)
    }
}
