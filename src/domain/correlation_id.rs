//! Correlation identifier for cross-component log correlation.
//!
//! [`CorrelationId`] is a newtype around [`uuid::Uuid`] (v4). The client
//! mints one per run and sends it in the [`HEADER`] request header; the
//! gateway adopts it (or mints its own) and logs it on every line for the
//! request, the detached write included.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// HTTP header carrying the correlation identifier.
pub const HEADER: &str = "x-correlation-id";

/// Opaque token linking log lines of one client invocation across hops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(uuid::Uuid);

impl CorrelationId {
    /// Creates a new random `CorrelationId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CorrelationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s.trim()).map(Self)
    }
}

impl From<uuid::Uuid> for CorrelationId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(CorrelationId::new(), CorrelationId::new());
    }

    #[test]
    fn parses_header_value_with_whitespace() {
        let id = CorrelationId::new();
        let Ok(parsed) = format!(" {id} ").parse::<CorrelationId>() else {
            panic!("valid uuid should parse");
        };
        assert_eq!(parsed, id);
    }

    #[test]
    fn rejects_garbage() {
        assert!("not-a-uuid".parse::<CorrelationId>().is_err());
    }

    #[test]
    fn serializes_as_bare_string() {
        let uuid = uuid::Uuid::new_v4();
        let id = CorrelationId::from(uuid);
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, format!("\"{uuid}\""));
        assert_eq!(*id.as_uuid(), uuid);
    }
}
