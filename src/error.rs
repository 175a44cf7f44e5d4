//! Error types for every hop, with HTTP status mapping for the gateway.
//!
//! - [`FetchError`]: one bounded HTTP GET and its decode, used both for the
//!   gateway→provider hop and the client→gateway hop.
//! - [`StoreError`]: the detached write. Never surfaced to a caller.
//! - [`ClientError`]: anything that aborts a `quote-client` run.
//! - [`GatewayError`]: what a `/quote` handler can return; maps to a
//!   generic plain-text 500.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure of one bounded HTTP fetch.
///
/// All variants are terminal for the call; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be constructed (e.g. malformed URL).
    #[error("failed to build request: {0}")]
    RequestBuild(#[source] reqwest::Error),

    /// Network failure or a non-success status from the remote side.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The call did not complete within its deadline.
    #[error("deadline exceeded after {}ms", .0.as_millis())]
    DeadlineExceeded(Duration),

    /// The caller's deadline had already passed; no request was sent.
    #[error("deadline already passed before the call")]
    BudgetExhausted,

    /// The response body did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Returns `true` for transport-class failures, timeouts included.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::DeadlineExceeded(_) | Self::BudgetExhausted
        )
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, budget: Duration) -> Self {
        if err.is_timeout() {
            Self::DeadlineExceeded(budget)
        } else if err.is_builder() {
            Self::RequestBuild(err)
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Failure of a quote write.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The write did not finish within its budget, or the budget had
    /// already run out before the write started.
    #[error("write deadline exceeded")]
    DeadlineExceeded,

    /// The database rejected or failed the statement.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Failure of a `quote-client` run.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Fetching the quote from the gateway failed.
    #[error("failed to fetch quote from gateway: {0}")]
    Fetch(#[from] FetchError),

    /// Writing the quote to the result sink failed.
    #[error("failed to write quote: {0}")]
    Sink(#[from] std::io::Error),
}

/// Error returned by `/quote` handlers.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The upstream provider could not supply a quote in time.
    #[error("upstream error: {0}")]
    Upstream(#[from] FetchError),
}

impl GatewayError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the plain-text body sent to the caller. Carries no upstream
    /// detail; the full error goes to the log instead.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::Upstream(_) => "failed to obtain quote",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), self.public_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_errors_map_to_500() {
        let err = GatewayError::from(FetchError::DeadlineExceeded(Duration::from_millis(200)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "failed to obtain quote");
    }

    #[test]
    fn response_hides_upstream_detail() {
        let err = GatewayError::from(FetchError::Decode("missing field `bid`".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn timeouts_are_transport_class() {
        assert!(FetchError::DeadlineExceeded(Duration::from_millis(1)).is_transport());
        assert!(FetchError::BudgetExhausted.is_transport());
        assert!(FetchError::Transport("connection refused".to_string()).is_transport());
        assert!(!FetchError::Decode("eof".to_string()).is_transport());
    }

    #[test]
    fn deadline_message_reports_millis() {
        let err = FetchError::DeadlineExceeded(Duration::from_millis(200));
        assert_eq!(err.to_string(), "deadline exceeded after 200ms");
    }

    #[test]
    fn spent_budget_is_not_reported_as_zero_millis() {
        let err = FetchError::BudgetExhausted;
        assert_eq!(err.to_string(), "deadline already passed before the call");
    }
}
