//! Per-call deadline scope.
//!
//! A [`RequestContext`] carries an absolute deadline and an optional
//! [`CorrelationId`]. It holds no business data. Two ways to derive a new
//! scope exist, and they are not interchangeable:
//!
//! - [`RequestContext::child`] caps a downstream call: the new deadline is
//!   `min(parent deadline, now + ceiling)`, so a hop never gets more time
//!   than its caller had.
//! - [`RequestContext::detached`] roots a fresh deadline at `now + budget`
//!   and ignores the parent's deadline entirely. Used for work that
//!   outlives the request, where an already-expired parent must not cancel
//!   it before it starts.

use std::time::Duration;

use tokio::time::Instant;

use super::CorrelationId;

/// Deadline and correlation scope for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    deadline: Instant,
    correlation_id: Option<CorrelationId>,
}

impl RequestContext {
    /// Creates a root context whose deadline is `now + budget`.
    #[must_use]
    pub fn with_budget(budget: Duration) -> Self {
        Self {
            deadline: Instant::now() + budget,
            correlation_id: None,
        }
    }

    /// Attaches a correlation identifier.
    #[must_use]
    pub const fn with_correlation_id(mut self, id: CorrelationId) -> Self {
        self.correlation_id = Some(id);
        self
    }

    /// Absolute deadline of this scope.
    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Correlation identifier, if one was attached.
    #[must_use]
    pub const fn correlation_id(&self) -> Option<CorrelationId> {
        self.correlation_id
    }

    /// Time left before the deadline, zero once it has passed.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Whether the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Derives a downstream scope capped by both this scope's deadline and
    /// `ceiling` from now.
    #[must_use]
    pub fn child(&self, ceiling: Duration) -> Self {
        Self {
            deadline: self.deadline.min(Instant::now() + ceiling),
            correlation_id: self.correlation_id,
        }
    }

    /// Roots an independent scope at `now + budget`. Only the correlation
    /// identifier is inherited.
    #[must_use]
    pub fn detached(&self, budget: Duration) -> Self {
        Self {
            deadline: Instant::now() + budget,
            correlation_id: self.correlation_id,
        }
    }
}
