//! Quote service: fetches upstream under a cascaded deadline and records
//! every observed quote in a detached write.

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::Instrument;

use super::UpstreamClient;
use crate::config::Budgets;
use crate::domain::{Quote, RequestContext};
use crate::error::{GatewayError, StoreError};
use crate::persistence::SqliteQuoteStore;

/// Final state of a detached write.
#[derive(Debug)]
pub enum PersistOutcome {
    /// The row was committed.
    Committed {
        /// ID of the new row.
        record_id: i64,
    },
    /// The write failed or ran out of time. Already logged.
    Failed(StoreError),
}

impl PersistOutcome {
    /// Whether the row was committed.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Orchestration layer for `/quote`.
///
/// Per request: `Received → FetchingUpstream → {Failed | Responded}`.
/// `Responded` forks a detached `Persisting → {Committed | PersistFailed}`
/// task that the response never waits on. The store handle is injected
/// and shared by every detached writer.
#[derive(Debug, Clone)]
pub struct QuoteService {
    upstream: UpstreamClient,
    store: SqliteQuoteStore,
    budgets: Budgets,
}

impl QuoteService {
    /// Creates a new `QuoteService`.
    #[must_use]
    pub fn new(upstream: UpstreamClient, store: SqliteQuoteStore, budgets: Budgets) -> Self {
        Self {
            upstream,
            store,
            budgets,
        }
    }

    /// Returns the configured budgets.
    #[must_use]
    pub const fn budgets(&self) -> &Budgets {
        &self.budgets
    }

    /// Returns a reference to the inner [`SqliteQuoteStore`].
    #[must_use]
    pub const fn store(&self) -> &SqliteQuoteStore {
        &self.store
    }

    /// Handles one inbound quote request.
    ///
    /// Returns as soon as the upstream quote is in hand. The write is
    /// detached and its outcome is only logged.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Upstream`] if the provider call fails or
    /// misses its deadline. Nothing is persisted in that case.
    pub async fn handle(&self, ctx: &RequestContext) -> Result<Quote, GatewayError> {
        let (quote, _detached) = self.fetch_and_detach(ctx).await?;
        Ok(quote)
    }

    /// Same as [`QuoteService::handle`], but also hands back the join
    /// handle of the detached write. Dropping the handle does not cancel
    /// the write.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Upstream`] if the provider call fails or
    /// misses its deadline.
    pub async fn fetch_and_detach(
        &self,
        ctx: &RequestContext,
    ) -> Result<(Quote, JoinHandle<PersistOutcome>), GatewayError> {
        let correlation_id = ctx.correlation_id().map(tracing::field::display);
        let call_ctx = ctx.child(self.budgets.provider);
        let started = Instant::now();

        let quote = match self.upstream.fetch(&call_ctx).await {
            Ok(quote) => quote,
            Err(err) => {
                tracing::warn!(
                    correlation_id,
                    error = %err,
                    elapsed_ms = elapsed_ms(started),
                    "upstream fetch failed"
                );
                return Err(err.into());
            }
        };

        tracing::info!(
            correlation_id,
            bid = %quote.bid,
            elapsed_ms = elapsed_ms(started),
            "quote received"
        );

        let detached = self.spawn_persist(ctx, quote.clone());
        Ok((quote, detached))
    }

    /// Spawns the write of `quote` with a deadline rooted now at the store
    /// budget. `ctx` contributes only its correlation identifier, so an
    /// expired request still gets the full write window.
    pub fn spawn_persist(&self, ctx: &RequestContext, quote: Quote) -> JoinHandle<PersistOutcome> {
        let write_ctx = ctx.detached(self.budgets.store);
        let store = self.store.clone();
        let span = tracing::info_span!(
            "persist_quote",
            correlation_id = write_ctx.correlation_id().map(tracing::field::display)
        );

        tokio::spawn(persist(store, write_ctx, quote).instrument(span))
    }
}

async fn persist(store: SqliteQuoteStore, ctx: RequestContext, quote: Quote) -> PersistOutcome {
    let started = Instant::now();
    match store.append(&quote, ctx.deadline()).await {
        Ok(record_id) => {
            tracing::debug!(record_id, bid = %quote.bid, elapsed_ms = elapsed_ms(started), "quote persisted");
            PersistOutcome::Committed { record_id }
        }
        Err(err) => {
            tracing::warn!(error = %err, bid = %quote.bid, elapsed_ms = elapsed_ms(started), "quote not persisted");
            PersistOutcome::Failed(err)
        }
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
