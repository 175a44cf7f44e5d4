//! SQLite implementation of the quote store.

use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDateTime;
use sqlx::{Connection, SqlitePool};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tokio::time::Instant;

use super::models::QuoteRecord;
use crate::domain::Quote;
use crate::error::StoreError;

const CREATE_QUOTES_TABLE: &str = "\
    CREATE TABLE IF NOT EXISTS quotes (\
        id INTEGER PRIMARY KEY AUTOINCREMENT, \
        bid TEXT NOT NULL, \
        observed_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP\
    )";

/// SQLite-backed quote store using `sqlx::SqlitePool`.
///
/// Cheap to clone: every clone shares the same pool, so one handle is
/// created at startup and handed to every detached writer. Concurrent
/// inserts are serialized by SQLite itself (WAL plus busy timeout).
#[derive(Debug, Clone)]
pub struct SqliteQuoteStore {
    pool: SqlitePool,
}

impl SqliteQuoteStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `url` in WAL mode.
    ///
    /// `busy_timeout` is how long a statement waits on another writer's
    /// lock. Keep it at or below the write budget: a write stuck on the
    /// lock cannot be interrupted, only rolled back once it gets through.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the URL is invalid or the
    /// database cannot be opened.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        busy_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        tracing::info!(
            max_connections,
            busy_timeout_ms = u64::try_from(busy_timeout.as_millis()).unwrap_or(u64::MAX),
            "quote store connected"
        );
        Ok(Self::new(pool))
    }

    /// Opens a private in-memory database.
    ///
    /// Each SQLite connection to `:memory:` is its own database, so the
    /// pool is pinned to one connection that is never recycled.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if SQLite cannot be opened.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the `quotes` table if it does not exist. Idempotent; run
    /// once at startup, outside the request path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on database failure.
    pub async fn bootstrap(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_QUOTES_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Appends one quote and returns the new row ID.
    ///
    /// The insert runs in its own transaction that only commits if it
    /// finished before `deadline`; otherwise it is rolled back. A write
    /// reported as [`StoreError::DeadlineExceeded`] therefore never leaves
    /// a row behind. A deadline that has already passed fails without
    /// touching the database.
    ///
    /// The statement itself is not abandoned mid-flight: SQLite would keep
    /// running it. Time spent waiting on another writer is bounded by the
    /// pool's busy timeout.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DeadlineExceeded`] if the deadline passes
    /// first, or [`StoreError::Database`] on database failure.
    pub async fn append(&self, quote: &Quote, deadline: Instant) -> Result<i64, StoreError> {
        if Instant::now() >= deadline {
            return Err(StoreError::DeadlineExceeded);
        }

        // Waiting for a pooled connection has no side effect and may be
        // cut short.
        let mut conn = tokio::time::timeout_at(deadline, self.pool.acquire())
            .await
            .map_err(|_| StoreError::DeadlineExceeded)??;
        let mut tx = conn.begin().await?;

        let inserted =
            sqlx::query_scalar::<_, i64>("INSERT INTO quotes (bid) VALUES (?1) RETURNING id")
                .bind(quote.bid.as_str())
                .fetch_one(&mut *tx)
                .await;

        if Instant::now() >= deadline {
            tx.rollback().await?;
            return Err(StoreError::DeadlineExceeded);
        }

        let id = inserted?;
        tx.commit().await?;
        Ok(id)
    }

    /// Returns the number of recorded quotes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on database failure.
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quotes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Returns up to `limit` most recent records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on database failure.
    pub async fn recent(&self, limit: u32) -> Result<Vec<QuoteRecord>, StoreError> {
        let rows = sqlx::query_as::<_, (i64, String, NaiveDateTime)>(
            "SELECT id, bid, observed_at FROM quotes ORDER BY id DESC LIMIT ?1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, bid, observed_at)| QuoteRecord {
                id,
                bid,
                observed_at: observed_at.and_utc(),
            })
            .collect())
    }
}
