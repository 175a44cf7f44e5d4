//! Fixtures for tests that need a real database file and a second writer.

#![allow(clippy::panic)]

use std::time::Duration;

use sqlx::{Connection, SqliteConnection};
use tempfile::TempDir;

use super::SqliteQuoteStore;

/// Bootstrapped store over a fresh database file. The returned directory
/// must outlive the store.
pub(crate) async fn file_store(busy_timeout: Duration) -> (TempDir, String, SqliteQuoteStore) {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("temp dir");
    };
    let url = format!("sqlite://{}", dir.path().join("quotes.db").display());
    let Ok(store) = SqliteQuoteStore::connect(&url, 2, busy_timeout).await else {
        panic!("open file store");
    };
    let Ok(()) = store.bootstrap().await else {
        panic!("bootstrap failed");
    };
    (dir, url, store)
}

/// Opens a second connection to `url` and takes the write lock.
pub(crate) async fn hold_write_lock(url: &str) -> SqliteConnection {
    let Ok(mut conn) = SqliteConnection::connect(url).await else {
        panic!("open locking connection");
    };
    let Ok(_) = sqlx::query("BEGIN IMMEDIATE").execute(&mut conn).await else {
        panic!("take write lock");
    };
    conn
}

/// Commits the lock holder's transaction after `after`.
pub(crate) fn release_after(
    mut conn: SqliteConnection,
    after: Duration,
) -> tokio::task::JoinHandle<bool> {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        sqlx::query("COMMIT").execute(&mut conn).await.is_ok()
    })
}
