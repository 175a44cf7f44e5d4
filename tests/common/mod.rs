//! Shared fixtures: mock HTTP servers and a wired-up gateway.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use quote_gateway::app_state::AppState;
use quote_gateway::config::Budgets;
use quote_gateway::persistence::SqliteQuoteStore;
use quote_gateway::service::{QuoteService, UpstreamClient};

/// Path the mock provider serves, mirroring the real provider.
pub const PROVIDER_PATH: &str = "/json/last/USD-BRL";

/// Budgets used by the tests: reference values, except a store budget
/// wide enough not to flake on a loaded machine.
pub fn test_budgets() -> Budgets {
    Budgets {
        store: Duration::from_secs(1),
        ..Budgets::default()
    }
}

/// Serves `router` on an ephemeral loopback port.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind loopback listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

/// HTTP client that never routes loopback traffic through a proxy.
pub fn http_client() -> reqwest::Client {
    let Ok(client) = reqwest::Client::builder().no_proxy().build() else {
        panic!("reqwest client");
    };
    client
}

/// Fresh in-memory store, optionally with the `quotes` table created.
pub async fn memory_store(bootstrap: bool) -> SqliteQuoteStore {
    let Ok(store) = SqliteQuoteStore::in_memory().await else {
        panic!("in-memory sqlite");
    };
    if bootstrap {
        let Ok(()) = store.bootstrap().await else {
            panic!("bootstrap failed");
        };
    }
    store
}

/// Quote service pointed at a provider on `provider`.
pub fn quote_service(provider: SocketAddr, store: SqliteQuoteStore, budgets: Budgets) -> QuoteService {
    let upstream = UpstreamClient::new(
        http_client(),
        format!("http://{provider}{PROVIDER_PATH}"),
        "USDBRL",
    );
    QuoteService::new(upstream, store, budgets)
}

/// Application state wrapping [`quote_service`].
pub fn app_state(provider: SocketAddr, store: SqliteQuoteStore, budgets: Budgets) -> AppState {
    AppState::new(quote_service(provider, store, budgets))
}

/// Polls `store` until it holds `expected` rows or `within` elapses, and
/// returns the last count seen.
pub async fn wait_for_rows(store: &SqliteQuoteStore, expected: i64, within: Duration) -> i64 {
    let deadline = tokio::time::Instant::now() + within;
    loop {
        let count = store.count().await.unwrap_or(-1);
        if count == expected || tokio::time::Instant::now() >= deadline {
            return count;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
