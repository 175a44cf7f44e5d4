//! Gateway and client configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every time budget is a named value
//! here rather than a literal at the call site.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default upstream endpoint returning the latest USD→BRL quote.
pub const DEFAULT_PROVIDER_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";

/// Default currency pair key looked up in the provider payload.
pub const DEFAULT_CURRENCY_PAIR: &str = "USDBRL";

/// Per-hop time budgets enforced by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budgets {
    /// Ceiling for handling one inbound `/quote` request end to end.
    pub request: Duration,
    /// Caps how long the service waits on the upstream provider. The
    /// effective deadline is the minimum of this and the time the inbound
    /// request has left.
    pub provider: Duration,
    /// Caps how long the detached write may take. Rooted fresh when the
    /// write is spawned, never derived from the inbound request.
    pub store: Duration,
}

impl Default for Budgets {
    fn default() -> Self {
        Self {
            request: Duration::from_millis(250),
            provider: Duration::from_millis(200),
            store: Duration::from_millis(10),
        }
    }
}

/// Log output format for `tracing-subscriber`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// Upstream quote provider URL.
    pub provider_url: String,

    /// Key of the currency pair inside the provider payload (e.g. `USDBRL`).
    pub currency_pair: String,

    /// SQLite connection string.
    pub database_url: String,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// SQLite busy timeout in milliseconds. Capped at the store budget
    /// when applied; see [`GatewayConfig::store_busy_timeout`].
    pub database_busy_timeout_ms: u64,

    /// Per-hop time budgets.
    pub budgets: Budgets,

    /// Log output format.
    pub log_format: LogFormat,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()?;

        let provider_url =
            std::env::var("PROVIDER_URL").unwrap_or_else(|_| DEFAULT_PROVIDER_URL.to_string());
        let currency_pair =
            std::env::var("CURRENCY_PAIR").unwrap_or_else(|_| DEFAULT_CURRENCY_PAIR.to_string());

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://quotes.db".to_string());
        let database_max_connections = parse_env("DATABASE_MAX_CONNECTIONS", 5);
        let database_busy_timeout_ms = parse_env("DATABASE_BUSY_TIMEOUT_MS", 5_000);

        let defaults = Budgets::default();
        let budgets = Budgets {
            request: parse_env_millis("REQUEST_BUDGET_MS", defaults.request),
            provider: parse_env_millis("PROVIDER_BUDGET_MS", defaults.provider),
            store: parse_env_millis("STORE_BUDGET_MS", defaults.store),
        };

        let log_format = LogFormat::from_env_value(std::env::var("LOG_FORMAT").ok().as_deref());

        Ok(Self {
            listen_addr,
            provider_url,
            currency_pair,
            database_url,
            database_max_connections,
            database_busy_timeout_ms,
            budgets,
            log_format,
        })
    }
}

impl GatewayConfig {
    /// Busy timeout handed to SQLite: the configured value, capped at the
    /// store budget so a write stuck behind another writer gives up in time.
    #[must_use]
    pub fn store_busy_timeout(&self) -> Duration {
        Duration::from_millis(self.database_busy_timeout_ms).min(self.budgets.store)
    }
}

/// Configuration for the `quote-client` binary.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the gateway's `/quote` endpoint.
    pub quote_url: String,
    /// Caps how long the client waits for the gateway. Must stay above
    /// [`Budgets::request`] so an in-budget response is never cut off.
    pub budget: Duration,
    /// File the quote is written to.
    pub output_path: PathBuf,
    /// Label written in front of the bid.
    pub label: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            quote_url: "http://localhost:8080/quote".to_string(),
            budget: Duration::from_millis(300),
            output_path: PathBuf::from("cotacao.txt"),
            label: "Dólar".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl ClientConfig {
    /// Loads client configuration from environment variables, falling back
    /// to [`ClientConfig::default`] for anything unset or invalid.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            quote_url: std::env::var("QUOTE_SERVICE_URL").unwrap_or(defaults.quote_url),
            budget: parse_env_millis("CLIENT_BUDGET_MS", defaults.budget),
            output_path: std::env::var("QUOTE_OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            label: std::env::var("QUOTE_LABEL").unwrap_or(defaults.label),
            log_format: LogFormat::from_env_value(std::env::var("LOG_FORMAT").ok().as_deref()),
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable holding milliseconds. Zero is rejected,
/// since a zero budget fails every call.
fn parse_env_millis(key: &str, default: Duration) -> Duration {
    match parse_env::<u64>(key, 0) {
        0 => default,
        ms => Duration::from_millis(ms),
    }
}
