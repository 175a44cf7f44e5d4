//! Quote client: pull one quote from the gateway and record it locally.

pub mod requester;
pub mod sink;

pub use requester::QuoteRequester;
pub use sink::FileSink;

use crate::domain::Quote;
use crate::error::ClientError;

/// Fetches one quote and writes it to `sink`.
///
/// Nothing is written unless the fetch succeeds.
///
/// # Errors
///
/// Returns [`ClientError::Fetch`] if the gateway call fails, or
/// [`ClientError::Sink`] if the file cannot be written.
pub async fn run_once(requester: &QuoteRequester, sink: &FileSink) -> Result<Quote, ClientError> {
    let quote = requester.run().await?;
    sink.write(&quote).await?;
    Ok(quote)
}
