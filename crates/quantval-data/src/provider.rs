//! Provider seam and sequential batch fetching.
//!
//! The ticker universe is partitioned into fixed-size batches and each batch
//! is requested with one provider call. Calls are awaited one after another;
//! a failed call aborts the whole fetch.

use crate::error::{DataError, Result};
use crate::quote::RawQuote;
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, info};

/// Default number of symbols per provider request.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// A source of quote and fundamentals data, queried one batch at a time.
pub trait QuoteProvider {
    /// Fetch data for a batch of symbols.
    ///
    /// The returned map is keyed by symbol. Symbols the provider knows nothing
    /// about may be absent from the map.
    fn fetch_batch(
        &self,
        symbols: &[String],
    ) -> impl Future<Output = Result<HashMap<String, RawQuote>>> + Send;
}

/// Progress of a running [`fetch_universe`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// 1-based index of the batch that just completed
    pub batch: usize,
    /// Total number of batches
    pub total_batches: usize,
    /// Symbols fetched so far
    pub symbols_done: usize,
}

/// Partition `symbols` into consecutive batches of at most `size` symbols.
///
/// Concatenating the batches reproduces `symbols` in order; only the last
/// batch may be shorter than `size`.
pub fn batches(symbols: &[String], size: usize) -> Result<std::slice::Chunks<'_, String>> {
    if size == 0 {
        return Err(DataError::InvalidBatchSize(size));
    }
    Ok(symbols.chunks(size))
}

/// Fetch quotes for every symbol, one batch per provider call.
///
/// Returns one [`RawQuote`] per input symbol, in input order. A symbol the
/// provider did not return gets a quote with every field missing.
///
/// # Errors
///
/// Fails on an invalid batch size or on the first provider error.
pub async fn fetch_universe<P, F>(
    provider: &P,
    symbols: &[String],
    batch_size: usize,
    mut on_batch: F,
) -> Result<Vec<RawQuote>>
where
    P: QuoteProvider,
    F: FnMut(BatchProgress),
{
    let chunks = batches(symbols, batch_size)?;
    let total_batches = symbols.len().div_ceil(batch_size);
    info!(
        symbols = symbols.len(),
        batches = total_batches,
        batch_size,
        "Fetching quotes"
    );

    let mut quotes = Vec::with_capacity(symbols.len());
    for (index, chunk) in chunks.enumerate() {
        let mut fetched = provider.fetch_batch(chunk).await?;
        debug!(
            batch = index + 1,
            requested = chunk.len(),
            returned = fetched.len(),
            "Batch complete"
        );

        for symbol in chunk {
            let quote = fetched
                .remove(symbol)
                .unwrap_or_else(|| RawQuote::empty(symbol.as_str()));
            quotes.push(quote);
        }

        on_batch(BatchProgress {
            batch: index + 1,
            total_batches,
            symbols_done: quotes.len(),
        });
    }

    Ok(quotes)
}
