//! Fetch and screen the universe with progress reporting.

use indicatif::{ProgressBar, ProgressStyle};
use quantval::{ScreenConfig, ScreenError, ScreenOutcome, run_screen};
use quantval_data::QuoteProvider;
use quantval_data::iex::IexCloudProvider;
use std::time::Duration;

/// Error type for data pipeline operations.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DataPipelineError {
    /// The screen itself failed.
    #[error(transparent)]
    Screen(#[from] ScreenError),
    /// The progress bar template is malformed.
    #[error("Progress bar error: {0}")]
    Progress(String),
}

/// Progress bar over provider batches.
pub(crate) fn batch_progress_bar(total_batches: usize) -> Result<ProgressBar, DataPipelineError> {
    let pb = ProgressBar::new(total_batches as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map_err(|e| DataPipelineError::Progress(e.to_string()))?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Build the IEX Cloud provider from the environment.
pub(crate) fn iex_provider() -> Result<IexCloudProvider, ScreenError> {
    Ok(IexCloudProvider::from_env()?)
}

/// Run the screen, ticking a progress bar once per batch.
pub(crate) async fn screen_with_progress<P: QuoteProvider>(
    provider: &P,
    symbols: &[String],
    config: &ScreenConfig,
    budget: Option<f64>,
) -> Result<ScreenOutcome, DataPipelineError> {
    config.validate()?;

    let total_batches = symbols.len().div_ceil(config.batch_size);
    let pb = batch_progress_bar(total_batches)?;
    pb.set_message("Fetching quotes and advanced stats...");

    let result = run_screen(provider, symbols, config, budget, |progress| {
        pb.set_position(progress.batch as u64);
        pb.set_message(format!(
            "{}/{} symbols",
            progress.symbols_done,
            symbols.len()
        ));
    })
    .await;

    match result {
        Ok(outcome) => {
            pb.finish_with_message(format!(
                "Fetched {} symbols ({} priced)",
                outcome.stats.universe, outcome.stats.fetched
            ));
            Ok(outcome)
        }
        Err(e) => {
            pb.finish_with_message("Failed!");
            Err(e.into())
        }
    }
}
