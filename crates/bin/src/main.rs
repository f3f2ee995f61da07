//! quantval CLI binary.
//!
//! Screens a ticker list for value stocks and writes the ranked report.

mod integration;
mod prompt;

use clap::{Parser, Subcommand, ValueEnum};
use integration::data_pipeline::{iex_provider, screen_with_progress};
use quantval::{ScreenConfig, ScreenOutcome, TickerUniverse, Universe};
use quantval_data::{DEFAULT_BATCH_SIZE, batches, read_tickers};
use quantval_factors::{DEFAULT_TOP_N, MetricSource, ScoringMode, available_metrics};
use quantval_output::{ExportFormat, Exporter, WorkbookLayout, to_ascii_table};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quantval")]
#[command(about = "quantval: robust value screener", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen a ticker list and write the ranked report
    Screen {
        /// CSV file with a Ticker column (prompted for when omitted)
        #[arg(long)]
        tickers: Option<PathBuf>,

        /// Portfolio value to size positions with (prompted for when omitted)
        #[arg(long, value_parser = parse_budget)]
        portfolio_value: Option<f64>,

        /// Scoring mode
        #[arg(long, value_enum, default_value_t = ModeArg::Composite)]
        mode: ModeArg,

        /// Number of candidates to keep
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,

        /// Symbols per provider request
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Tickers to leave out of the universe
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Output file (defaults to the strategy's workbook name)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = FormatArg::Xlsx)]
        format: FormatArg,

        /// Rows of the ranked table to print
        #[arg(long, default_value = "10")]
        rows: usize,
    },

    /// Show how a ticker list is split into provider batches
    Batches {
        /// CSV file with a Ticker column
        #[arg(long)]
        tickers: PathBuf,

        /// Symbols per provider request
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },

    /// List the value metrics
    Metrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Mean percentile rank across five value ratios
    Composite,
    /// Positive P/E only, ranked on raw P/E
    RawPe,
}

impl From<ModeArg> for ScoringMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Composite => Self::CompositePercentile,
            ModeArg::RawPe => Self::RawPe,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Xlsx,
    Csv,
    Json,
    PrettyJson,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Xlsx => Self::Xlsx,
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
            FormatArg::PrettyJson => Self::PrettyJson,
        }
    }
}

fn parse_budget(raw: &str) -> Result<f64, String> {
    prompt::parse_portfolio_value(raw)
        .ok_or_else(|| format!("'{raw}' is not a positive portfolio value"))
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quantval=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            tickers,
            portfolio_value,
            mode,
            top_n,
            batch_size,
            exclude,
            output,
            format,
            rows,
        } => {
            let config = ScreenConfig {
                batch_size,
                top_n,
                mode: mode.into(),
                exclude,
            };
            let args = ScreenArgs {
                tickers,
                portfolio_value,
                output,
                format: format.into(),
                rows,
            };
            run_screen_command(config, args).await?;
        }
        Commands::Batches {
            tickers,
            batch_size,
        } => {
            print_batches(&tickers, batch_size)?;
        }
        Commands::Metrics => {
            list_metrics();
        }
    }

    Ok(())
}

struct ScreenArgs {
    tickers: Option<PathBuf>,
    portfolio_value: Option<f64>,
    output: Option<PathBuf>,
    format: ExportFormat,
    rows: usize,
}

async fn run_screen_command(
    config: ScreenConfig,
    args: ScreenArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let tickers = match args.tickers {
        Some(path) => path,
        None => prompt::prompt_existing_file(&mut io::stdin().lock(), &mut io::stdout())?,
    };
    let universe = TickerUniverse::from_csv(&tickers)?.exclude(&config.exclude);
    info!(file = %tickers.display(), symbols = universe.size(), "Loaded universe");

    let budget = match (config.mode.allocates(), args.portfolio_value) {
        (false, _) => None,
        (true, Some(value)) => Some(value),
        (true, None) => Some(prompt::prompt_portfolio_value(
            &mut io::stdin().lock(),
            &mut io::stdout(),
        )?),
    };

    let strategy = config.mode.scorer().name().to_string();
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", strategy.to_uppercase());
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Universe: {} tickers from {}", universe.size(), tickers.display());
    if let Some(budget) = budget {
        println!("Portfolio Value: ${:.2}", budget);
    }
    println!();

    let provider = iex_provider()?;
    let outcome = screen_with_progress(&provider, universe.as_slice(), &config, budget).await?;

    print_outcome(&outcome, args.rows);

    let path = args
        .output
        .unwrap_or_else(|| default_output_path(config.mode, args.format));
    print!("Writing {}...", path.display());
    std::io::Write::flush(&mut std::io::stdout())?;
    outcome.report.export_to_file(&path, args.format)?;
    println!(" ✓");

    Ok(())
}

fn default_output_path(mode: ScoringMode, format: ExportFormat) -> PathBuf {
    PathBuf::from(WorkbookLayout::default_file_name(mode)).with_extension(format.extension())
}

fn print_outcome(outcome: &ScreenOutcome, rows: usize) {
    let stats = outcome.stats;
    println!("\nScreen Summary:");
    println!("{}", "-".repeat(40));
    println!("  Universe:                 {}", stats.universe);
    println!("  Priced:                   {}", stats.fetched);
    println!("  Scored:                   {}", stats.scored);
    println!("  Selected:                 {}", stats.selected);
    if let Some(allocation) = &outcome.allocation {
        println!("  Invested:                 ${:.2}", allocation.total_invested());
        println!("  Uninvested:               ${:.2}", allocation.uninvested());
    }
    print!("{}", to_ascii_table(&outcome.report, rows));
    println!();
}

fn print_batches(tickers: &Path, batch_size: usize) -> Result<(), Box<dyn std::error::Error>> {
    let symbols = read_tickers(tickers)?;
    let chunks = batches(&symbols, batch_size)?;

    println!(
        "{} tickers in {} batches of up to {}",
        symbols.len(),
        symbols.len().div_ceil(batch_size),
        batch_size
    );
    println!("{}", "=".repeat(40));
    for (i, chunk) in chunks.enumerate() {
        println!("{:3} ({:3}): {}", i + 1, chunk.len(), chunk.join(","));
    }

    Ok(())
}

fn list_metrics() {
    println!("Value Metrics:");
    println!("==============\n");

    for info in available_metrics() {
        let source = match info.source {
            MetricSource::Provider => "provider",
            MetricSource::Derived => "derived",
        };
        println!(
            "{:<12} {:<20} {:<9} {}",
            info.name, info.label, source, info.description
        );
    }
}
