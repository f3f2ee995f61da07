//! Ticker universes.
//!
//! A universe is the ordered list of symbols a screen runs over, after
//! duplicates and operator exclusions are removed.

use quantval_data::read_tickers;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Trait for stock universes.
pub trait Universe {
    /// Get all symbols in the universe.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s == symbol)
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

/// Universe loaded from a ticker list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerUniverse {
    symbols: Vec<String>,
}

impl TickerUniverse {
    /// Build a universe from symbols in order.
    ///
    /// Symbols are taken as given. [`read_tickers`] already upper-cases and
    /// deduplicates a ticker file, so [`TickerUniverse::from_csv`] needs no
    /// second pass.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a universe from a CSV with a `Ticker` column.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or has no `Ticker` column.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> quantval_data::Result<Self> {
        Ok(Self::new(read_tickers(path)?))
    }

    /// Drop every excluded symbol, matching case-insensitively.
    pub fn exclude(mut self, excluded: &[String]) -> Self {
        if excluded.is_empty() {
            return self;
        }
        let excluded: HashSet<String> = excluded.iter().map(|s| s.to_uppercase()).collect();
        let before = self.symbols.len();
        self.symbols
            .retain(|s| !excluded.contains(&s.to_uppercase()));
        info!(
            removed = before - self.symbols.len(),
            remaining = self.symbols.len(),
            "Applied exclusions"
        );
        self
    }

    /// Borrow the symbols in order.
    pub fn as_slice(&self) -> &[String] {
        &self.symbols
    }

    /// Whether the universe has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Universe for TickerUniverse {
    fn symbols(&self) -> Vec<String> {
        self.symbols.clone()
    }

    fn size(&self) -> usize {
        self.symbols.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_trait() {
        let universe = TickerUniverse::new(["AAPL", "MSFT", "XOM"]);

        assert!(universe.contains("AAPL"));
        assert!(!universe.contains("NOTREAL"));
        assert_eq!(universe.size(), 3);
        assert_eq!(universe.as_slice(), ["AAPL", "MSFT", "XOM"]);
    }

    #[test]
    fn test_exclude() {
        let universe = TickerUniverse::new(["AAPL", "DISCA", "HFC", "XOM"])
            .exclude(&["disca".to_string(), "HFC".to_string(), "ZZZ".to_string()]);
        assert_eq!(universe.as_slice(), ["AAPL", "XOM"]);
    }

    #[test]
    fn test_from_csv_normalizes_symbols() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"Ticker\nxom\nAAPL\nXOM\n").unwrap();

        let universe = TickerUniverse::from_csv(file.path()).unwrap();
        assert_eq!(universe.as_slice(), ["XOM", "AAPL"]);
    }

    #[test]
    fn test_exclude_nothing() {
        let universe = TickerUniverse::new(["AAPL"]).exclude(&[]);
        assert_eq!(universe.size(), 1);
        assert!(!universe.is_empty());
    }
}
