//! Interactive console prompts.
//!
//! Each prompt repeats until the operator enters something usable. Running
//! out of input is fatal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Error type for prompts.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PromptError {
    /// Input ended before a valid answer was given.
    #[error("input closed before a valid answer was entered")]
    Closed,
    /// Reading or writing the console failed.
    #[error("console error: {0}")]
    Io(#[from] io::Error),
}

/// Ask `question` until `parse` accepts the trimmed answer.
fn ask<R, W, T, F>(input: &mut R, output: &mut W, question: &str, mut parse: F) -> Result<T, PromptError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<T, String>,
{
    loop {
        write!(output, "{question}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }

        match parse(line.trim()) {
            Ok(value) => return Ok(value),
            Err(reason) => writeln!(output, "{reason}")?,
        }
    }
}

/// Ask for the ticker file until an existing file is named.
pub(crate) fn prompt_existing_file<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf, PromptError> {
    ask(
        input,
        output,
        "Enter the name of the file containing the tickers: ",
        |answer| {
            let path = PathBuf::from(answer);
            if !answer.is_empty() && path.is_file() {
                Ok(path)
            } else {
                Err(format!("No such file: '{answer}'. Please try again."))
            }
        },
    )
}

/// Ask for the portfolio value until a finite amount above zero is entered.
pub(crate) fn prompt_portfolio_value<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<f64, PromptError> {
    ask(input, output, "Enter the value of your portfolio: ", |answer| {
        parse_portfolio_value(answer)
            .ok_or_else(|| "That's not a valid amount! Please try again.".to_string())
    })
}

/// Parse a portfolio value, accepting `$` and `,` separators.
pub(crate) fn parse_portfolio_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
