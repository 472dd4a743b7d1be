//! Command-line configuration.

use clap::{Parser, ValueEnum};

use crate::search::SearchLimits;

/// Find the next Fibonacci number above a threshold that is also prime.
#[derive(Parser, Debug)]
#[command(name = "prime_fibonacci", version, about, allow_negative_numbers = true)]
pub struct AppConfig {
    /// Thresholds to search past (non-negative integers).
    #[arg(
        env = "PRIME_FIB_THRESHOLD",
        value_delimiter = ',',
        default_value = "20"
    )]
    pub thresholds: Vec<String>,

    /// Numeric type the search runs on.
    #[arg(long, value_enum, default_value_t = Numeric::Big)]
    pub numeric: Numeric,

    /// Give up after evaluating this index.
    #[arg(long, env = "PRIME_FIB_MAX_INDEX")]
    pub max_index: Option<u64>,

    /// Print every evaluated step to stderr.
    #[arg(long)]
    pub trace: bool,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (only output the number).
    #[arg(short, long)]
    pub quiet: bool,
}

/// Numeric representation of Fibonacci values.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeric {
    /// 64-bit unsigned; values past F(92) are an overflow error.
    U64,
    /// Arbitrary precision.
    Big,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    #[must_use]
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_index: self.max_index,
        }
    }

    /// Default log level; `RUST_LOG` directives are applied on top.
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
