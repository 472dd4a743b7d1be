//! Application entry point and dispatch.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use num_bigint::BigUint;

use crate::config::{AppConfig, Numeric};
use crate::error::SearchError;
use crate::math::FibValue;
use crate::search::{
    next_prime_fibonacci_with, parse_threshold, search_many, SearchObserver, SearchOutcome,
    SearchStep, TracingObserver,
};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    match config.numeric {
        Numeric::Big => run_with::<BigUint>(config),
        Numeric::U64 => run_with::<u64>(config),
    }
}

fn run_with<T>(config: &AppConfig) -> Result<()>
where
    T: FibValue + FromStr + Send + Sync,
    T::Err: fmt::Display,
{
    let thresholds = config
        .thresholds
        .iter()
        .map(|text| parse_threshold::<T>(text))
        .collect::<Result<Vec<_>, _>>()
        .context("could not read threshold")?;
    let limits = config.limits();

    let results: Vec<Result<SearchOutcome<T>, SearchError>> = if config.trace {
        // sequential so the step listings do not interleave
        thresholds
            .iter()
            .map(|threshold| {
                next_prime_fibonacci_with(threshold, limits, &mut StepPrinter::new(io::stderr()))
            })
            .collect()
    } else if let [threshold] = thresholds.as_slice() {
        vec![next_prime_fibonacci_with(
            threshold,
            limits,
            &mut TracingObserver,
        )]
    } else {
        search_many(&thresholds, limits)
    };

    for (threshold, result) in thresholds.iter().zip(results) {
        let outcome =
            result.with_context(|| format!("search past threshold {threshold} failed"))?;
        println!("{}", format_outcome(threshold, &outcome, config.quiet));
    }

    Ok(())
}

/// Writes each step as it is evaluated, then hands it to [`TracingObserver`].
struct StepPrinter<W> {
    out: W,
}

impl<W: Write> StepPrinter<W> {
    fn new(out: W) -> Self {
        Self { out }
    }
}

impl<T: FibValue, W: Write> SearchObserver<T> for StepPrinter<W> {
    fn on_step(&mut self, step: &SearchStep<T>, threshold: &T) {
        // a closed stderr must not abort the search
        let _ = writeln!(self.out, "{}", format_step(step, threshold));
        TracingObserver.on_step(step, threshold);
    }

    fn on_found(&mut self, outcome: &SearchOutcome<T>) {
        TracingObserver.on_found(outcome);
    }
}

fn format_step<T: fmt::Display>(step: &SearchStep<T>, threshold: &T) -> String {
    let verdict = if step.is_prime { "prime" } else { "not prime" };
    format!(
        "fib[{}] = {} ({verdict}), threshold {threshold}",
        step.index, step.value
    )
}

fn format_outcome<T: fmt::Display>(
    threshold: &T,
    outcome: &SearchOutcome<T>,
    quiet: bool,
) -> String {
    if quiet {
        outcome.value.to_string()
    } else {
        format!(
            "Next prime fib after {threshold}: {} (index {})",
            outcome.value, outcome.index
        )
    }
}
