//! prime_fibonacci: print the next prime Fibonacci number above a threshold.

use anyhow::Result;
use prime_fibonacci::{app, config};

fn main() -> Result<()> {
    let config = config::AppConfig::parse();

    // Logs go to stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    app::run(&config)
}
