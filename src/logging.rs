//! # Logging
//!
//! Structured logging for the `pagegen` binary via `tracing-subscriber`.
//!
//! The level comes from `RUST_LOG` when set, otherwise `info` (or `debug`
//! with `--verbose`). Diagnostics go to stderr so the user-facing report on
//! stdout stays readable.
//!
//! ## Environment Variables
//!
//! - `RUST_LOG` - standard `EnvFilter` directives, e.g. `pagegen=debug`
//! - `PAGEGEN_LOG_FORMAT` - `pretty` (default) or `json`

use anyhow::Context;
use std::env;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }

    /// Format from `PAGEGEN_LOG_FORMAT`, defaulting to pretty.
    pub fn from_env() -> Self {
        env::var("PAGEGEN_LOG_FORMAT")
            .map(|s| LogFormat::parse(&s))
            .unwrap_or(LogFormat::Pretty)
    }
}

/// Default filter level for the given verbosity.
pub fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbose: bool, format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    let fmt_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(verbose)
            .without_time()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}
