//! Diagnostics for the provider process
//!
//! stdout carries the host protocol, so logs go to stderr unless a log file
//! is configured. `RUST_LOG` overrides the configured level entirely.

use std::cmp;
use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::LoggingConfig;

/// Targets logged at the configured level. Everything else, HTTP stack
/// included, is capped at `warn`.
const PROVIDER_TARGETS: &[&str] = &["wistia_client", "terraform_provider_wistia"];

/// Install the global subscriber described by `config`.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = provider_filter(&config.level)?;

    let (writer, ansi) = match &config.file_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("couldn't open log file '{path}'"))?;
            (BoxMakeWriter::new(Arc::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let layer = if config.format == "json" {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .pretty()
            .with_ansi(ansi)
            .with_file(false)
            .with_writer(writer)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;
    Ok(())
}

fn parse_level(level: &str) -> anyhow::Result<LevelFilter> {
    level
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid log level: {level}"))
}

fn provider_filter(level: &str) -> anyhow::Result<EnvFilter> {
    let level = parse_level(level)?;
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::builder()
        .with_default_directive(dependency_level(level).into())
        .parse("")?;
    for target in PROVIDER_TARGETS {
        filter = filter.add_directive(format!("{target}={level}").parse()?);
    }
    Ok(filter)
}

fn dependency_level(level: LevelFilter) -> LevelFilter {
    // More verbose filters compare greater.
    cmp::min(level, LevelFilter::WARN)
}
