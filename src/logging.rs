// src/logging.rs

//! Subscriber setup for the `dirview` binary.
//!
//! `DIRVIEW_LOG` takes `EnvFilter` directives, so per-module levels work
//! (`DIRVIEW_LOG=dirview::view=debug`). `--log-level` replaces it with a
//! single level. With neither, only warnings such as skipped directories
//! are shown. Everything goes to stderr; stdout carries command output.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "DIRVIEW_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();

    fmt()
        .with_env_filter(build_filter(cli_level, env.as_deref()))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing tracing subscriber: {e}"))
}

/// CLI level first, then the env directives, then `warn`.
///
/// Directives that fail to parse are ignored rather than aborting startup.
pub fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level.as_str());
    }
    env.map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
