//! Application logger construction.
//!
//! `LOG_FORMAT` picks JSON lines (default, for log shipping) or human-readable
//! text. `LOG_LEVEL` sets the default level; `RUST_LOG` directives, when set,
//! refine it per target.

use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            other => bail!(
                "LOGGER_INVALID_FORMAT: '{}' is not one of: json | text",
                other
            ),
        }
    }
}

/// Parse a level name (`trace`..`error`, or `off`).
pub fn parse_level(s: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(s.trim())
        .map_err(|_| anyhow!("LOGGER_INVALID_LEVEL: '{}' is not a log level", s.trim()))
}

/// Install the global subscriber. Fails on bad format/level or when a global
/// subscriber is already installed.
pub fn init(format: &str, level: &str) -> Result<()> {
    let format = LogFormat::parse(format)?;
    let level = parse_level(level)?;

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match format {
        LogFormat::Json => builder
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .try_init(),
        LogFormat::Text => builder.try_init(),
    };

    installed.map_err(|e| anyhow!("LOGGER_INIT_FAILED: {e}"))
}
