//! asn-config
//!
//! Runtime configuration for the notifiers.
//!
//! # Contract
//! - All settings come from environment variables (optionally seeded from `.env`,
//!   see [`env_file`]). Resolution happens once, at startup, via
//!   [`Config::from_env`]; the result is passed into constructors.
//! - A blank value counts as unset.
//! - Error messages name the variable, never its value.
//! - `Debug` on [`Config`] redacts every token.
//!
//! Logger construction lives in [`logging`]; process exit codes in [`exit`].

pub mod env_file;
pub mod exit;
pub mod logging;

use std::collections::BTreeSet;

use anyhow::{bail, Result};

pub const DEFAULT_NAIS_API_ENDPOINT: &str = "https://console.nav.cloud.nais.io/graphql";
pub const DEFAULT_LOG_FORMAT: &str = "json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ---------------------------------------------------------------------------
// Delivery mode
// ---------------------------------------------------------------------------

/// How notifications about missing teams reach people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Templated block message to every resolved recipient.
    #[default]
    Blocks,
    /// Plain markdown direct message to every resolved recipient.
    Direct,
    /// Resolve recipients and log them; send nothing.
    DryRun,
}

impl DeliveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::Blocks => "blocks",
            DeliveryMode::Direct => "direct",
            DeliveryMode::DryRun => "dry-run",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blocks" => Ok(DeliveryMode::Blocks),
            "direct" => Ok(DeliveryMode::Direct),
            "dry-run" | "dryrun" | "dry_run" => Ok(DeliveryMode::DryRun),
            other => bail!(
                "CONFIG_INVALID: NOTIFY_MODE '{}' is not one of: blocks | direct | dry-run",
                other
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Resolved configuration. **Tokens are redacted in `Debug` output.**
#[derive(Clone)]
pub struct Config {
    /// `GITHUB_TOKEN` (required).
    pub github_token: String,
    /// `TEAMS_TOKEN`: bearer token for the Nais API (required).
    pub nais_api_token: String,
    /// `NAIS_API_ENDPOINT`.
    pub nais_api_endpoint: String,
    /// `TEAM_CATALOG_ENDPOINT`: base URL of the team catalog (required).
    pub team_catalog_endpoint: String,
    /// `SLACK_TOKEN`: Slack bot token (required).
    pub slack_token: String,
    /// `LOG_FORMAT`: `json` or `text`; validated by [`logging::init`].
    pub log_format: String,
    /// `LOG_LEVEL`: validated by [`logging::init`].
    pub log_level: String,
    /// `BYPASS_TEAMS`: raw comma-separated slugs, kept verbatim.
    pub bypass_teams: String,
    /// `NOTIFY_MODE`.
    pub delivery_mode: DeliveryMode,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &"<REDACTED>")
            .field("nais_api_token", &"<REDACTED>")
            .field("nais_api_endpoint", &self.nais_api_endpoint)
            .field("team_catalog_endpoint", &self.team_catalog_endpoint)
            .field("slack_token", &"<REDACTED>")
            .field("log_format", &self.log_format)
            .field("log_level", &self.log_level)
            .field("bypass_teams", &self.bypass_teams)
            .field("delivery_mode", &self.delivery_mode)
            .finish()
    }
}

impl Config {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve through an arbitrary lookup (tests pass a map; no env mutation).
    ///
    /// Every missing required variable is reported in one error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let github_token = get("GITHUB_TOKEN");
        let nais_api_token = get("TEAMS_TOKEN");
        let team_catalog_endpoint = get("TEAM_CATALOG_ENDPOINT");
        let slack_token = get("SLACK_TOKEN");

        let missing: Vec<&str> = [
            ("GITHUB_TOKEN", github_token.is_none()),
            ("TEAMS_TOKEN", nais_api_token.is_none()),
            ("TEAM_CATALOG_ENDPOINT", team_catalog_endpoint.is_none()),
            ("SLACK_TOKEN", slack_token.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        if !missing.is_empty() {
            bail!(
                "CONFIG_MISSING: required env var(s) not set or empty: {}",
                missing.join(", ")
            );
        }

        let delivery_mode = match get("NOTIFY_MODE") {
            Some(raw) => DeliveryMode::parse(&raw)?,
            None => DeliveryMode::default(),
        };

        Ok(Self {
            github_token: github_token.unwrap_or_default(),
            nais_api_token: nais_api_token.unwrap_or_default(),
            nais_api_endpoint: get("NAIS_API_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_NAIS_API_ENDPOINT.to_string()),
            team_catalog_endpoint: team_catalog_endpoint.unwrap_or_default(),
            slack_token: slack_token.unwrap_or_default(),
            log_format: get("LOG_FORMAT").unwrap_or_else(|| DEFAULT_LOG_FORMAT.to_string()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            bypass_teams: lookup("BYPASS_TEAMS").unwrap_or_default(),
            delivery_mode,
        })
    }

    /// `BYPASS_TEAMS` split on commas, entries trimmed, blanks dropped.
    pub fn bypass_team_slugs(&self) -> BTreeSet<String> {
        parse_slug_list(&self.bypass_teams)
    }
}

/// Parse a comma-separated slug list (`"a, b,,c"` -> `{a, b, c}`).
pub fn parse_slug_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
