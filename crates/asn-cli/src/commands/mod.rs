//! Command handlers for appsec-notifiers.
//!
//! Each handler maps its own failures onto an [`Exit`] code; `main` only
//! bootstraps the environment and config.

pub mod nais_teams;

use anyhow::Result;
use asn_config::exit::Exit;
use asn_config::{Config, DeliveryMode};

pub fn check_config(cfg: &Config) -> Exit {
    println!("{cfg:#?}");
    println!("bypass_team_slugs={:?}", cfg.bypass_team_slugs());
    Exit::Success
}

/// Command-line mode flags layered over `NOTIFY_MODE`.
pub fn resolve_delivery_mode(
    configured: DeliveryMode,
    mode: Option<&str>,
    dry_run: bool,
) -> Result<DeliveryMode> {
    if dry_run {
        return Ok(DeliveryMode::DryRun);
    }
    match mode {
        Some(raw) => DeliveryMode::parse(raw),
        None => Ok(configured),
    }
}
