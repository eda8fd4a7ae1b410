//! asn-reconcile
//!
//! Crosscheck between the team registry and the team catalog, plus the policy
//! that decides who gets told about a missing team.
//!
//! - A team is missing when its slug is absent from the catalog.
//! - Owners are notified; with no owner, every member is.
//! - A team with no members has nobody to notify.
//!
//! Deterministic, pure logic. No IO. No chat-platform calls.

mod engine;
mod types;

pub use engine::{crosscheck, missing_teams, notification_target};
pub use types::*;
