//! asn-runtime
//!
//! The reconciliation run: fetch both registries concurrently, crosscheck,
//! then notify the right people for every team missing from the catalog.
//!
//! Only a registry fetch failure fails the run. Everything after the
//! crosscheck degrades per team and per recipient into logged warnings.

mod notifier;
mod report;

pub use notifier::{NotifierOptions, TeamNotifier};
pub use report::{RunReport, TeamOutcome, TeamReport};
