//! asn-registry
//!
//! Clients for the two team registries that get reconciled:
//! - [`NaisApiClient`]: teams with members and roles (GraphQL, bearer token).
//! - [`TeamCatalogClient`]: slugs registered in the team catalog (REST, no auth).
//!
//! Every call is a full, independent snapshot. Nothing is cached between calls
//! and a malformed response fails the whole fetch instead of returning a
//! partial view.

mod catalog;
mod error;
mod nais;

pub use catalog::TeamCatalogClient;
pub use error::FetchError;
pub use nais::NaisApiClient;

use asn_schemas::{CatalogTeams, Team};

/// Sent on every outbound registry request.
pub const USER_AGENT: &str = "appsec-notifiers";

// ---------------------------------------------------------------------------
// Registry traits
// ---------------------------------------------------------------------------

/// Source of teams with their members (registry A).
///
/// Object safe and `Send + Sync` so the engine can hold either a live client
/// or an in-memory fake behind the same seam.
#[async_trait::async_trait]
pub trait TeamRegistry: Send + Sync {
    /// Short name used in logs and errors (e.g. `"nais-api"`).
    fn name(&self) -> &'static str;

    /// Every team with its complete member list.
    async fn teams_with_members(&self) -> Result<Vec<Team>, FetchError>;
}

/// Source of catalog slugs (registry B).
#[async_trait::async_trait]
pub trait TeamCatalog: Send + Sync {
    fn name(&self) -> &'static str;

    /// Deduplicated catalog slugs. An empty set is a valid answer.
    async fn catalog_teams(&self) -> Result<CatalogTeams, FetchError>;
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
