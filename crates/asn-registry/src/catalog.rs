use asn_schemas::CatalogTeams;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::{trim_base, FetchError, TeamCatalog};

const REGISTRY: &str = "team-catalog";

/// Team catalog client (`GET <base>/team`).
///
/// The endpoint is unauthenticated; reachability is the only credential.
#[derive(Debug, Clone)]
pub struct TeamCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl TeamCatalogClient {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: trim_base(base_url.as_ref()),
        }
    }

    fn teams_url(&self) -> String {
        format!("{}/team", self.base_url)
    }
}

#[async_trait::async_trait]
impl TeamCatalog for TeamCatalogClient {
    fn name(&self) -> &'static str {
        REGISTRY
    }

    async fn catalog_teams(&self) -> Result<CatalogTeams, FetchError> {
        debug!(client = REGISTRY, "start fetching teams from team catalog");

        let resp = self
            .http
            .get(self.teams_url())
            .header(USER_AGENT, crate::USER_AGENT)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                registry: REGISTRY,
                source,
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|source| FetchError::Transport {
            registry: REGISTRY,
            source,
        })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                registry: REGISTRY,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CatalogResponse =
            serde_json::from_str(&body).map_err(|source| FetchError::Decode {
                registry: REGISTRY,
                source,
            })?;

        let teams = CatalogTeams::from_entries(
            parsed
                .content
                .unwrap_or_default()
                .into_iter()
                .map(|entry| entry.nais_teams.unwrap_or_default()),
        );

        debug!(
            client = REGISTRY,
            teams_count = teams.len(),
            "done fetching teams from team catalog"
        );

        Ok(teams)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    content: Option<Vec<CatalogEntry>>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(rename = "naisTeams")]
    nais_teams: Option<Vec<String>>,
}
