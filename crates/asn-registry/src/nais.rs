use asn_schemas::{Member, Role, Team};
use reqwest::header::USER_AGENT;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::{FetchError, TeamRegistry};

const REGISTRY: &str = "nais-api";

const DEFAULT_PAGE_SIZE: i64 = 100;

const TEAMS_QUERY: &str = r#"query Teams($first: Int!, $after: Cursor, $membersFirst: Int!) {
  teams(first: $first, after: $after) {
    nodes {
      slug
      members(first: $membersFirst) {
        nodes { role user { email } }
        pageInfo { hasNextPage endCursor }
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}"#;

const TEAM_MEMBERS_QUERY: &str = r#"query TeamMembers($slug: Slug!, $first: Int!, $after: Cursor) {
  team(slug: $slug) {
    members(first: $first, after: $after) {
      nodes { role user { email } }
      pageInfo { hasNextPage endCursor }
    }
  }
}"#;

/// Nais API client: every team with members and roles.
///
/// Token is passed in by the caller; never logged.
#[derive(Clone)]
pub struct NaisApiClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
    page_size: i64,
}

impl std::fmt::Debug for NaisApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NaisApiClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<REDACTED>")
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl NaisApiClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Page size for both team and member connections. Clamped to >= 1.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T, FetchError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header(USER_AGENT, crate::USER_AGENT)
            .json(&json!({ "query": query, "variables": variables }))
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

        // `errors` before typed decoding; failed queries carry `null` data.
        let parsed: GraphQlResponse = serde_json::from_str(&body).map_err(decode)?;

        let messages: Vec<String> = parsed
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.message)
            .collect();
        if !messages.is_empty() {
            return Err(FetchError::GraphQl {
                registry: REGISTRY,
                messages,
            });
        }

        let data = parsed
            .data
            .filter(|d| !d.is_null())
            .ok_or_else(|| invalid("response carries neither data nor errors"))?;
        serde_json::from_value(data).map_err(decode)
    }

    /// Remaining member pages for one team, starting after `cursor`.
    async fn remaining_members(
        &self,
        slug: &str,
        mut cursor: String,
    ) -> Result<Vec<MemberNode>, FetchError> {
        let mut out = Vec::new();
        loop {
            let data: TeamMembersData = self
                .query(
                    TEAM_MEMBERS_QUERY,
                    json!({ "slug": slug, "first": self.page_size, "after": cursor }),
                )
                .await?;

            let page = data.team.members;
            out.extend(page.nodes);
            match next_cursor(&page.page_info, Some(cursor.as_str()), slug)? {
                Some(next) => cursor = next,
                None => return Ok(out),
            }
        }
    }
}

#[async_trait::async_trait]
impl TeamRegistry for NaisApiClient {
    fn name(&self) -> &'static str {
        REGISTRY
    }

    async fn teams_with_members(&self) -> Result<Vec<Team>, FetchError> {
        debug!(client = REGISTRY, "start fetching teams with members");

        let mut teams: Vec<Team> = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let data: TeamsData = self
                .query(
                    TEAMS_QUERY,
                    json!({
                        "first": self.page_size,
                        "after": after,
                        "membersFirst": self.page_size,
                    }),
                )
                .await?;

            for node in data.teams.nodes {
                let mut members = node.members.nodes;
                if let Some(cursor) = next_cursor(&node.members.page_info, None, &node.slug)? {
                    members.extend(self.remaining_members(&node.slug, cursor).await?);
                }
                teams.push(into_team(node.slug, members)?);
            }

            match next_cursor(&data.teams.page_info, after.as_deref(), "teams")? {
                Some(next) => after = Some(next),
                None => break,
            }
        }

        debug!(
            client = REGISTRY,
            teams_count = teams.len(),
            "done fetching teams with members"
        );

        Ok(teams)
    }
}

fn invalid(message: impl Into<String>) -> FetchError {
    FetchError::Invalid {
        registry: REGISTRY,
        message: message.into(),
    }
}

fn decode(source: serde_json::Error) -> FetchError {
    FetchError::Decode {
        registry: REGISTRY,
        source,
    }
}

/// Cursor for the next page, `None` when done. A page that claims more data
/// without a cursor, or with the cursor it was requested with, never ends and
/// is rejected.
fn next_cursor(
    page: &PageInfo,
    previous: Option<&str>,
    what: &str,
) -> Result<Option<String>, FetchError> {
    if !page.has_next_page {
        return Ok(None);
    }
    match page.end_cursor.as_deref() {
        Some(c) if c.is_empty() => Err(invalid(format!("{what}: hasNextPage without endCursor"))),
        Some(c) if Some(c) == previous => {
            Err(invalid(format!("{what}: cursor did not advance past {c}")))
        }
        Some(c) => Ok(Some(c.to_string())),
        None => Err(invalid(format!("{what}: hasNextPage without endCursor"))),
    }
}

fn into_team(slug: String, nodes: Vec<MemberNode>) -> Result<Team, FetchError> {
    if slug.trim().is_empty() {
        return Err(invalid("team without slug"));
    }

    let mut members = Vec::with_capacity(nodes.len());
    for node in nodes {
        let email = node
            .user
            .and_then(|u| u.email)
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| invalid(format!("team {slug}: member without email")))?;
        members.push(Member::new(email, node.role));
    }

    Ok(Team::new(slug, members))
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection<T> {
    nodes: Vec<T>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamsData {
    teams: Connection<TeamNode>,
}

#[derive(Debug, Deserialize)]
struct TeamNode {
    slug: String,
    members: Connection<MemberNode>,
}

#[derive(Debug, Deserialize)]
struct TeamMembersData {
    team: TeamMembersNode,
}

#[derive(Debug, Deserialize)]
struct TeamMembersNode {
    members: Connection<MemberNode>,
}

#[derive(Debug, Deserialize)]
struct MemberNode {
    role: Role,
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
struct UserNode {
    email: Option<String>,
}
