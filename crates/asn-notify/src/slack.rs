use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::{ChannelId, ChannelResolver, DeliveryError, Dispatcher, Message, ResolutionError};

pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

/// Slack answers `ok:false` with this code when no user owns the address.
const USERS_NOT_FOUND: &str = "users_not_found";

/// Slack Web API client: user lookup by email and `chat.postMessage`.
///
/// Bot token is passed in by the caller; never logged.
#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("base_url", &self.base_url)
            .field("token", &"<REDACTED>")
            .finish()
    }
}

impl SlackClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::new_with_base_url(token, DEFAULT_SLACK_API_URL)
    }

    pub fn new_with_base_url(token: impl Into<String>, base_url: impl AsRef<str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }
}

#[async_trait::async_trait]
impl ChannelResolver for SlackClient {
    async fn resolve(&self, email: &str) -> Result<ChannelId, ResolutionError> {
        let resp = self
            .http
            .get(self.method_url("users.lookupByEmail"))
            .bearer_auth(&self.token)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|source| ResolutionError::Transport {
                email: email.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ResolutionError::Status {
                email: email.to_string(),
                status: status.as_u16(),
            });
        }

        let body: LookupResponse = resp.json().await.map_err(|source| ResolutionError::Transport {
            email: email.to_string(),
            source,
        })?;

        match (body.ok, body.user, body.error) {
            (true, Some(user), _) => {
                debug!(user_id = %user.id, "resolved slack user by email");
                Ok(ChannelId::new(user.id))
            }
            (_, _, Some(error)) if error == USERS_NOT_FOUND => Err(ResolutionError::NotFound {
                email: email.to_string(),
            }),
            (_, _, error) => Err(ResolutionError::Api {
                email: email.to_string(),
                error: error.unwrap_or_else(|| "response without user".to_string()),
            }),
        }
    }
}

#[async_trait::async_trait]
impl Dispatcher for SlackClient {
    async fn notify(&self, channel: &ChannelId, message: &Message) -> Result<(), DeliveryError> {
        let resp = self
            .http
            .post(self.method_url("chat.postMessage"))
            .bearer_auth(&self.token)
            .json(&json!({
                "channel": channel.as_str(),
                "text": message.fallback_text(),
                "blocks": message.blocks(),
            }))
            .send()
            .await
            .map_err(|source| DeliveryError::Transport {
                channel: channel.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DeliveryError::Status {
                channel: channel.to_string(),
                status: status.as_u16(),
            });
        }

        let body: PostMessageResponse =
            resp.json().await.map_err(|source| DeliveryError::Transport {
                channel: channel.to_string(),
                source,
            })?;

        if !body.ok {
            return Err(DeliveryError::Api {
                channel: channel.to_string(),
                error: body.error.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        debug!(channel = %channel, "posted message");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct LookupResponse {
    ok: bool,
    user: Option<LookupUser>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupUser {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}
