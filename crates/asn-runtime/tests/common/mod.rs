//! In-memory registries and chat platform shared by the runtime scenarios.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use asn_notify::{ChannelId, ChannelResolver, DeliveryError, Dispatcher, Message, ResolutionError};
use asn_registry::{FetchError, TeamCatalog, TeamRegistry};
use asn_schemas::{CatalogTeams, Member, Role, Team};

// ---------------------------------------------------------------------------
// Registries
// ---------------------------------------------------------------------------

pub enum Source<T> {
    Ok(T),
    /// Answers with the given HTTP status.
    Status(u16),
    /// Never answers.
    Hang,
}

pub struct FakeRegistry(pub Source<Vec<Team>>);

#[async_trait::async_trait]
impl TeamRegistry for FakeRegistry {
    fn name(&self) -> &'static str {
        "fake-registry"
    }

    async fn teams_with_members(&self) -> Result<Vec<Team>, FetchError> {
        answer(self.name(), &self.0).await
    }
}

pub struct FakeCatalog(pub Source<CatalogTeams>);

#[async_trait::async_trait]
impl TeamCatalog for FakeCatalog {
    fn name(&self) -> &'static str {
        "fake-catalog"
    }

    async fn catalog_teams(&self) -> Result<CatalogTeams, FetchError> {
        answer(self.name(), &self.0).await
    }
}

async fn answer<T: Clone>(registry: &'static str, source: &Source<T>) -> Result<T, FetchError> {
    match source {
        Source::Ok(value) => Ok(value.clone()),
        Source::Status(status) => Err(FetchError::Status {
            registry,
            status: *status,
            body: "unavailable".to_string(),
        }),
        Source::Hang => std::future::pending().await,
    }
}

pub fn catalog(slugs: &[&str]) -> FakeCatalog {
    FakeCatalog(Source::Ok(slugs.iter().copied().collect()))
}

pub fn registry(teams: Vec<Team>) -> FakeRegistry {
    FakeRegistry(Source::Ok(teams))
}

pub fn team(slug: &str, members: &[(&str, Role)]) -> Team {
    Team::new(
        slug,
        members
            .iter()
            .map(|(email, role)| Member::new(*email, *role))
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Chat platform
// ---------------------------------------------------------------------------

/// Resolves emails from a fixed directory and records every delivery.
#[derive(Default)]
pub struct FakeChat {
    directory: BTreeMap<String, String>,
    broken_lookups: BTreeSet<String>,
    broken_channels: BTreeSet<String>,
    pub lookups: Mutex<Vec<String>>,
    pub sent: Mutex<Vec<(ChannelId, Message)>>,
}

impl FakeChat {
    pub fn with_users(users: &[(&str, &str)]) -> Self {
        Self {
            directory: users
                .iter()
                .map(|(email, id)| (email.to_string(), id.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// Lookups for this email fail with a platform error rather than not-found.
    pub fn break_lookup(mut self, email: &str) -> Self {
        self.broken_lookups.insert(email.to_string());
        self
    }

    pub fn break_channel(mut self, id: &str) -> Self {
        self.broken_channels.insert(id.to_string());
        self
    }

    pub fn sent_to(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.to_string())
            .collect()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ChannelResolver for FakeChat {
    async fn resolve(&self, email: &str) -> Result<ChannelId, ResolutionError> {
        self.lookups.lock().unwrap().push(email.to_string());

        if self.broken_lookups.contains(email) {
            return Err(ResolutionError::Api {
                email: email.to_string(),
                error: "ratelimited".to_string(),
            });
        }
        self.directory
            .get(email)
            .map(ChannelId::new)
            .ok_or_else(|| ResolutionError::NotFound {
                email: email.to_string(),
            })
    }
}

#[async_trait::async_trait]
impl Dispatcher for FakeChat {
    async fn notify(&self, channel: &ChannelId, message: &Message) -> Result<(), DeliveryError> {
        if self.broken_channels.contains(channel.as_str()) {
            return Err(DeliveryError::Api {
                channel: channel.to_string(),
                error: "channel_not_found".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel.clone(), message.clone()));
        Ok(())
    }
}
