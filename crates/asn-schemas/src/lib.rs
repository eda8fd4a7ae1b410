//! asn-schemas
//!
//! Shared data model for one notifier run. Everything here is built fresh from
//! a remote fetch, never mutated afterwards, and dropped when the run ends.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Registry A: teams and their members
// ---------------------------------------------------------------------------

/// Membership role as reported by the team registry.
///
/// Unknown role strings decode to [`Role::Other`] instead of failing the fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Owner,
    Member,
    #[serde(other)]
    Other,
}

impl Role {
    pub fn is_owner(&self) -> bool {
        matches!(self, Role::Owner)
    }
}

/// A single team member. The email is both the join key towards the chat
/// platform and the notification identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub email: String,
    pub role: Role,
}

impl Member {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }
}

/// A team from the ownership registry. `members` keeps source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique, case-sensitive identifier shared by both registries.
    pub slug: String,
    pub members: Vec<Member>,
}

impl Team {
    pub fn new(slug: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            slug: slug.into(),
            members,
        }
    }

    pub fn owners(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.role.is_owner())
    }
}

// ---------------------------------------------------------------------------
// Registry B: catalog slugs
// ---------------------------------------------------------------------------

/// Deduplicated set of team slugs registered in the team catalog.
///
/// Only used for membership tests. Blank slugs are dropped on construction so
/// an empty catalog entry can never match (or shadow) a real team.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogTeams(BTreeSet<String>);

impl CatalogTeams {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Flatten the catalog's per-entry slug lists into one set.
    pub fn from_entries<E, S>(entries: E) -> Self
    where
        E: IntoIterator,
        E::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        entries.into_iter().flatten().collect()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.0.contains(slug)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CatalogTeams {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(Into::into)
                .filter(|slug| !slug.trim().is_empty())
                .collect(),
        )
    }
}
