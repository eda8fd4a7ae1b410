use asn_notify::ChannelId;

/// What happened to one missing team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamOutcome {
    /// Slug is on the bypass list; nobody was contacted.
    Bypassed,
    /// Team has no members, so there is no one to notify.
    NoMembers,
    /// None of the targeted emails resolved to a chat user.
    NoRecipients {
        target: &'static str,
        attempted: usize,
    },
    /// Recipients resolved; sending disabled.
    DryRun {
        target: &'static str,
        recipients: Vec<ChannelId>,
    },
    /// Messages were dispatched.
    Notified {
        target: &'static str,
        recipients: usize,
        delivered: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamReport {
    pub slug: String,
    pub outcome: TeamOutcome,
}

/// Result of one full reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    pub registry_teams: usize,
    pub catalog_teams: usize,
    /// One entry per missing team, in registry order.
    pub teams: Vec<TeamReport>,
}

impl RunReport {
    /// Number of registry teams absent from the catalog.
    pub fn missing_count(&self) -> usize {
        self.teams.len()
    }

    pub fn missing_slugs(&self) -> Vec<&str> {
        self.teams.iter().map(|t| t.slug.as_str()).collect()
    }

    pub fn outcome(&self, slug: &str) -> Option<&TeamOutcome> {
        self.teams
            .iter()
            .find(|t| t.slug == slug)
            .map(|t| &t.outcome)
    }

    /// Teams where at least one message was delivered.
    pub fn notified_count(&self) -> usize {
        self.teams
            .iter()
            .filter(|t| matches!(t.outcome, TeamOutcome::Notified { delivered, .. } if delivered > 0))
            .count()
    }
}
