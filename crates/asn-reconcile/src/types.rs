use asn_schemas::Team;

/// Who should hear about a missing team.
///
/// Emails keep the order in which members were listed by the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotificationTarget {
    /// At least one member has the `OWNER` role; only owners are targeted.
    Owners(Vec<String>),
    /// No owner exists, so every member is targeted instead.
    AllMembers(Vec<String>),
    /// The team has no members at all.
    Nobody,
}

impl NotificationTarget {
    pub fn emails(&self) -> &[String] {
        match self {
            NotificationTarget::Owners(emails) | NotificationTarget::AllMembers(emails) => emails,
            NotificationTarget::Nobody => &[],
        }
    }

    pub fn is_nobody(&self) -> bool {
        matches!(self, NotificationTarget::Nobody)
    }

    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationTarget::Owners(_) => "owners",
            NotificationTarget::AllMembers(_) => "all_members",
            NotificationTarget::Nobody => "nobody",
        }
    }
}

/// Result of comparing the registry against the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crosscheck {
    /// Number of teams in the registry snapshot.
    pub registry_teams: usize,
    /// Number of distinct slugs in the catalog snapshot.
    pub catalog_teams: usize,
    /// Registry teams whose slug the catalog does not know, in registry order.
    pub missing: Vec<Team>,
}

impl Crosscheck {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn missing_slugs(&self) -> Vec<&str> {
        self.missing.iter().map(|t| t.slug.as_str()).collect()
    }
}
