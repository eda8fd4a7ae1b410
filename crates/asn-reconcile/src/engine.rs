use asn_schemas::{CatalogTeams, Team};

use crate::{Crosscheck, NotificationTarget};

/// Registry teams whose slug is not registered in the catalog.
///
/// Output keeps registry order, so identical snapshots give identical results.
pub fn missing_teams(teams: &[Team], catalog: &CatalogTeams) -> Vec<Team> {
    teams
        .iter()
        .filter(|team| !catalog.contains(&team.slug))
        .cloned()
        .collect()
}

/// Full crosscheck: counts of both sides plus the missing set.
pub fn crosscheck(teams: &[Team], catalog: &CatalogTeams) -> Crosscheck {
    Crosscheck {
        registry_teams: teams.len(),
        catalog_teams: catalog.len(),
        missing: missing_teams(teams, catalog),
    }
}

/// Owners first; fall back to every member; nobody when the team is empty.
pub fn notification_target(team: &Team) -> NotificationTarget {
    let owners: Vec<String> = team.owners().map(|m| m.email.clone()).collect();
    if !owners.is_empty() {
        return NotificationTarget::Owners(owners);
    }

    if team.members.is_empty() {
        return NotificationTarget::Nobody;
    }

    NotificationTarget::AllMembers(team.members.iter().map(|m| m.email.clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use asn_schemas::{Member, Role};

    fn team(slug: &str) -> Team {
        Team::new(slug, vec![Member::new(format!("{slug}@x"), Role::Owner)])
    }

    #[test]
    fn empty_registry_has_nothing_missing() {
        let catalog: CatalogTeams = ["a"].into_iter().collect();
        assert!(missing_teams(&[], &catalog).is_empty());
    }

    #[test]
    fn catalog_superset_has_nothing_missing() {
        let teams = vec![team("a"), team("b")];
        let catalog: CatalogTeams = ["a", "b", "c"].into_iter().collect();
        assert!(crosscheck(&teams, &catalog).is_clean());
    }

    #[test]
    fn empty_catalog_marks_every_team_missing() {
        let teams = vec![team("a"), team("b")];
        let check = crosscheck(&teams, &CatalogTeams::empty());
        assert_eq!(check.missing_slugs(), vec!["a", "b"]);
        assert_eq!(check.registry_teams, 2);
        assert_eq!(check.catalog_teams, 0);
    }

    #[test]
    fn single_owner_is_the_only_target() {
        let t = Team::new(
            "t",
            vec![
                Member::new("e1", Role::Member),
                Member::new("e2", Role::Owner),
                Member::new("e3", Role::Member),
            ],
        );
        assert_eq!(
            notification_target(&t),
            NotificationTarget::Owners(vec!["e2".to_string()])
        );
    }

    #[test]
    fn no_owner_falls_back_to_all_members_in_order() {
        let t = Team::new(
            "t",
            vec![Member::new("e1", Role::Member), Member::new("e2", Role::Other)],
        );
        let target = notification_target(&t);
        assert_eq!(target.kind(), "all_members");
        assert_eq!(target.emails(), ["e1".to_string(), "e2".to_string()]);
    }

    #[test]
    fn empty_team_targets_nobody() {
        let target = notification_target(&Team::new("t", vec![]));
        assert!(target.is_nobody());
        assert!(target.emails().is_empty());
    }
}
