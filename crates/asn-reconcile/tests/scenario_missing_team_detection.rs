use asn_reconcile::*;
use asn_schemas::{CatalogTeams, Member, Role, Team};

fn registry() -> Vec<Team> {
    vec![
        Team::new("team-x", vec![Member::new("bob@x", Role::Owner)]),
        Team::new("team-y", vec![Member::new("al@x", Role::Member)]),
    ]
}

#[test]
fn scenario_team_absent_from_catalog_is_reported_with_owner_target() {
    let catalog: CatalogTeams = ["team-y"].into_iter().collect();

    let check = crosscheck(&registry(), &catalog);
    assert_eq!(check.missing_slugs(), vec!["team-x"]);

    let target = notification_target(&check.missing[0]);
    assert_eq!(target, NotificationTarget::Owners(vec!["bob@x".to_string()]));
}

#[test]
fn scenario_crosscheck_is_idempotent_for_identical_snapshots() {
    let catalog: CatalogTeams = ["team-y"].into_iter().collect();

    let first = crosscheck(&registry(), &catalog);
    let second = crosscheck(&registry(), &catalog);

    assert_eq!(first, second);
    let targets_first: Vec<_> = first.missing.iter().map(notification_target).collect();
    let targets_second: Vec<_> = second.missing.iter().map(notification_target).collect();
    assert_eq!(targets_first, targets_second);
}

#[test]
fn scenario_slug_match_is_exact() {
    let catalog: CatalogTeams = ["TEAM-X", "team-y "].into_iter().collect();

    let check = crosscheck(&registry(), &catalog);
    assert_eq!(check.missing_slugs(), vec!["team-x", "team-y"]);
}
