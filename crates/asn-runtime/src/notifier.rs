use std::collections::BTreeSet;

use asn_config::{Config, DeliveryMode};
use asn_notify::{
    best_effort, direct_message_text, ChannelId, ChannelResolver, Dispatcher, Message,
};
use asn_reconcile::{crosscheck, notification_target, NotificationTarget};
use asn_registry::{FetchError, TeamCatalog, TeamRegistry};
use asn_schemas::Team;
use tracing::{error, info, info_span, warn, Instrument};

use crate::{RunReport, TeamOutcome, TeamReport};

/// Orchestrator choices that are not part of either registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifierOptions {
    pub delivery: DeliveryMode,
    /// Missing teams with these slugs are reported but never notified.
    pub bypass_teams: BTreeSet<String>,
}

impl NotifierOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            delivery: cfg.delivery_mode,
            bypass_teams: cfg.bypass_team_slugs(),
        }
    }
}

/// Reconciles the team registry against the team catalog and notifies the
/// owners (or members) of every team the catalog is missing.
///
/// Holds no state between runs; every [`TeamNotifier::reconcile`] call is a
/// fresh, full reconciliation.
pub struct TeamNotifier<R, C, N> {
    registry: R,
    catalog: C,
    notifier: N,
    options: NotifierOptions,
}

impl<R, C, N> TeamNotifier<R, C, N> {
    pub fn options(&self) -> &NotifierOptions {
        &self.options
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

impl<R, C, N> TeamNotifier<R, C, N>
where
    R: TeamRegistry,
    C: TeamCatalog,
    N: ChannelResolver + Dispatcher,
{
    pub fn new(registry: R, catalog: C, notifier: N, options: NotifierOptions) -> Self {
        Self {
            registry,
            catalog,
            notifier,
            options,
        }
    }

    /// One full run. Fails only when either registry fetch fails.
    pub async fn reconcile(&self) -> Result<RunReport, FetchError> {
        // Both fetches run concurrently; the first error wins and the other
        // fetch is dropped mid-flight.
        let (teams, catalog) = tokio::try_join!(
            self.registry
                .teams_with_members()
                .instrument(info_span!("fetch", client = self.registry.name())),
            self.catalog
                .catalog_teams()
                .instrument(info_span!("fetch", client = self.catalog.name())),
        )?;

        let check = crosscheck(&teams, &catalog);

        info!(
            nais_teams_count = check.registry_teams,
            team_catalog_teams_count = check.catalog_teams,
            missing_teams_count = check.missing.len(),
            "crosscheck completed"
        );

        let mut report = RunReport {
            registry_teams: check.registry_teams,
            catalog_teams: check.catalog_teams,
            teams: Vec::with_capacity(check.missing.len()),
        };

        if check.is_clean() {
            info!("no teams missing from team catalog, nothing to notify");
            return Ok(report);
        }

        for team in &check.missing {
            let outcome = self
                .notify_team(team)
                .instrument(info_span!("notify_team", team_slug = %team.slug))
                .await;
            report.teams.push(TeamReport {
                slug: team.slug.clone(),
                outcome,
            });
        }

        Ok(report)
    }

    async fn notify_team(&self, team: &Team) -> TeamOutcome {
        if self.options.bypass_teams.contains(&team.slug) {
            info!("team is on the bypass list, skipping notification");
            return TeamOutcome::Bypassed;
        }

        let target = notification_target(team);
        match &target {
            NotificationTarget::Nobody => {
                warn!("no members found for team, skipping notification");
                return TeamOutcome::NoMembers;
            }
            NotificationTarget::AllMembers(_) => {
                info!("no owners found for team, will notify all members");
            }
            NotificationTarget::Owners(_) => {}
        }

        let recipients = self.resolve_recipients(target.emails()).await;
        if recipients.is_empty() {
            warn!(
                notify_target = target.kind(),
                attempted = target.emails().len(),
                "no chat users found for notification target, skipping notification"
            );
            return TeamOutcome::NoRecipients {
                target: target.kind(),
                attempted: target.emails().len(),
            };
        }

        self.deliver(team, target.kind(), recipients).await
    }

    /// Emails that fail to resolve are logged and dropped.
    async fn resolve_recipients(&self, emails: &[String]) -> Vec<ChannelId> {
        best_effort(
            emails,
            |email| self.notifier.resolve(email),
            |email, err| {
                if err.is_not_found() {
                    warn!(email = %email, error = %err, "no chat user for email");
                } else {
                    error!(email = %email, error = %err, "failed to find chat user by email");
                }
            },
        )
        .await
    }

    async fn deliver(
        &self,
        team: &Team,
        target: &'static str,
        recipients: Vec<ChannelId>,
    ) -> TeamOutcome {
        let delivered = match self.options.delivery {
            DeliveryMode::DryRun => {
                let ids: Vec<&str> = recipients.iter().map(ChannelId::as_str).collect();
                info!(
                    notify_target = target,
                    recipients = ?ids,
                    "dry run, not sending notification"
                );
                return TeamOutcome::DryRun { target, recipients };
            }
            DeliveryMode::Blocks => {
                let message = Message::missing_from_catalog(&team.slug);
                match self.notifier.notify_all(&recipients, &message).await {
                    Ok(report) => report.delivered_count(),
                    Err(err) => {
                        error!(error = %err, "failed to notify team");
                        0
                    }
                }
            }
            DeliveryMode::Direct => self
                .notifier
                .send_direct_messages(&recipients, &direct_message_text(&team.slug))
                .await
                .delivered_count(),
        };

        if delivered == 0 {
            warn!(
                notify_target = target,
                recipients = recipients.len(),
                "no notification could be delivered"
            );
        } else {
            info!(
                notify_target = target,
                owners_notified = delivered,
                recipients = recipients.len(),
                "successfully notified team"
            );
        }

        TeamOutcome::Notified {
            target,
            recipients: recipients.len(),
            delivered,
        }
    }
}
