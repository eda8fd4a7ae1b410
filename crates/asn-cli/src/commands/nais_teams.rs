use std::future::Future;
use std::io;

use asn_config::exit::Exit;
use asn_config::{logging, Config};
use asn_notify::SlackClient;
use asn_registry::{NaisApiClient, TeamCatalogClient};
use asn_runtime::{NotifierOptions, TeamNotifier};
use tracing::{error, info, warn};

use super::resolve_delivery_mode;

pub async fn run(cfg: Config, mode: Option<&str>, dry_run: bool) -> Exit {
    let delivery = match resolve_delivery_mode(cfg.delivery_mode, mode, dry_run) {
        Ok(delivery) => delivery,
        Err(err) => {
            eprintln!("{err:#}");
            return Exit::ConfigError;
        }
    };

    if let Err(err) = logging::init(&cfg.log_format, &cfg.log_level) {
        eprintln!("{err:#}");
        return Exit::LoggerError;
    }

    let options = NotifierOptions {
        delivery,
        ..NotifierOptions::from_config(&cfg)
    };

    info!(
        delivery_mode = delivery.as_str(),
        bypass_teams_count = options.bypass_teams.len(),
        "starting nais team notifier"
    );

    let engine = TeamNotifier::new(
        NaisApiClient::new(&cfg.nais_api_endpoint, &cfg.nais_api_token),
        TeamCatalogClient::new(&cfg.team_catalog_endpoint),
        SlackClient::new(&cfg.slack_token),
        options,
    );

    tokio::select! {
        res = engine.reconcile() => match res {
            Ok(report) => {
                info!(
                    missing_teams_count = report.missing_count(),
                    notified_teams_count = report.notified_count(),
                    "nais team notifier finished"
                );
                Exit::Success
            }
            Err(err) => {
                error!(registry = err.registry(), error = %err, "reconciliation failed");
                Exit::RunError
            }
        },
        () = interrupted(tokio::signal::ctrl_c()) => {
            warn!("interrupted, abandoning run");
            Exit::RunError
        }
    }
}

/// Resolves once the signal fires. If the handler cannot be installed the run
/// is left alone: this never resolves.
async fn interrupted<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(err) = signal.await {
        warn!(error = %err, "cannot listen for ctrl-c, run continues without it");
        std::future::pending::<()>().await;
    }
}
