use std::process::ExitCode;

use asn_config::exit::Exit;
use asn_config::{env_file, Config};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "appsec-notifiers")]
#[command(about = "AppSec notifiers: reconcile team registries and nudge team owners", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Notify owners of Nais teams that are missing from the team catalog
    NaisTeams {
        /// Delivery mode (blocks | direct | dry-run); overrides NOTIFY_MODE
        #[arg(long)]
        mode: Option<String>,

        /// Resolve recipients but send nothing (same as --mode dry-run)
        #[arg(long, default_value_t = false, conflicts_with = "mode")]
        dry_run: bool,
    },

    /// Resolve configuration and print it with secrets redacted
    CheckConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The logger is not up yet; bootstrap failures go straight to stderr.
    match env_file::load() {
        Ok(Some(path)) => eprintln!("loaded env file {}", path.display()),
        Ok(None) => {}
        Err(err) => {
            eprintln!("{err:#}");
            return Exit::EnvFileError.into();
        }
    }

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{err:#}");
            return Exit::ConfigError.into();
        }
    };

    let exit = match cli.cmd {
        Commands::CheckConfig => commands::check_config(&cfg),
        Commands::NaisTeams { mode, dry_run } => {
            commands::nais_teams::run(cfg, mode.as_deref(), dry_run).await
        }
    };
    exit.into()
}
