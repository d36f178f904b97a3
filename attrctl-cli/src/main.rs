//! attrctl
//!
//! Command-line interface for managing matchable attributes on the admin
//! service at project, project-domain and workflow scope.

mod commands;
mod config;
mod diff;
mod error;
mod gate;
mod loader;
mod orchestrator;
mod store;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "attrctl")]
#[command(about = "Matchable attribute management CLI", long_about = None)]
struct Cli {
    /// Admin service URL
    #[arg(long, env = "ATTRCTL_ADMIN_URL", default_value = "http://localhost:8088")]
    admin_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "ATTRCTL_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attrctl=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(cli.admin_url).with_timeout(Duration::from_secs(cli.timeout));
    config.validate()?;
    debug!(admin_url = %config.admin_url, "Configuration loaded");

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            signal_token.cancel();
        }
    });

    handle_command(cli.command, &config, &cancel).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_update_at_workflow_scope() {
        let cli = Cli::try_parse_from([
            "attrctl",
            "update",
            "execution-queue-attribute",
            "--project",
            "flytesnacks",
            "--domain",
            "development",
            "--workflow",
            "core.control_flow.merge_sort",
            "--attr-file",
            "era.yaml",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Update {
                resource,
                scope,
                attr_file,
                force,
                dry_run,
            } => {
                assert_eq!(resource, commands::ResourceKind::ExecutionQueue);
                assert_eq!(scope.workflow.as_deref(), Some("core.control_flow.merge_sort"));
                assert_eq!(attr_file.unwrap().to_str(), Some("era.yaml"));
                assert!(!force);
                assert!(dry_run);
            }
            _ => panic!("expected update command"),
        }
    }

    #[test]
    fn test_rejects_unknown_resource() {
        let result = Cli::try_parse_from([
            "attrctl",
            "update",
            "task-resource-attribute",
            "--project",
            "flytesnacks",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_timeout_flag_overrides_default() {
        let cli = Cli::try_parse_from([
            "attrctl",
            "--timeout",
            "5",
            "delete",
            "plugin-override",
            "--project",
            "flytesnacks",
            "--force",
        ])
        .unwrap();
        assert_eq!(cli.timeout, 5);
    }
}
