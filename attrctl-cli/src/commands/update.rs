//! Update command handler

use anyhow::Result;
use attrctl_core::domain::resource::MatchableResource;
use colored::*;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use super::ScopeArgs;
use crate::config::Config;
use crate::gate::TerminalConfirm;
use crate::orchestrator::{UpdateOutcome, UpdateRequest, run_update};

/// Apply an attribute file to the scope named on the command line
pub async fn handle_update(
    config: &Config,
    cancel: &CancellationToken,
    resource: MatchableResource,
    scope: &ScopeArgs,
    attr_file: PathBuf,
    force: bool,
    dry_run: bool,
) -> Result<()> {
    let client = config.client()?;
    let request = UpdateRequest {
        attr_file,
        scope: scope.scope()?,
        resource,
        force,
        dry_run,
    };

    let outcome = run_update(&client, &mut TerminalConfirm, request, cancel).await?;

    match &outcome {
        UpdateOutcome::Applied { .. } => {
            println!("{}", format!("✓ {}", outcome.message()).green().bold())
        }
        UpdateOutcome::Skipped { .. } => println!("{}", outcome.message().yellow()),
    }

    Ok(())
}
