//! Delete command handler

use anyhow::Result;
use attrctl_core::domain::resource::MatchableResource;
use colored::*;
use tokio_util::sync::CancellationToken;

use super::ScopeArgs;
use crate::config::Config;
use crate::gate::TerminalConfirm;
use crate::orchestrator::{DeleteOutcome, DeleteRequest, run_delete};

/// Delete the attributes stored at the scope named on the command line
pub async fn handle_delete(
    config: &Config,
    cancel: &CancellationToken,
    resource: MatchableResource,
    scope: &ScopeArgs,
    force: bool,
    dry_run: bool,
) -> Result<()> {
    let client = config.client()?;
    let request = DeleteRequest {
        scope: scope.scope()?,
        resource,
        force,
        dry_run,
    };

    let outcome = run_delete(&client, &mut TerminalConfirm, request, cancel).await?;

    match &outcome {
        DeleteOutcome::Deleted { .. } => {
            println!("{}", format!("✓ {}", outcome.message()).green().bold())
        }
        DeleteOutcome::Skipped { .. } | DeleteOutcome::Absent { .. } => {
            println!("{}", outcome.message().yellow())
        }
    }

    Ok(())
}
