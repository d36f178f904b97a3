//! Get command handler

use anyhow::{Context, Result};
use attrctl_core::domain::resource::MatchableResource;
use colored::*;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use super::ScopeArgs;
use crate::config::Config;
use crate::error::UpdateError;
use crate::loader;
use crate::orchestrator::run_get;

/// Show the attributes stored at a scope
///
/// With `attr_file` the attributes are written in attribute file format, so
/// the file can be edited and fed back to `update`.
pub async fn handle_get(
    config: &Config,
    cancel: &CancellationToken,
    resource: MatchableResource,
    scope: &ScopeArgs,
    attr_file: Option<PathBuf>,
    force: bool,
) -> Result<()> {
    let client = config.client()?;
    let scope = scope.scope()?;

    let attributes = match run_get(&client, &scope, resource, cancel).await {
        Ok(attributes) => attributes,
        Err(UpdateError::Remote(e)) if e.is_not_found() => {
            anyhow::bail!("no {} attributes found for {}", resource, scope)
        }
        Err(e) => return Err(e.into()),
    };

    match attr_file {
        Some(path) => {
            loader::write(&path, &attributes, force)
                .with_context(|| format!("Failed to write attributes to {}", path.display()))?;
            println!(
                "{}",
                format!("✓ Wrote attributes from {} to {}", scope, path.display())
                    .green()
                    .bold()
            );
        }
        None => print!("{}", loader::render(&attributes)?),
    }

    Ok(())
}
