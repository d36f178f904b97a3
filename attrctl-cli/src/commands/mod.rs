//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod delete;
mod get;
mod update;

use anyhow::Result;
use attrctl_core::domain::resource::MatchableResource;
use attrctl_core::domain::scope::{Scope, ScopeError};
use clap::{Args, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Update matchable attributes from an attribute file
    Update {
        resource: ResourceKind,

        #[command(flatten)]
        scope: ScopeArgs,

        /// Attribute file to apply
        #[arg(long)]
        attr_file: Option<std::path::PathBuf>,

        /// Apply without asking for confirmation
        #[arg(long)]
        force: bool,

        /// Show what would change without applying it
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the matchable attributes stored at a scope
    Get {
        resource: ResourceKind,

        #[command(flatten)]
        scope: ScopeArgs,

        /// Write the attributes to this file instead of stdout
        #[arg(long)]
        attr_file: Option<std::path::PathBuf>,

        /// Overwrite an existing attribute file
        #[arg(long)]
        force: bool,
    },
    /// Delete the matchable attributes stored at a scope
    Delete {
        resource: ResourceKind,

        #[command(flatten)]
        scope: ScopeArgs,

        /// Delete without asking for confirmation
        #[arg(long)]
        force: bool,

        /// Show what would be deleted without deleting it
        #[arg(long)]
        dry_run: bool,
    },
}

/// Matchable resource names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    #[value(name = "execution-queue-attribute")]
    ExecutionQueue,
    #[value(name = "execution-cluster-label")]
    ExecutionClusterLabel,
    #[value(name = "cluster-resource-attribute")]
    ClusterResource,
    #[value(name = "cluster-assignment")]
    ClusterAssignment,
    #[value(name = "plugin-override")]
    PluginOverride,
}

impl From<ResourceKind> for MatchableResource {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::ExecutionQueue => MatchableResource::ExecutionQueue,
            ResourceKind::ExecutionClusterLabel => MatchableResource::ExecutionClusterLabel,
            ResourceKind::ClusterResource => MatchableResource::ClusterResource,
            ResourceKind::ClusterAssignment => MatchableResource::ClusterAssignment,
            ResourceKind::PluginOverride => MatchableResource::PluginOverride,
        }
    }
}

/// Identifiers selecting the scope of a command
#[derive(Debug, Clone, Args)]
pub struct ScopeArgs {
    /// Project the attributes belong to
    #[arg(short, long, env = "ATTRCTL_PROJECT")]
    pub project: String,

    /// Domain within the project
    #[arg(short, long, env = "ATTRCTL_DOMAIN")]
    pub domain: Option<String>,

    /// Workflow within the domain
    #[arg(short, long, requires = "domain")]
    pub workflow: Option<String>,
}

impl ScopeArgs {
    /// The most specific scope named by the arguments
    pub fn scope(&self) -> Result<Scope, ScopeError> {
        Scope::from_parts(
            self.project.clone(),
            self.domain.clone(),
            self.workflow.clone(),
        )
    }
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(
    command: Commands,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        Commands::Update {
            resource,
            scope,
            attr_file,
            force,
            dry_run,
        } => {
            update::handle_update(
                config,
                cancel,
                resource.into(),
                &scope,
                attr_file.unwrap_or_default(),
                force,
                dry_run,
            )
            .await
        }
        Commands::Get {
            resource,
            scope,
            attr_file,
            force,
        } => get::handle_get(config, cancel, resource.into(), &scope, attr_file, force).await,
        Commands::Delete {
            resource,
            scope,
            force,
            dry_run,
        } => delete::handle_delete(config, cancel, resource.into(), &scope, force, dry_run).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrctl_core::domain::scope::ScopeShape;

    fn args(domain: Option<&str>, workflow: Option<&str>) -> ScopeArgs {
        ScopeArgs {
            project: "flytesnacks".to_string(),
            domain: domain.map(str::to_string),
            workflow: workflow.map(str::to_string),
        }
    }

    #[test]
    fn test_scope_args_resolve_shape() {
        assert_eq!(args(None, None).scope().unwrap().shape(), ScopeShape::Project);
        assert_eq!(
            args(Some("development"), None).scope().unwrap().shape(),
            ScopeShape::ProjectDomain
        );
        assert_eq!(
            args(Some("development"), Some("wf")).scope().unwrap().shape(),
            ScopeShape::Workflow
        );
        assert!(args(None, Some("wf")).scope().is_err());
    }

    #[test]
    fn test_resource_kind_maps_to_matchable_resource() {
        assert_eq!(
            MatchableResource::from(ResourceKind::ExecutionQueue),
            MatchableResource::ExecutionQueue
        );
        assert_eq!(
            MatchableResource::from(ResourceKind::PluginOverride),
            MatchableResource::PluginOverride
        );
    }
}
