//! Attribute update protocol
//!
//! Reconciles an attribute file against the admin service:
//!
//! 1. load and validate the file (no remote calls on failure)
//! 2. fetch the stored baseline (not-found means an empty baseline)
//! 3. run the confirmation gate (dry run, force, or ask)
//! 4. apply the loaded set with exactly one update call
//! 5. report the scope that was updated
//!
//! The same functions serve every scope; the [`Scope`] carried by the
//! request selects the endpoints and the wording of the report.

use attrctl_core::domain::attributes::AttributeSet;
use attrctl_core::domain::resource::MatchableResource;
use attrctl_core::domain::scope::Scope;
use std::future::Future;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::diff::AttributeDiff;
use crate::error::UpdateError;
use crate::gate::{self, ConfirmCallback, GateDecision};
use crate::loader;
use crate::store::AttributeStore;

/// A single update invocation
///
/// Built fresh from the command line and consumed by one run.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub attr_file: PathBuf,
    pub scope: Scope,
    pub resource: MatchableResource,
    pub force: bool,
    pub dry_run: bool,
}

/// Successful end states of an update run
#[derive(Debug)]
pub enum UpdateOutcome {
    /// The loaded attributes were written
    Applied { scope: Scope, diff: AttributeDiff },
    /// Dry run, nothing was written
    Skipped { scope: Scope, diff: AttributeDiff },
}

impl UpdateOutcome {
    pub fn message(&self) -> String {
        match self {
            UpdateOutcome::Applied { scope, .. } => format!("Updated attributes from {}", scope),
            UpdateOutcome::Skipped { scope, .. } => {
                format!("Dry run: would update attributes from {}", scope)
            }
        }
    }
}

/// Run the update protocol for one request
pub async fn run_update<S>(
    store: &S,
    confirm: &mut dyn ConfirmCallback,
    request: UpdateRequest,
    cancel: &CancellationToken,
) -> Result<UpdateOutcome, UpdateError>
where
    S: AttributeStore + ?Sized,
{
    let UpdateRequest {
        attr_file,
        scope,
        resource,
        force,
        dry_run,
    } = request;

    let desired = loader::load(&attr_file, scope.shape(), resource)?;
    if desired.scope != scope {
        return Err(UpdateError::Validation(format!(
            "{} declares attributes for {} but the command targets {}",
            attr_file.display(),
            desired.scope,
            scope
        )));
    }

    ensure_live(cancel)?;
    let baseline = match until_cancelled(cancel, store.fetch(&scope, resource)).await? {
        Ok(existing) => Some(existing),
        Err(e) if e.is_not_found() => {
            debug!("No {} attributes stored for {}, starting from empty", resource, scope);
            None
        }
        Err(e) => return Err(e.into()),
    };

    let diff = AttributeDiff::between(baseline.as_ref(), &desired).map_err(|source| {
        UpdateError::Render {
            scope: scope.clone(),
            source,
        }
    })?;
    diff.print();

    let prompt = format!("Are you sure you want to update attributes from {}?", scope);
    match gated(cancel, dry_run, force, confirm, &prompt)? {
        GateDecision::Skip => {
            info!("Dry run: skipping update of {} attributes for {}", resource, scope);
            return Ok(UpdateOutcome::Skipped { scope, diff });
        }
        GateDecision::Abort => return Err(UpdateError::AbortedByUser { action: "update" }),
        GateDecision::Proceed => {}
    }

    until_cancelled(cancel, store.update(&desired)).await??;
    info!("Updated {} attributes for {}", resource, scope);

    Ok(UpdateOutcome::Applied { scope, diff })
}

/// A single delete invocation
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub scope: Scope,
    pub resource: MatchableResource,
    pub force: bool,
    pub dry_run: bool,
}

/// Successful end states of a delete run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { scope: Scope },
    Skipped { scope: Scope },
    /// Nothing was stored at the scope
    Absent { scope: Scope },
}

impl DeleteOutcome {
    pub fn message(&self) -> String {
        match self {
            DeleteOutcome::Deleted { scope } => format!("Deleted attributes from {}", scope),
            DeleteOutcome::Skipped { scope } => {
                format!("Dry run: would delete attributes from {}", scope)
            }
            DeleteOutcome::Absent { scope } => format!("No attributes to delete from {}", scope),
        }
    }
}

/// Run the delete protocol: gate, then at most one delete call
pub async fn run_delete<S>(
    store: &S,
    confirm: &mut dyn ConfirmCallback,
    request: DeleteRequest,
    cancel: &CancellationToken,
) -> Result<DeleteOutcome, UpdateError>
where
    S: AttributeStore + ?Sized,
{
    let DeleteRequest {
        scope,
        resource,
        force,
        dry_run,
    } = request;

    let prompt = format!("Are you sure you want to delete attributes from {}?", scope);
    match gated(cancel, dry_run, force, confirm, &prompt)? {
        GateDecision::Skip => return Ok(DeleteOutcome::Skipped { scope }),
        GateDecision::Abort => return Err(UpdateError::AbortedByUser { action: "delete" }),
        GateDecision::Proceed => {}
    }

    match until_cancelled(cancel, store.delete(&scope, resource)).await? {
        Ok(()) => {
            info!("Deleted {} attributes for {}", resource, scope);
            Ok(DeleteOutcome::Deleted { scope })
        }
        Err(e) if e.is_not_found() => Ok(DeleteOutcome::Absent { scope }),
        Err(e) => Err(e.into()),
    }
}

/// Fetch the attributes stored at `scope`
pub async fn run_get<S>(
    store: &S,
    scope: &Scope,
    resource: MatchableResource,
    cancel: &CancellationToken,
) -> Result<AttributeSet, UpdateError>
where
    S: AttributeStore + ?Sized,
{
    ensure_live(cancel)?;
    Ok(until_cancelled(cancel, store.fetch(scope, resource)).await??)
}

/// Fails with [`UpdateError::Cancelled`] once the token has fired
///
/// Checked before issuing a remote call, since the call is started as soon
/// as its future is built.
fn ensure_live(cancel: &CancellationToken) -> Result<(), UpdateError> {
    if cancel.is_cancelled() {
        Err(UpdateError::Cancelled)
    } else {
        Ok(())
    }
}

/// Evaluate the gate, honoring cancellation on both sides of the prompt
///
/// The prompt blocks on the terminal, so it cannot be raced. A token that
/// fires while the operator is answering still wins over the answer.
fn gated(
    cancel: &CancellationToken,
    dry_run: bool,
    force: bool,
    confirm: &mut dyn ConfirmCallback,
    prompt: &str,
) -> Result<GateDecision, UpdateError> {
    ensure_live(cancel)?;
    let decision = gate::decide(dry_run, force, confirm, prompt).map_err(UpdateError::Prompt)?;
    ensure_live(cancel)?;
    Ok(decision)
}

/// Race a remote call against cancellation
async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    call: F,
) -> Result<F::Output, UpdateError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(UpdateError::Cancelled),
        output = call => Ok(output),
    }
}
