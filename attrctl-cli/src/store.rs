//! Attribute store
//!
//! The remote side of attribute synchronization. The trait keeps the
//! orchestration logic independent of the transport so it can be driven by
//! a mock in tests; [`AdminClient`] is the production implementation.

use async_trait::async_trait;
use attrctl_client::{AdminClient, Result};
use attrctl_core::domain::attributes::AttributeSet;
use attrctl_core::domain::resource::MatchableResource;
use attrctl_core::domain::scope::Scope;

/// Fetch/update/delete capability over the three attribute scopes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttributeStore: Send + Sync {
    /// Fetches the attributes of `resource` stored at `scope`
    ///
    /// Absence is reported as a not-found [`attrctl_client::ClientError`].
    async fn fetch(&self, scope: &Scope, resource: MatchableResource) -> Result<AttributeSet>;

    /// Replaces the value stored at the set's scope
    async fn update(&self, attributes: &AttributeSet) -> Result<()>;

    /// Removes the attributes of `resource` stored at `scope`
    async fn delete(&self, scope: &Scope, resource: MatchableResource) -> Result<()>;
}

#[async_trait]
impl AttributeStore for AdminClient {
    async fn fetch(&self, scope: &Scope, resource: MatchableResource) -> Result<AttributeSet> {
        match scope {
            Scope::Project { project } => self.fetch_project_attributes(project, resource).await,
            Scope::ProjectDomain { project, domain } => {
                self.fetch_project_domain_attributes(project, domain, resource)
                    .await
            }
            Scope::Workflow {
                project,
                domain,
                workflow,
            } => {
                self.fetch_workflow_attributes(project, domain, workflow, resource)
                    .await
            }
        }
    }

    async fn update(&self, attributes: &AttributeSet) -> Result<()> {
        let matching = attributes.attributes.clone();
        match &attributes.scope {
            Scope::Project { project } => self.update_project_attributes(project, matching).await,
            Scope::ProjectDomain { project, domain } => {
                self.update_project_domain_attributes(project, domain, matching)
                    .await
            }
            Scope::Workflow {
                project,
                domain,
                workflow,
            } => {
                self.update_workflow_attributes(project, domain, workflow, matching)
                    .await
            }
        }
    }

    async fn delete(&self, scope: &Scope, resource: MatchableResource) -> Result<()> {
        self.delete_attributes(scope, resource).await
    }
}
