//! Attribute-related API endpoints

use crate::AdminClient;
use crate::error::{ClientError, Result};
use attrctl_core::domain::attributes::AttributeSet;
use attrctl_core::domain::resource::{MatchableResource, MatchingAttributes};
use attrctl_core::domain::scope::Scope;
use attrctl_core::dto::attributes::{AttributesEnvelope, DeleteAttributes, WireAttributes};
use reqwest::Url;

impl AdminClient {
    // =============================================================================
    // Project Attributes
    // =============================================================================

    /// Fetch the attributes of `resource` declared for a whole project
    pub async fn fetch_project_attributes(
        &self,
        project: &str,
        resource: MatchableResource,
    ) -> Result<AttributeSet> {
        let scope = Scope::Project {
            project: project.to_string(),
        };
        self.fetch_attributes(&scope, resource).await
    }

    /// Replace the attributes declared for a whole project
    pub async fn update_project_attributes(
        &self,
        project: &str,
        attributes: MatchingAttributes,
    ) -> Result<()> {
        let scope = Scope::Project {
            project: project.to_string(),
        };
        self.update_attributes(&AttributeSet::new(scope, attributes))
            .await
    }

    // =============================================================================
    // Project + Domain Attributes
    // =============================================================================

    /// Fetch the attributes of `resource` declared for a project domain
    pub async fn fetch_project_domain_attributes(
        &self,
        project: &str,
        domain: &str,
        resource: MatchableResource,
    ) -> Result<AttributeSet> {
        let scope = Scope::ProjectDomain {
            project: project.to_string(),
            domain: domain.to_string(),
        };
        self.fetch_attributes(&scope, resource).await
    }

    /// Replace the attributes declared for a project domain
    pub async fn update_project_domain_attributes(
        &self,
        project: &str,
        domain: &str,
        attributes: MatchingAttributes,
    ) -> Result<()> {
        let scope = Scope::ProjectDomain {
            project: project.to_string(),
            domain: domain.to_string(),
        };
        self.update_attributes(&AttributeSet::new(scope, attributes))
            .await
    }

    // =============================================================================
    // Workflow Attributes
    // =============================================================================

    /// Fetch the attributes of `resource` declared for a single workflow
    pub async fn fetch_workflow_attributes(
        &self,
        project: &str,
        domain: &str,
        workflow: &str,
        resource: MatchableResource,
    ) -> Result<AttributeSet> {
        let scope = Scope::Workflow {
            project: project.to_string(),
            domain: domain.to_string(),
            workflow: workflow.to_string(),
        };
        self.fetch_attributes(&scope, resource).await
    }

    /// Replace the attributes declared for a single workflow
    pub async fn update_workflow_attributes(
        &self,
        project: &str,
        domain: &str,
        workflow: &str,
        attributes: MatchingAttributes,
    ) -> Result<()> {
        let scope = Scope::Workflow {
            project: project.to_string(),
            domain: domain.to_string(),
            workflow: workflow.to_string(),
        };
        self.update_attributes(&AttributeSet::new(scope, attributes))
            .await
    }

    // =============================================================================
    // Scope-generic
    // =============================================================================

    /// Fetch the attributes of `resource` at `scope`
    ///
    /// Returns [`ClientError::NotFound`] when nothing is stored there.
    pub async fn fetch_attributes(
        &self,
        scope: &Scope,
        resource: MatchableResource,
    ) -> Result<AttributeSet> {
        let url = self.attributes_url(scope)?;
        tracing::debug!("GET {} resource_type={}", url, resource);

        let response = self
            .client
            .get(url)
            .query(&[("resource_type", resource.as_str())])
            .send()
            .await?;

        let envelope: AttributesEnvelope = self.handle_response(response).await?;
        AttributeSet::try_from(envelope.attributes).map_err(|e| {
            ClientError::ParseError(format!("Invalid attributes returned for {}: {}", scope, e))
        })
    }

    /// Replace the attributes stored at the set's scope
    pub async fn update_attributes(&self, attributes: &AttributeSet) -> Result<()> {
        let url = self.attributes_url(&attributes.scope)?;
        tracing::debug!("PUT {} resource_type={}", url, attributes.resource());

        let body = AttributesEnvelope {
            attributes: WireAttributes::from(attributes),
        };
        let response = self.client.put(url).json(&body).send().await?;

        self.handle_empty_response(response).await
    }

    /// Delete the attributes of `resource` at `scope`
    pub async fn delete_attributes(
        &self,
        scope: &Scope,
        resource: MatchableResource,
    ) -> Result<()> {
        let url = self.attributes_url(scope)?;
        tracing::debug!("DELETE {} resource_type={}", url, resource);

        let response = self
            .client
            .delete(url)
            .json(&DeleteAttributes::new(scope, resource))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Endpoint for `scope`, identifiers percent-encoded as path segments
    pub(crate) fn attributes_url(&self, scope: &Scope) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidRequest(format!("invalid admin URL {}: {}", self.base_url, e))
        })?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ClientError::InvalidRequest(format!("{} cannot be a base URL", self.base_url))
            })?;
            segments.pop_if_empty().extend(["api", "v1"]);

            match scope {
                Scope::Project { project } => {
                    segments.extend(["project_attributes", project.as_str()]);
                }
                Scope::ProjectDomain { project, domain } => {
                    segments.extend([
                        "project_domain_attributes",
                        project.as_str(),
                        domain.as_str(),
                    ]);
                }
                Scope::Workflow {
                    project,
                    domain,
                    workflow,
                } => {
                    segments.extend([
                        "workflow_attributes",
                        project.as_str(),
                        domain.as_str(),
                        workflow.as_str(),
                    ]);
                }
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrctl_core::domain::resource::ExecutionQueueAttributes;
    use axum::Json;
    use axum::Router;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use tokio::sync::mpsc;

    const WORKFLOW: &str = "core.control_flow.merge_sort.merge_sort";

    fn workflow_scope() -> Scope {
        Scope::Workflow {
            project: "flytesnacks".to_string(),
            domain: "development".to_string(),
            workflow: WORKFLOW.to_string(),
        }
    }

    /// Serves `router` on an ephemeral local port and returns its base URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_attributes_url_per_scope() {
        let client = AdminClient::new("http://localhost:8088/");

        let project = Scope::Project {
            project: "flytesnacks".to_string(),
        };
        assert_eq!(
            client.attributes_url(&project).unwrap().as_str(),
            "http://localhost:8088/api/v1/project_attributes/flytesnacks"
        );

        let domain = Scope::ProjectDomain {
            project: "flytesnacks".to_string(),
            domain: "development".to_string(),
        };
        assert_eq!(
            client.attributes_url(&domain).unwrap().as_str(),
            "http://localhost:8088/api/v1/project_domain_attributes/flytesnacks/development"
        );

        assert_eq!(
            client.attributes_url(&workflow_scope()).unwrap().as_str(),
            "http://localhost:8088/api/v1/workflow_attributes/flytesnacks/development/core.control_flow.merge_sort.merge_sort"
        );
    }

    #[test]
    fn test_attributes_url_encodes_identifiers() {
        let client = AdminClient::new("http://localhost:8088");
        let scope = Scope::ProjectDomain {
            project: "team/a".to_string(),
            domain: "dev?x#y".to_string(),
        };

        let url = client.attributes_url(&scope).unwrap();
        assert_eq!(
            url.path(),
            "/api/v1/project_domain_attributes/team%2Fa/dev%3Fx%23y"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_attributes_url_keeps_base_path() {
        let client = AdminClient::new("http://localhost:8088/admin");
        let scope = Scope::Project {
            project: "flytesnacks".to_string(),
        };
        assert_eq!(
            client.attributes_url(&scope).unwrap().path(),
            "/admin/api/v1/project_attributes/flytesnacks"
        );
    }

    #[test]
    fn test_attributes_url_rejects_invalid_base() {
        let client = AdminClient::new("not a url");
        let scope = Scope::Project {
            project: "flytesnacks".to_string(),
        };
        assert!(matches!(
            client.attributes_url(&scope),
            Err(ClientError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_decodes_envelope() {
        let router = Router::new().route(
            "/api/v1/project_domain_attributes/{project}/{domain}",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("resource_type").map(String::as_str) != Some("EXECUTION_QUEUE") {
                    return (StatusCode::BAD_REQUEST, Json(json!({})));
                }
                (
                    StatusCode::OK,
                    Json(json!({
                        "attributes": {
                            "project": "flytesnacks",
                            "domain": "development",
                            "matching_attributes": {
                                "execution_queue_attributes": { "tags": ["foo", "bar"] }
                            }
                        }
                    })),
                )
            }),
        );
        let client = AdminClient::new(serve(router).await);

        let set = client
            .fetch_project_domain_attributes(
                "flytesnacks",
                "development",
                MatchableResource::ExecutionQueue,
            )
            .await
            .unwrap();

        assert_eq!(set.scope.domain(), Some("development"));
        assert_eq!(
            set.attributes,
            MatchingAttributes::ExecutionQueueAttributes(ExecutionQueueAttributes {
                tags: vec!["foo".to_string(), "bar".to_string()],
            })
        );
    }

    #[tokio::test]
    async fn test_fetch_maps_404_to_not_found() {
        let router = Router::new().route(
            "/api/v1/project_attributes/{project}",
            get(|| async { (StatusCode::NOT_FOUND, "no attributes") }),
        );
        let client = AdminClient::new(serve(router).await);

        let err = client
            .fetch_project_attributes("flytesnacks", MatchableResource::ExecutionQueue)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_surfaces_server_errors() {
        let router = Router::new().route(
            "/api/v1/project_attributes/{project}",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "unavailable") }),
        );
        let client = AdminClient::new(serve(router).await);

        let err = client
            .fetch_project_attributes("flytesnacks", MatchableResource::ExecutionQueue)
            .await
            .unwrap_err();

        assert!(!err.is_not_found());
        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "unavailable");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_sends_attributes_envelope() {
        let (tx, mut rx) = mpsc::unbounded_channel::<Value>();
        let router = Router::new().route(
            "/api/v1/workflow_attributes/{project}/{domain}/{workflow}",
            axum::routing::put(move |Json(body): Json<Value>| {
                let tx = tx.clone();
                async move {
                    tx.send(body).unwrap();
                    StatusCode::OK
                }
            }),
        );
        let client = AdminClient::new(serve(router).await);

        client
            .update_workflow_attributes(
                "flytesnacks",
                "development",
                WORKFLOW,
                MatchingAttributes::ExecutionQueueAttributes(ExecutionQueueAttributes {
                    tags: vec!["foo".to_string()],
                }),
            )
            .await
            .unwrap();

        let body = rx.recv().await.unwrap();
        assert_eq!(
            body,
            json!({
                "attributes": {
                    "project": "flytesnacks",
                    "domain": "development",
                    "workflow": WORKFLOW,
                    "matching_attributes": {
                        "execution_queue_attributes": { "tags": ["foo"] }
                    }
                }
            })
        );
    }

    #[tokio::test]
    async fn test_delete_reports_missing_attributes() {
        let router = Router::new().route(
            "/api/v1/project_attributes/{project}",
            axum::routing::delete(|| async { StatusCode::NOT_FOUND }),
        );
        let client = AdminClient::new(serve(router).await);
        let scope = Scope::Project {
            project: "flytesnacks".to_string(),
        };

        let err = client
            .delete_attributes(&scope, MatchableResource::ExecutionQueue)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
