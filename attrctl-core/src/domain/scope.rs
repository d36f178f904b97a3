//! Scope domain types
//!
//! Attributes can be declared at three levels of specificity. The more
//! specific level wins when the platform resolves an override.

use std::fmt;
use thiserror::Error;

/// Errors raised when assembling a scope from loose identifiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// The project identifier was empty
    #[error("project is required")]
    MissingProject,

    /// A workflow was named without the domain it lives in
    #[error("workflow {0} requires a domain")]
    WorkflowWithoutDomain(String),
}

/// The level at which an attribute override is declared
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Project {
        project: String,
    },
    ProjectDomain {
        project: String,
        domain: String,
    },
    Workflow {
        project: String,
        domain: String,
        workflow: String,
    },
}

/// Identifier-free discriminant of a [`Scope`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeShape {
    Project,
    ProjectDomain,
    Workflow,
}

impl ScopeShape {
    /// Keys that carry the scope identifiers in an attribute document
    pub fn identifier_keys(&self) -> &'static [&'static str] {
        match self {
            ScopeShape::Project => &["project"],
            ScopeShape::ProjectDomain => &["project", "domain"],
            ScopeShape::Workflow => &["project", "domain", "workflow"],
        }
    }
}

impl fmt::Display for ScopeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeShape::Project => write!(f, "project"),
            ScopeShape::ProjectDomain => write!(f, "project-domain"),
            ScopeShape::Workflow => write!(f, "workflow"),
        }
    }
}

impl Scope {
    /// Build the most specific scope the given identifiers describe
    ///
    /// Empty optional identifiers are treated as absent.
    pub fn from_parts(
        project: impl Into<String>,
        domain: Option<String>,
        workflow: Option<String>,
    ) -> Result<Self, ScopeError> {
        let project = project.into();
        if project.is_empty() {
            return Err(ScopeError::MissingProject);
        }

        let domain = domain.filter(|d| !d.is_empty());
        let workflow = workflow.filter(|w| !w.is_empty());

        match (domain, workflow) {
            (None, None) => Ok(Scope::Project { project }),
            (Some(domain), None) => Ok(Scope::ProjectDomain { project, domain }),
            (Some(domain), Some(workflow)) => Ok(Scope::Workflow {
                project,
                domain,
                workflow,
            }),
            (None, Some(workflow)) => Err(ScopeError::WorkflowWithoutDomain(workflow)),
        }
    }

    pub fn shape(&self) -> ScopeShape {
        match self {
            Scope::Project { .. } => ScopeShape::Project,
            Scope::ProjectDomain { .. } => ScopeShape::ProjectDomain,
            Scope::Workflow { .. } => ScopeShape::Workflow,
        }
    }

    pub fn project(&self) -> &str {
        match self {
            Scope::Project { project }
            | Scope::ProjectDomain { project, .. }
            | Scope::Workflow { project, .. } => project,
        }
    }

    pub fn domain(&self) -> Option<&str> {
        match self {
            Scope::Project { .. } => None,
            Scope::ProjectDomain { domain, .. } | Scope::Workflow { domain, .. } => Some(domain),
        }
    }

    pub fn workflow(&self) -> Option<&str> {
        match self {
            Scope::Workflow { workflow, .. } => Some(workflow),
            _ => None,
        }
    }
}

/// Human readable description used in command output
///
/// e.g. `flytesnacks project and domain development`
impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Project { project } => write!(f, "{} project", project),
            Scope::ProjectDomain { project, domain } => {
                write!(f, "{} project and domain {}", project, domain)
            }
            Scope::Workflow {
                project,
                domain,
                workflow,
            } => write!(
                f,
                "{} project and domain {} and workflow {}",
                project, domain, workflow
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_picks_most_specific_scope() {
        let scope = Scope::from_parts("flytesnacks", None, None).unwrap();
        assert_eq!(scope.shape(), ScopeShape::Project);

        let scope =
            Scope::from_parts("flytesnacks", Some("development".to_string()), None).unwrap();
        assert_eq!(scope.shape(), ScopeShape::ProjectDomain);
        assert_eq!(scope.domain(), Some("development"));

        let scope = Scope::from_parts(
            "flytesnacks",
            Some("development".to_string()),
            Some("core.control_flow.merge_sort.merge_sort".to_string()),
        )
        .unwrap();
        assert_eq!(scope.shape(), ScopeShape::Workflow);
        assert_eq!(
            scope.workflow(),
            Some("core.control_flow.merge_sort.merge_sort")
        );
    }

    #[test]
    fn test_from_parts_treats_empty_identifiers_as_absent() {
        let scope = Scope::from_parts("flytesnacks", Some(String::new()), None).unwrap();
        assert_eq!(scope.shape(), ScopeShape::Project);
    }

    #[test]
    fn test_from_parts_rejects_invalid_combinations() {
        assert_eq!(
            Scope::from_parts("", None, None),
            Err(ScopeError::MissingProject)
        );
        assert_eq!(
            Scope::from_parts("flytesnacks", None, Some("wf".to_string())),
            Err(ScopeError::WorkflowWithoutDomain("wf".to_string()))
        );
    }

    #[test]
    fn test_display_names_every_identifier() {
        let project = Scope::Project {
            project: "flytesnacks".to_string(),
        };
        assert_eq!(project.to_string(), "flytesnacks project");

        let domain = Scope::ProjectDomain {
            project: "flytesnacks".to_string(),
            domain: "development".to_string(),
        };
        assert_eq!(
            domain.to_string(),
            "flytesnacks project and domain development"
        );

        let workflow = Scope::Workflow {
            project: "flytesnacks".to_string(),
            domain: "development".to_string(),
            workflow: "core.control_flow.merge_sort.merge_sort".to_string(),
        };
        assert!(
            workflow
                .to_string()
                .starts_with("flytesnacks project and domain development")
        );
        assert!(
            workflow
                .to_string()
                .ends_with("workflow core.control_flow.merge_sort.merge_sort")
        );
    }
}
