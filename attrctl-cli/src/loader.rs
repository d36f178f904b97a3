//! Attribute file loading
//!
//! An attribute file is a YAML (or JSON) document holding the scope
//! identifiers next to the payload of one matchable resource:
//!
//! ```yaml
//! project: flytesnacks
//! domain: development
//! tags:
//!   - foo
//!   - bar
//! ```
//!
//! Decoding is strict. The identifier keys must be exactly those of the
//! expected scope shape and every other key must belong to the resource
//! payload, so a stray `domain` in a project-level file is rejected.

use attrctl_core::domain::attributes::AttributeSet;
use attrctl_core::domain::resource::{MatchableResource, MatchingAttributes};
use attrctl_core::domain::scope::{Scope, ScopeShape};
use serde::de::Error as _;
use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::debug;

use crate::error::UpdateError;

/// Load the attribute file at `path` for a scope of the given shape
pub fn load(
    path: &Path,
    shape: ScopeShape,
    resource: MatchableResource,
) -> Result<AttributeSet, UpdateError> {
    if path.as_os_str().is_empty() {
        return Err(UpdateError::Validation("attrFile is mandatory".to_string()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| UpdateError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let set = decode(&content, shape, resource).map_err(|source| UpdateError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loaded {} attributes for {} from {}", resource, set.scope, path.display());
    Ok(set)
}

/// Decode an attribute document
pub fn decode(
    content: &str,
    shape: ScopeShape,
    resource: MatchableResource,
) -> Result<AttributeSet, serde_yaml::Error> {
    let mut document: Mapping = serde_yaml::from_str(content)?;

    let project = take_identifier(&mut document, "project")?;
    let domain = match shape {
        ScopeShape::Project => None,
        _ => take_identifier(&mut document, "domain")?,
    };
    let workflow = match shape {
        ScopeShape::Workflow => take_identifier(&mut document, "workflow")?,
        _ => None,
    };

    // Unknown keys are reported before missing identifiers, so a misspelled
    // identifier is named instead of being reported as absent.
    let attributes = MatchingAttributes::deserialize_payload(resource, Value::Mapping(document))?;

    let scope = match shape {
        ScopeShape::Project => Scope::Project {
            project: required(project, "project")?,
        },
        ScopeShape::ProjectDomain => Scope::ProjectDomain {
            project: required(project, "project")?,
            domain: required(domain, "domain")?,
        },
        ScopeShape::Workflow => Scope::Workflow {
            project: required(project, "project")?,
            domain: required(domain, "domain")?,
            workflow: required(workflow, "workflow")?,
        },
    };

    Ok(AttributeSet::new(scope, attributes))
}

/// Render an attribute set in the attribute file format
pub fn render(set: &AttributeSet) -> Result<String, serde_yaml::Error> {
    let mut document = Mapping::new();
    for key in set.scope.shape().identifier_keys() {
        let value = match *key {
            "project" => Some(set.scope.project()),
            "domain" => set.scope.domain(),
            _ => set.scope.workflow(),
        };
        if let Some(value) = value {
            document.insert(Value::from(*key), Value::from(value));
        }
    }

    if let Value::Mapping(payload) = serde_yaml::to_value(Payload(&set.attributes))? {
        document.extend(payload);
    }

    serde_yaml::to_string(&document)
}

/// Write an attribute set to `path`, refusing to clobber unless `overwrite`
pub fn write(path: &Path, set: &AttributeSet, overwrite: bool) -> Result<(), UpdateError> {
    if path.exists() && !overwrite {
        return Err(UpdateError::Validation(format!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        )));
    }

    let content = render(set).map_err(|source| UpdateError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    std::fs::write(path, content).map_err(|source| UpdateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Removes `key` from the document if present
fn take_identifier(
    document: &mut Mapping,
    key: &'static str,
) -> Result<Option<String>, serde_yaml::Error> {
    match document.remove(key) {
        Some(Value::String(value)) if !value.is_empty() => Ok(Some(value)),
        Some(Value::String(_)) => Err(serde_yaml::Error::custom(format!(
            "field `{}` must not be empty",
            key
        ))),
        Some(_) => Err(serde_yaml::Error::custom(format!(
            "field `{}` must be a string",
            key
        ))),
        None => Ok(None),
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, serde_yaml::Error> {
    value.ok_or_else(|| serde_yaml::Error::missing_field(key))
}

/// Serializes the payload without its variant tag
struct Payload<'a>(&'a MatchingAttributes);

impl Serialize for Payload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize_payload(serializer)
    }
}
