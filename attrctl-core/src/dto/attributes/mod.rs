//! Attribute DTOs for the admin API

use serde::{Deserialize, Serialize};

use crate::domain::attributes::AttributeSet;
use crate::domain::resource::{MatchableResource, MatchingAttributes};
use crate::domain::scope::{Scope, ScopeError};

/// Attributes as carried on the wire, identifiers flattened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireAttributes {
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,
    pub matching_attributes: MatchingAttributes,
}

/// Body of a get response and of an update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributesEnvelope {
    pub attributes: WireAttributes,
}

/// Request to delete the attributes of one resource at one scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAttributes {
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,
    pub resource_type: MatchableResource,
}

impl DeleteAttributes {
    pub fn new(scope: &Scope, resource: MatchableResource) -> Self {
        Self {
            project: scope.project().to_string(),
            domain: scope.domain().map(str::to_string),
            workflow: scope.workflow().map(str::to_string),
            resource_type: resource,
        }
    }
}

impl From<&AttributeSet> for WireAttributes {
    fn from(set: &AttributeSet) -> Self {
        Self {
            project: set.scope.project().to_string(),
            domain: set.scope.domain().map(str::to_string),
            workflow: set.scope.workflow().map(str::to_string),
            matching_attributes: set.attributes.clone(),
        }
    }
}

impl TryFrom<WireAttributes> for AttributeSet {
    type Error = ScopeError;

    fn try_from(wire: WireAttributes) -> Result<Self, Self::Error> {
        let scope = Scope::from_parts(wire.project, wire.domain, wire.workflow)?;
        Ok(AttributeSet::new(scope, wire.matching_attributes))
    }
}
