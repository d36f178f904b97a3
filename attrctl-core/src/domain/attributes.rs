//! Attribute set domain type

use super::resource::{MatchableResource, MatchingAttributes};
use super::scope::Scope;

/// The override value of one matchable resource at one scope
///
/// Shared between the CLI (loads it from a file) and the admin client
/// (fetches and updates it remotely).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSet {
    pub scope: Scope,
    pub attributes: MatchingAttributes,
}

impl AttributeSet {
    pub fn new(scope: Scope, attributes: MatchingAttributes) -> Self {
        Self { scope, attributes }
    }

    pub fn resource(&self) -> MatchableResource {
        self.attributes.resource()
    }
}
