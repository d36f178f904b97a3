//! Matchable resource domain types
//!
//! A matchable resource is a category of platform override that can be
//! customized outside of workflow definitions. Each category has its own
//! payload shape; [`MatchingAttributes`] holds exactly one of them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Category of override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchableResource {
    ClusterResource,
    ExecutionQueue,
    ExecutionClusterLabel,
    PluginOverride,
    ClusterAssignment,
}

impl MatchableResource {
    /// Name used by the admin API (`resource_type` query parameter)
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchableResource::ClusterResource => "CLUSTER_RESOURCE",
            MatchableResource::ExecutionQueue => "EXECUTION_QUEUE",
            MatchableResource::ExecutionClusterLabel => "EXECUTION_CLUSTER_LABEL",
            MatchableResource::PluginOverride => "PLUGIN_OVERRIDE",
            MatchableResource::ClusterAssignment => "CLUSTER_ASSIGNMENT",
        }
    }
}

impl fmt::Display for MatchableResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution queue routing tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionQueueAttributes {
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Label used to pick the execution cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionClusterLabel {
    #[serde(default)]
    pub value: String,
}

/// Template values substituted into cluster resource definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterResourceAttributes {
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// Cluster pool the workload is assigned to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterAssignment {
    #[serde(default)]
    pub cluster_pool_name: String,
}

/// Plugin overrides keyed by task type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginOverrides {
    #[serde(default)]
    pub overrides: Vec<PluginOverride>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginOverride {
    pub task_type: String,
    /// Plugin ids tried in order
    #[serde(default)]
    pub plugin_id: Vec<String>,
    #[serde(default)]
    pub missing_plugin_behavior: MissingPluginBehavior,
}

/// What to do when none of the overriding plugins is registered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissingPluginBehavior {
    #[default]
    Fail,
    UseDefault,
}

/// The override value of exactly one matchable resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingAttributes {
    ClusterResourceAttributes(ClusterResourceAttributes),
    ExecutionQueueAttributes(ExecutionQueueAttributes),
    ExecutionClusterLabel(ExecutionClusterLabel),
    PluginOverrides(PluginOverrides),
    ClusterAssignment(ClusterAssignment),
}

impl MatchingAttributes {
    pub fn resource(&self) -> MatchableResource {
        match self {
            MatchingAttributes::ClusterResourceAttributes(_) => MatchableResource::ClusterResource,
            MatchingAttributes::ExecutionQueueAttributes(_) => MatchableResource::ExecutionQueue,
            MatchingAttributes::ExecutionClusterLabel(_) => {
                MatchableResource::ExecutionClusterLabel
            }
            MatchingAttributes::PluginOverrides(_) => MatchableResource::PluginOverride,
            MatchingAttributes::ClusterAssignment(_) => MatchableResource::ClusterAssignment,
        }
    }

    /// Decode the bare payload of `resource` (no variant tag)
    ///
    /// Payload types reject unknown fields, so the error names any key the
    /// resource does not define.
    pub fn deserialize_payload<'de, D>(
        resource: MatchableResource,
        deserializer: D,
    ) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match resource {
            MatchableResource::ClusterResource => MatchingAttributes::ClusterResourceAttributes(
                ClusterResourceAttributes::deserialize(deserializer)?,
            ),
            MatchableResource::ExecutionQueue => MatchingAttributes::ExecutionQueueAttributes(
                ExecutionQueueAttributes::deserialize(deserializer)?,
            ),
            MatchableResource::ExecutionClusterLabel => MatchingAttributes::ExecutionClusterLabel(
                ExecutionClusterLabel::deserialize(deserializer)?,
            ),
            MatchableResource::PluginOverride => {
                MatchingAttributes::PluginOverrides(PluginOverrides::deserialize(deserializer)?)
            }
            MatchableResource::ClusterAssignment => {
                MatchingAttributes::ClusterAssignment(ClusterAssignment::deserialize(deserializer)?)
            }
        })
    }

    /// Encode the bare payload, without the variant tag
    pub fn serialize_payload<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MatchingAttributes::ClusterResourceAttributes(a) => a.serialize(serializer),
            MatchingAttributes::ExecutionQueueAttributes(a) => a.serialize(serializer),
            MatchingAttributes::ExecutionClusterLabel(a) => a.serialize(serializer),
            MatchingAttributes::PluginOverrides(a) => a.serialize(serializer),
            MatchingAttributes::ClusterAssignment(a) => a.serialize(serializer),
        }
    }
}
