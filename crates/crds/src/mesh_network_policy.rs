//! MeshNetworkPolicy Custom Resource Definition
//!
//! Namespaced policy rules enforced by the MeshOps node agents.

use crate::rule::PolicyRule;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// MeshNetworkPolicySpec defines the desired state of a mesh network policy
///
/// A policy carries either a single `rule` or a list of `rules`; the agents
/// treat the two forms identically.
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[kube(
    group = "mesh.microscaler.io",
    version = "v1alpha1",
    kind = "MeshNetworkPolicy",
    namespaced,
    status = "MeshNetworkPolicyStatus",
    derive = "PartialEq",
    derive = "Default"
)]
#[serde(rename_all = "camelCase")]
pub struct MeshNetworkPolicySpec {
    /// Single policy rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<PolicyRule>,

    /// Multiple policy rules, applied independently
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<PolicyRule>,
}

/// MeshNetworkPolicyStatus reports per-node enforcement state
///
/// Also used by ClusterMeshNetworkPolicy; the shape is identical.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeshNetworkPolicyStatus {
    /// Enforcement state per node, keyed by node name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nodes: BTreeMap<String, PolicyNodeStatus>,

    /// Last time any node updated its entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<chrono::DateTime<chrono::Utc>>,
}

/// Enforcement state reported by a single node
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyNodeStatus {
    /// Whether the node enforces the policy
    pub enforcing: bool,

    /// Error message if the node failed to apply the policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Last time the node updated this entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<chrono::DateTime<chrono::Utc>>,
}
