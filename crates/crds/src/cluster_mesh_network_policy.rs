//! ClusterMeshNetworkPolicy Custom Resource Definition
//!
//! Cluster-scoped variant of MeshNetworkPolicy. Rules and status share the
//! same shapes; only the scope differs.

use crate::mesh_network_policy::MeshNetworkPolicyStatus;
use crate::rule::PolicyRule;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ClusterMeshNetworkPolicySpec defines the desired state of a cluster-wide
/// mesh network policy
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[kube(
    group = "mesh.microscaler.io",
    version = "v1alpha1",
    kind = "ClusterMeshNetworkPolicy",
    status = "MeshNetworkPolicyStatus",
    derive = "PartialEq",
    derive = "Default"
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterMeshNetworkPolicySpec {
    /// Single policy rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<PolicyRule>,

    /// Multiple policy rules, applied independently
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<PolicyRule>,
}
