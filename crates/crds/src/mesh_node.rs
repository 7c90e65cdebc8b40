//! MeshNode Custom Resource Definition
//!
//! Cluster-scoped per-node object carrying the addressing the agents need
//! to reach each other. There is no slim form of this type yet; the watch
//! pipeline hands it through unreduced.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// MeshNodeSpec defines the addressing published for a node
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[kube(
    group = "mesh.microscaler.io",
    version = "v1alpha1",
    kind = "MeshNode",
    status = "MeshNodeStatus",
    derive = "PartialEq",
    derive = "Default"
)]
#[serde(rename_all = "camelCase")]
pub struct MeshNodeSpec {
    /// Addresses the node is reachable at
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<MeshNodeAddress>,

    /// IPv4 address of the node's health endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_ipv4: Option<String>,

    /// IPv6 address of the node's health endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_ipv6: Option<String>,

    /// Pod CIDRs allocated to the node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pod_cidrs: Vec<String>,

    /// Cloud-provider instance id, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
}

/// One address of a node
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeshNodeAddress {
    /// Address type ("InternalIP", "ExternalIP", "MeshInternalIP")
    #[serde(rename = "type")]
    pub address_type: String,

    /// The address itself
    pub ip: String,
}

/// MeshNodeStatus reports the agent's view of the node
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeshNodeStatus {
    /// Whether the agent on this node is connected
    #[serde(default)]
    pub connected: bool,

    /// Last heartbeat from the agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_heartbeat: Option<chrono::DateTime<chrono::Utc>>,
}
