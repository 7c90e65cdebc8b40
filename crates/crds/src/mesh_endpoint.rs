//! MeshEndpoint Custom Resource Definition
//!
//! Per-workload object published by the node agents, carrying the identity
//! and networking state other agents need to enforce policy for the
//! workload. Everything of interest lives in the status; the spec only
//! names the backing pod.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// MeshEndpointSpec names the workload this endpoint represents
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[kube(
    group = "mesh.microscaler.io",
    version = "v1alpha1",
    kind = "MeshEndpoint",
    namespaced,
    status = "MeshEndpointStatus",
    derive = "PartialEq",
    derive = "Default"
)]
#[serde(rename_all = "camelCase")]
pub struct MeshEndpointSpec {
    /// Name of the pod backing this endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_name: Option<String>,
}

/// MeshEndpointStatus is the endpoint state published by the owning node
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeshEndpointStatus {
    /// Endpoint id, unique per node
    #[serde(default)]
    pub id: i64,

    /// Security identity of the workload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<EndpointIdentity>,

    /// Transparent-encryption state
    #[serde(default)]
    pub encryption: EncryptionStatus,

    /// Addressing of the workload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub networking: Option<EndpointNetworking>,

    /// Named ports exposed by the workload's containers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub named_ports: Vec<NamedPort>,
}

/// Numeric security identity plus the labels it was derived from
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EndpointIdentity {
    /// Numeric identity
    pub id: i64,

    /// Labels the identity was computed from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Transparent-encryption state of an endpoint
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionStatus {
    /// Index of the key in use; 0 means encryption is disabled
    #[serde(default)]
    pub key: i64,
}

/// Addressing of an endpoint
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EndpointNetworking {
    /// IP address pairs assigned to the endpoint
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addressing: Vec<AddressPair>,

    /// Name of the node hosting the endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
}

/// IPv4/IPv6 address pair
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddressPair {
    /// IPv4 address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<String>,

    /// IPv6 address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<String>,
}

/// A named container port
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NamedPort {
    /// Port name as declared in the pod spec
    pub name: String,

    /// Port number
    pub port: u16,

    /// L4 protocol ("TCP", "UDP")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}
