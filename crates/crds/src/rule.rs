//! Policy rule building blocks shared by the namespaced and cluster-wide
//! network policy CRDs.
//!
//! These are deliberately self-contained (no k8s-openapi types) so the CRD
//! schema generation stays under our control.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label-based selection of endpoints a rule applies to.
///
/// An empty selector selects every endpoint in scope (the namespace for
/// MeshNetworkPolicy, the cluster for ClusterMeshNetworkPolicy).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSelector {
    /// Labels that must all be present on the endpoint
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
}

/// A single L3/L4 port a rule allows traffic on
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PortRule {
    /// Port number
    pub port: u16,

    /// L4 protocol ("TCP", "UDP"); defaults to TCP when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// Ingress half of a policy rule
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressRule {
    /// Peers that may send traffic to the selected endpoints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from_endpoints: Vec<EndpointSelector>,

    /// Ports the traffic is allowed on; empty means all ports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_ports: Vec<PortRule>,
}

/// Egress half of a policy rule
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EgressRule {
    /// Peers the selected endpoints may send traffic to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_endpoints: Vec<EndpointSelector>,

    /// CIDRs the selected endpoints may send traffic to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_cidrs: Vec<String>,

    /// Ports the traffic is allowed on; empty means all ports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_ports: Vec<PortRule>,
}

/// One complete policy rule: the endpoints it selects plus the ingress and
/// egress traffic it allows for them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRule {
    /// Endpoints this rule applies to
    #[serde(default)]
    pub endpoint_selector: EndpointSelector,

    /// Allowed ingress traffic
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingress: Vec<IngressRule>,

    /// Allowed egress traffic
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub egress: Vec<EgressRule>,

    /// Free-form description carried into agent logs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
