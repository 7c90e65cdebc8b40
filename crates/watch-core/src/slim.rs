//! Slim (normalized) object shapes.
//!
//! One shape per kind, holding the stable identity plus exactly the fields
//! downstream reconciliation reads. Optional metadata is flattened to its
//! zero value at normalization time, so equality rules never have to
//! distinguish "absent" from "empty".
//!
//! Pod and MeshNode have no slim form: pods are compared directly over the
//! API representation, and a slim MeshNode is still an open item upstream.

use crate::kind::Kind;
use crds::{MeshEndpointStatus, MeshNetworkPolicyStatus, MeshNode, PolicyRule};
use k8s_openapi::api::core::v1::{
    EndpointSubset, NodeAddress, Pod, ServiceSpec, ServiceStatus, Taint,
};
use k8s_openapi::api::discovery::v1::{Endpoint, EndpointPort};
use k8s_openapi::api::networking::v1::NetworkPolicySpec;
use std::collections::BTreeMap;

/// A normalized object of any supported kind.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[allow(missing_docs, reason = "variant names mirror the Kubernetes kinds")]
pub enum Normalized {
    NetworkPolicy(SlimNetworkPolicy),
    Service(SlimService),
    Endpoints(SlimEndpoints),
    EndpointSlice(SlimEndpointSlice),
    MeshNetworkPolicy(SlimPolicy),
    ClusterMeshNetworkPolicy(SlimPolicy),
    Pod(Box<Pod>),
    Node(SlimNode),
    Namespace(SlimNamespace),
    MeshEndpoint(SlimMeshEndpoint),
    MeshNode(MeshNode),
}

macro_rules! accessor {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&self) -> Option<&$ty> {
            match self {
                Self::$variant(inner) => Some(inner),
                _ => None,
            }
        }
    };
}

impl Normalized {
    /// Kind tag of this object.
    pub fn kind(&self) -> Kind {
        match self {
            Self::NetworkPolicy(_) => Kind::NetworkPolicy,
            Self::Service(_) => Kind::Service,
            Self::Endpoints(_) => Kind::Endpoints,
            Self::EndpointSlice(_) => Kind::EndpointSlice,
            Self::MeshNetworkPolicy(_) => Kind::MeshNetworkPolicy,
            Self::ClusterMeshNetworkPolicy(_) => Kind::ClusterMeshNetworkPolicy,
            Self::Pod(_) => Kind::Pod,
            Self::Node(_) => Kind::Node,
            Self::Namespace(_) => Kind::Namespace,
            Self::MeshEndpoint(_) => Kind::MeshEndpoint,
            Self::MeshNode(_) => Kind::MeshNode,
        }
    }

    accessor!(
        /// The slim NetworkPolicy, if that is what this is.
        as_network_policy, NetworkPolicy, SlimNetworkPolicy
    );
    accessor!(
        /// The slim Service, if that is what this is.
        as_service, Service, SlimService
    );
    accessor!(
        /// The slim Endpoints, if that is what this is.
        as_endpoints, Endpoints, SlimEndpoints
    );
    accessor!(
        /// The slim EndpointSlice, if that is what this is.
        as_endpoint_slice, EndpointSlice, SlimEndpointSlice
    );
    accessor!(
        /// The slim MeshNetworkPolicy, if that is what this is.
        as_mesh_network_policy, MeshNetworkPolicy, SlimPolicy
    );
    accessor!(
        /// The slim ClusterMeshNetworkPolicy, if that is what this is.
        as_cluster_mesh_network_policy, ClusterMeshNetworkPolicy, SlimPolicy
    );
    accessor!(
        /// The slim Node, if that is what this is.
        as_node, Node, SlimNode
    );
    accessor!(
        /// The slim Namespace, if that is what this is.
        as_namespace, Namespace, SlimNamespace
    );
    accessor!(
        /// The slim MeshEndpoint, if that is what this is.
        as_mesh_endpoint, MeshEndpoint, SlimMeshEndpoint
    );
    accessor!(
        /// The MeshNode, if that is what this is.
        as_mesh_node, MeshNode, MeshNode
    );

    /// The Pod, if that is what this is (pods carry no slim form).
    pub fn as_pod(&self) -> Option<&Pod> {
        match self {
            Self::Pod(pod) => Some(pod),
            _ => None,
        }
    }
}

/// Identity plus the full policy spec.
///
/// The agents consume the entire spec, so nothing is narrowed here.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SlimNetworkPolicy {
    /// Object name.
    pub name: String,
    /// Object namespace.
    pub namespace: String,
    /// Full policy spec, verbatim.
    pub spec: Option<NetworkPolicySpec>,
}

/// Identity, annotations, and the full service spec/status.
///
/// Deciding what inside the spec actually matters is the service parser's
/// job, so normalization keeps it whole.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SlimService {
    /// Object name.
    pub name: String,
    /// Object namespace.
    pub namespace: String,
    /// Object labels.
    pub labels: BTreeMap<String, String>,
    /// Object annotations.
    pub annotations: BTreeMap<String, String>,
    /// Full service spec.
    pub spec: Option<ServiceSpec>,
    /// Full service status.
    pub status: Option<ServiceStatus>,
}

/// Identity plus subsets.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SlimEndpoints {
    /// Object name.
    pub name: String,
    /// Object namespace.
    pub namespace: String,
    /// Address/port subsets.
    pub subsets: Vec<EndpointSubset>,
}

/// Identity plus endpoints and ports.
///
/// The slice's address type is dropped here: it is immutable after
/// creation and therefore never a source of meaningful change.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SlimEndpointSlice {
    /// Object name.
    pub name: String,
    /// Object namespace.
    pub namespace: String,
    /// Backend endpoints.
    pub endpoints: Vec<Endpoint>,
    /// Ports exposed by the endpoints.
    pub ports: Vec<EndpointPort>,
}

/// Slim form shared by MeshNetworkPolicy and ClusterMeshNetworkPolicy.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SlimPolicy {
    /// Object name.
    pub name: String,
    /// Object namespace; `None` for the cluster-wide variant.
    pub namespace: Option<String>,
    /// Object annotations.
    pub annotations: BTreeMap<String, String>,
    /// Single rule form of the spec.
    pub rule: Option<PolicyRule>,
    /// Multi-rule form of the spec.
    pub rules: Vec<PolicyRule>,
    /// Per-node enforcement status.
    pub status: Option<MeshNetworkPolicyStatus>,
}

impl SlimPolicy {
    /// Copy of this policy with the status dropped, for consumers that key
    /// work off the desired state only and should not be woken by status
    /// churn.
    pub fn without_status(&self) -> Self {
        Self {
            status: None,
            ..self.clone()
        }
    }
}

/// The node fields the agents read: addresses, pod CIDRs, and taints.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SlimNode {
    /// Node name.
    pub name: String,
    /// Node annotations.
    pub annotations: BTreeMap<String, String>,
    /// Addresses from the node status.
    pub addresses: Vec<NodeAddress>,
    /// Primary pod CIDR.
    pub pod_cidr: String,
    /// All pod CIDRs, when dual-stack.
    pub pod_cidrs: Vec<String>,
    /// Scheduling taints.
    pub taints: Vec<Taint>,
}

/// Name and labels only.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SlimNamespace {
    /// Namespace name.
    pub name: String,
    /// Namespace labels.
    pub labels: BTreeMap<String, String>,
}

/// Identity, encryption, and networking state of a mesh endpoint.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SlimMeshEndpoint {
    /// Object name.
    pub name: String,
    /// Object namespace.
    pub namespace: String,
    /// Endpoint status: identity, encryption, networking, named ports.
    pub status: MeshEndpointStatus,
}
