//! Resource kinds and the registry dispatching their normalize/equal pairs.

use crate::equal;
use crate::normalize::{self, NormalizeOutcome};
use crate::raw::RawEvent;
use crate::service::{NodeAddressing, ServiceParser};
use crate::slim::Normalized;
use std::fmt;

/// The resource kinds this core knows how to normalize and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[allow(missing_docs, reason = "variant names mirror the Kubernetes kinds")]
pub enum Kind {
    NetworkPolicy,
    Service,
    Endpoints,
    EndpointSlice,
    MeshNetworkPolicy,
    ClusterMeshNetworkPolicy,
    Pod,
    Node,
    Namespace,
    MeshEndpoint,
    MeshNode,
}

impl Kind {
    /// Canonical kind name, as it appears in the API and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NetworkPolicy => "NetworkPolicy",
            Self::Service => "Service",
            Self::Endpoints => "Endpoints",
            Self::EndpointSlice => "EndpointSlice",
            Self::MeshNetworkPolicy => "MeshNetworkPolicy",
            Self::ClusterMeshNetworkPolicy => "ClusterMeshNetworkPolicy",
            Self::Pod => "Pod",
            Self::Node => "Node",
            Self::Namespace => "Namespace",
            Self::MeshEndpoint => "MeshEndpoint",
            Self::MeshNode => "MeshNode",
        }
    }

    /// Normalizes one watch event for this kind.
    ///
    /// Consumes the event: for live objects the raw representation is
    /// reduced to its slim form and the original moves out of reach, so a
    /// full and a slim copy never stay live together. Tombstones are
    /// unwrapped, reduced, and re-wrapped under their original key. A
    /// payload of the wrong kind comes back untouched inside
    /// [`NormalizeOutcome::Unexpected`].
    pub fn normalize(self, event: RawEvent) -> NormalizeOutcome {
        match self {
            Self::NetworkPolicy => normalize::event::<normalize::NetworkPolicyNorm>(event),
            Self::Service => normalize::event::<normalize::ServiceNorm>(event),
            Self::Endpoints => normalize::event::<normalize::EndpointsNorm>(event),
            Self::EndpointSlice => normalize::event::<normalize::EndpointSliceNorm>(event),
            Self::MeshNetworkPolicy => normalize::event::<normalize::MeshNetworkPolicyNorm>(event),
            Self::ClusterMeshNetworkPolicy => {
                normalize::event::<normalize::ClusterMeshNetworkPolicyNorm>(event)
            }
            Self::Pod => normalize::event::<normalize::PodNorm>(event),
            Self::Node => normalize::event::<normalize::NodeNorm>(event),
            Self::Namespace => normalize::event::<normalize::NamespaceNorm>(event),
            Self::MeshEndpoint => normalize::event::<normalize::MeshEndpointNorm>(event),
            Self::MeshNode => normalize::event::<normalize::MeshNodeNorm>(event),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only dispatch table pairing every [`Kind`] with its normalize and
/// equality rules.
///
/// Normalization is stateless and dispatches through [`Kind::normalize`];
/// the registry exists so the one capability equality needs, the service
/// parser and the node addressing it consumes, is wired in exactly one
/// place instead of at every call site.
#[derive(Debug)]
pub struct KindRegistry<P> {
    parser: P,
    addressing: NodeAddressing,
}

impl<P: ServiceParser> KindRegistry<P> {
    /// Creates a registry around the service-parsing capability.
    pub fn new(parser: P, addressing: NodeAddressing) -> Self {
        Self { parser, addressing }
    }

    /// Normalizes one watch event for `kind`. See [`Kind::normalize`].
    pub fn normalize(&self, kind: Kind, event: RawEvent) -> NormalizeOutcome {
        kind.normalize(event)
    }

    /// Whether two normalized observations are equivalent for
    /// reconciliation purposes.
    ///
    /// Total: never fails, and observations of different kinds are simply
    /// not equal. Restricted to each kind's relevant-field set; churn
    /// outside that set never flips the result.
    pub fn equal(&self, prev: &Normalized, next: &Normalized) -> bool {
        match (prev, next) {
            (Normalized::NetworkPolicy(a), Normalized::NetworkPolicy(b)) => {
                equal::network_policy(a, b)
            }
            (Normalized::Service(a), Normalized::Service(b)) => {
                equal::service(&self.parser, &self.addressing, a, b)
            }
            (Normalized::Endpoints(a), Normalized::Endpoints(b)) => equal::endpoints(a, b),
            (Normalized::EndpointSlice(a), Normalized::EndpointSlice(b)) => {
                equal::endpoint_slice(a, b)
            }
            (Normalized::MeshNetworkPolicy(a), Normalized::MeshNetworkPolicy(b))
            | (Normalized::ClusterMeshNetworkPolicy(a), Normalized::ClusterMeshNetworkPolicy(b)) => {
                equal::policy(a, b)
            }
            (Normalized::Pod(a), Normalized::Pod(b)) => equal::pod(a, b),
            (Normalized::Node(a), Normalized::Node(b)) => equal::node(a, b),
            (Normalized::Namespace(a), Normalized::Namespace(b)) => equal::namespace(a, b),
            (Normalized::MeshEndpoint(a), Normalized::MeshEndpoint(b)) => a == b,
            (Normalized::MeshNode(a), Normalized::MeshNode(b)) => a == b,
            _ => false,
        }
    }
}
