//! Raw watch-event shapes as handed over by the informer layer.

use crate::kind::Kind;
use crds::{ClusterMeshNetworkPolicy, MeshEndpoint, MeshNetworkPolicy, MeshNode};
use k8s_openapi::api::core::v1::{Endpoints, Namespace, Node, Pod, Service};
use k8s_openapi::api::discovery::v1::EndpointSlice;
use k8s_openapi::api::networking::v1::NetworkPolicy;

/// A raw object delivered by the watch layer, tagged by kind.
///
/// The informer layer materializes every event payload into this sum type
/// before handing it to a normalizer; a mismatch between the subscribed
/// kind and the payload variant is then an ordinary pattern-match miss
/// instead of a scattered runtime downcast.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[allow(missing_docs, reason = "variant names mirror the Kubernetes kinds")]
pub enum RawObject {
    NetworkPolicy(NetworkPolicy),
    Service(Box<Service>),
    Endpoints(Endpoints),
    EndpointSlice(EndpointSlice),
    MeshNetworkPolicy(MeshNetworkPolicy),
    ClusterMeshNetworkPolicy(ClusterMeshNetworkPolicy),
    Pod(Box<Pod>),
    Node(Box<Node>),
    Namespace(Namespace),
    MeshEndpoint(MeshEndpoint),
    MeshNode(MeshNode),
}

impl RawObject {
    /// Kind tag of this payload.
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
}

/// Deletion of unknown final state.
///
/// Produced by the watch layer when it could not observe the final delete,
/// carrying the stable cache key (`namespace/name`, or `name` for
/// cluster-scoped kinds) and the last state it held for that identity, if
/// any.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Tombstone<T> {
    /// Cache key of the deleted identity.
    pub key: String,
    /// Last known state; `None` when the watch layer lost it entirely.
    pub obj: Option<T>,
}

/// One watch event as seen by a normalizer.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum RawEvent {
    /// A live object (add, update, or observed delete).
    Object(RawObject),
    /// Deletion tombstone for an identity whose final state was missed.
    Tombstone(Tombstone<RawObject>),
}
