//! Per-kind reduction of raw watch events to their slim forms.
//!
//! Every kind plugs an [`KindNormalizer`] implementation into the single
//! generic [`event`] function, which owns the tombstone unwrap/re-wrap
//! logic so it exists in exactly one place. Normalization consumes the raw
//! object: the caller keeps only the slim result, which is what bounds
//! memory across a large cluster without the source object ever being
//! mutated in place.

use crate::error::UnexpectedKind;
use crate::kind::Kind;
use crate::raw::{RawEvent, RawObject, Tombstone};
use crate::slim::{
    Normalized, SlimEndpointSlice, SlimEndpoints, SlimMeshEndpoint, SlimNamespace,
    SlimNetworkPolicy, SlimNode, SlimPolicy, SlimService,
};
use crds::{ClusterMeshNetworkPolicy, MeshEndpoint, MeshNetworkPolicy, MeshNode};
use k8s_openapi::api::core::v1::{Endpoints, Namespace, Node, Pod, Service};
use k8s_openapi::api::discovery::v1::EndpointSlice;
use k8s_openapi::api::networking::v1::NetworkPolicy;

/// Result of normalizing one watch event.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeOutcome {
    /// The payload matched and was reduced to its slim form.
    Object(Normalized),
    /// A tombstone whose payload (if any) was reduced, re-wrapped under
    /// the original key.
    Tombstone(Tombstone<Normalized>),
    /// The payload did not match the subscribed kind; the event is inside,
    /// untouched.
    Unexpected(UnexpectedKind),
}

impl NormalizeOutcome {
    /// The normalized object, for callers that treat tombstones and
    /// mismatches alike as "nothing to store".
    pub fn into_object(self) -> Option<Normalized> {
        match self {
            Self::Object(obj) => Some(obj),
            Self::Tombstone(_) | Self::Unexpected(_) => None,
        }
    }
}

/// One kind's normalization strategy.
///
/// `extract` is the sum-variant match: it either claims the payload or
/// hands it back so the caller gets the original object, not a copy.
pub(crate) trait KindNormalizer {
    /// Raw payload type this normalizer accepts.
    type Raw;
    /// Kind tag, used in the mismatch diagnostic.
    const KIND: Kind;
    /// Pulls the matching payload out of the sum type, or gives it back.
    fn extract(obj: RawObject) -> Result<Self::Raw, RawObject>;
    /// Reduces the raw payload to its normalized form.
    fn reduce(raw: Self::Raw) -> Normalized;
}

/// Normalizes one event for kind `N`.
///
/// Live objects are extracted and reduced. Tombstones keep their key
/// verbatim; a present payload is reduced recursively, an absent one stays
/// absent. Any payload of the wrong kind comes back untouched inside
/// [`NormalizeOutcome::Unexpected`]; for a tombstone that means the whole
/// wrapper, key and payload intact.
pub(crate) fn event<N: KindNormalizer>(event: RawEvent) -> NormalizeOutcome {
    match event {
        RawEvent::Object(obj) => match N::extract(obj) {
            Ok(raw) => NormalizeOutcome::Object(N::reduce(raw)),
            Err(obj) => {
                NormalizeOutcome::Unexpected(UnexpectedKind::new(N::KIND, RawEvent::Object(obj)))
            }
        },
        RawEvent::Tombstone(Tombstone { key, obj }) => match obj {
            None => NormalizeOutcome::Tombstone(Tombstone { key, obj: None }),
            Some(inner) => match N::extract(inner) {
                Ok(raw) => NormalizeOutcome::Tombstone(Tombstone {
                    key,
                    obj: Some(N::reduce(raw)),
                }),
                Err(inner) => NormalizeOutcome::Unexpected(UnexpectedKind::new(
                    N::KIND,
                    RawEvent::Tombstone(Tombstone {
                        key,
                        obj: Some(inner),
                    }),
                )),
            },
        },
    }
}

pub(crate) struct NetworkPolicyNorm;

impl KindNormalizer for NetworkPolicyNorm {
    type Raw = NetworkPolicy;
    const KIND: Kind = Kind::NetworkPolicy;

    fn extract(obj: RawObject) -> Result<Self::Raw, RawObject> {
        match obj {
            RawObject::NetworkPolicy(np) => Ok(np),
            other => Err(other),
        }
    }

    fn reduce(np: Self::Raw) -> Normalized {
        Normalized::NetworkPolicy(SlimNetworkPolicy {
            name: np.metadata.name.unwrap_or_default(),
            namespace: np.metadata.namespace.unwrap_or_default(),
            spec: np.spec,
        })
    }
}

pub(crate) struct ServiceNorm;

impl KindNormalizer for ServiceNorm {
    type Raw = Box<Service>;
    const KIND: Kind = Kind::Service;

    fn extract(obj: RawObject) -> Result<Self::Raw, RawObject> {
        match obj {
            RawObject::Service(svc) => Ok(svc),
            other => Err(other),
        }
    }

    fn reduce(svc: Self::Raw) -> Normalized {
        let svc = *svc;
        Normalized::Service(SlimService {
            name: svc.metadata.name.unwrap_or_default(),
            namespace: svc.metadata.namespace.unwrap_or_default(),
            labels: svc.metadata.labels.unwrap_or_default(),
            annotations: svc.metadata.annotations.unwrap_or_default(),
            spec: svc.spec,
            status: svc.status,
        })
    }
}

pub(crate) struct EndpointsNorm;

impl KindNormalizer for EndpointsNorm {
    type Raw = Endpoints;
    const KIND: Kind = Kind::Endpoints;

    fn extract(obj: RawObject) -> Result<Self::Raw, RawObject> {
        match obj {
            RawObject::Endpoints(ep) => Ok(ep),
            other => Err(other),
        }
    }

    fn reduce(ep: Self::Raw) -> Normalized {
        Normalized::Endpoints(SlimEndpoints {
            name: ep.metadata.name.unwrap_or_default(),
            namespace: ep.metadata.namespace.unwrap_or_default(),
            subsets: ep.subsets.unwrap_or_default(),
        })
    }
}

pub(crate) struct EndpointSliceNorm;

impl KindNormalizer for EndpointSliceNorm {
    type Raw = EndpointSlice;
    const KIND: Kind = Kind::EndpointSlice;

    fn extract(obj: RawObject) -> Result<Self::Raw, RawObject> {
        match obj {
            RawObject::EndpointSlice(eps) => Ok(eps),
            other => Err(other),
        }
    }

    // The slice's address type is dropped: immutable after creation.
    fn reduce(eps: Self::Raw) -> Normalized {
        Normalized::EndpointSlice(SlimEndpointSlice {
            name: eps.metadata.name.unwrap_or_default(),
            namespace: eps.metadata.namespace.unwrap_or_default(),
            endpoints: eps.endpoints,
            ports: eps.ports.unwrap_or_default(),
        })
    }
}

fn reduce_policy(
    metadata: k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta,
    rule: Option<crds::PolicyRule>,
    rules: Vec<crds::PolicyRule>,
    status: Option<crds::MeshNetworkPolicyStatus>,
) -> SlimPolicy {
    SlimPolicy {
        name: metadata.name.unwrap_or_default(),
        namespace: metadata.namespace,
        annotations: metadata.annotations.unwrap_or_default(),
        rule,
        rules,
        status,
    }
}

pub(crate) struct MeshNetworkPolicyNorm;

impl KindNormalizer for MeshNetworkPolicyNorm {
    type Raw = MeshNetworkPolicy;
    const KIND: Kind = Kind::MeshNetworkPolicy;

    fn extract(obj: RawObject) -> Result<Self::Raw, RawObject> {
        match obj {
            RawObject::MeshNetworkPolicy(mnp) => Ok(mnp),
            other => Err(other),
        }
    }

    fn reduce(mnp: Self::Raw) -> Normalized {
        Normalized::MeshNetworkPolicy(reduce_policy(
            mnp.metadata,
            mnp.spec.rule,
            mnp.spec.rules,
            mnp.status,
        ))
    }
}

pub(crate) struct ClusterMeshNetworkPolicyNorm;

impl KindNormalizer for ClusterMeshNetworkPolicyNorm {
    type Raw = ClusterMeshNetworkPolicy;
    const KIND: Kind = Kind::ClusterMeshNetworkPolicy;

    fn extract(obj: RawObject) -> Result<Self::Raw, RawObject> {
        match obj {
            RawObject::ClusterMeshNetworkPolicy(cmnp) => Ok(cmnp),
            other => Err(other),
        }
    }

    fn reduce(cmnp: Self::Raw) -> Normalized {
        Normalized::ClusterMeshNetworkPolicy(reduce_policy(
            cmnp.metadata,
            cmnp.spec.rule,
            cmnp.spec.rules,
            cmnp.status,
        ))
    }
}

pub(crate) struct PodNorm;

impl KindNormalizer for PodNorm {
    type Raw = Box<Pod>;
    const KIND: Kind = Kind::Pod;

    fn extract(obj: RawObject) -> Result<Self::Raw, RawObject> {
        match obj {
            RawObject::Pod(pod) => Ok(pod),
            other => Err(other),
        }
    }

    // Pods are compared directly over the API representation; no slim form.
    fn reduce(pod: Self::Raw) -> Normalized {
        Normalized::Pod(pod)
    }
}

pub(crate) struct NodeNorm;

impl KindNormalizer for NodeNorm {
    type Raw = Box<Node>;
    const KIND: Kind = Kind::Node;

    fn extract(obj: RawObject) -> Result<Self::Raw, RawObject> {
        match obj {
            RawObject::Node(node) => Ok(node),
            other => Err(other),
        }
    }

    fn reduce(node: Self::Raw) -> Normalized {
        let node = *node;
        let spec = node.spec.unwrap_or_default();
        Normalized::Node(SlimNode {
            name: node.metadata.name.unwrap_or_default(),
            annotations: node.metadata.annotations.unwrap_or_default(),
            addresses: node
                .status
                .and_then(|status| status.addresses)
                .unwrap_or_default(),
            pod_cidr: spec.pod_cidr.unwrap_or_default(),
            pod_cidrs: spec.pod_cidrs.unwrap_or_default(),
            taints: spec.taints.unwrap_or_default(),
        })
    }
}

pub(crate) struct NamespaceNorm;

impl KindNormalizer for NamespaceNorm {
    type Raw = Namespace;
    const KIND: Kind = Kind::Namespace;

    fn extract(obj: RawObject) -> Result<Self::Raw, RawObject> {
        match obj {
            RawObject::Namespace(ns) => Ok(ns),
            other => Err(other),
        }
    }

    fn reduce(ns: Self::Raw) -> Normalized {
        Normalized::Namespace(SlimNamespace {
            name: ns.metadata.name.unwrap_or_default(),
            labels: ns.metadata.labels.unwrap_or_default(),
        })
    }
}

pub(crate) struct MeshEndpointNorm;

impl KindNormalizer for MeshEndpointNorm {
    type Raw = MeshEndpoint;
    const KIND: Kind = Kind::MeshEndpoint;

    fn extract(obj: RawObject) -> Result<Self::Raw, RawObject> {
        match obj {
            RawObject::MeshEndpoint(mep) => Ok(mep),
            other => Err(other),
        }
    }

    fn reduce(mep: Self::Raw) -> Normalized {
        Normalized::MeshEndpoint(SlimMeshEndpoint {
            name: mep.metadata.name.unwrap_or_default(),
            namespace: mep.metadata.namespace.unwrap_or_default(),
            status: mep.status.unwrap_or_default(),
        })
    }
}

pub(crate) struct MeshNodeNorm;

impl KindNormalizer for MeshNodeNorm {
    type Raw = MeshNode;
    const KIND: Kind = Kind::MeshNode;

    fn extract(obj: RawObject) -> Result<Self::Raw, RawObject> {
        match obj {
            RawObject::MeshNode(mn) => Ok(mn),
            other => Err(other),
        }
    }

    // TODO(mesh-node-slim): reduce to a slim type once the agents agree on
    // the fields they read; until then the full object passes through.
    fn reduce(mn: Self::Raw) -> Normalized {
        Normalized::MeshNode(mn)
    }
}
