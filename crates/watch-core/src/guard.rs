//! Caller-facing guards resolving a cached [`Normalized`] back to its
//! typed slim form.
//!
//! The store holds `Normalized` values; a consumer reading it back expects
//! one concrete kind. On a mismatch these log the offending object at
//! warning level and return `None`, so the caller skips the entry and the
//! pipeline keeps moving. A shape mismatch here is never fatal.

use crate::kind::Kind;
use crate::slim::{
    Normalized, SlimEndpointSlice, SlimEndpoints, SlimMeshEndpoint, SlimNamespace,
    SlimNetworkPolicy, SlimNode, SlimPolicy, SlimService,
};
use crds::MeshNode;
use k8s_openapi::api::core::v1::Pod;
use tracing::warn;

fn warn_unexpected(expected: Kind, obj: &Normalized) {
    let repr =
        serde_json::to_string(obj).unwrap_or_else(|_| format!("{obj:?}"));
    warn!(kind = %expected, object = %repr, "ignoring invalid object");
}

macro_rules! guard {
    ($(#[$doc:meta])* $name:ident, $kind:expr, $accessor:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(obj: &Normalized) -> Option<&$ty> {
            let inner = obj.$accessor();
            if inner.is_none() {
                warn_unexpected($kind, obj);
            }
            inner
        }
    };
}

guard!(
    /// Expects a normalized NetworkPolicy.
    expect_network_policy, Kind::NetworkPolicy, as_network_policy, SlimNetworkPolicy
);
guard!(
    /// Expects a normalized Service.
    expect_service, Kind::Service, as_service, SlimService
);
guard!(
    /// Expects normalized Endpoints.
    expect_endpoints, Kind::Endpoints, as_endpoints, SlimEndpoints
);
guard!(
    /// Expects a normalized EndpointSlice.
    expect_endpoint_slice, Kind::EndpointSlice, as_endpoint_slice, SlimEndpointSlice
);
guard!(
    /// Expects a normalized MeshNetworkPolicy.
    expect_mesh_network_policy, Kind::MeshNetworkPolicy, as_mesh_network_policy, SlimPolicy
);
guard!(
    /// Expects a normalized ClusterMeshNetworkPolicy.
    expect_cluster_mesh_network_policy,
    Kind::ClusterMeshNetworkPolicy,
    as_cluster_mesh_network_policy,
    SlimPolicy
);
guard!(
    /// Expects a Pod (pods carry no slim form).
    expect_pod, Kind::Pod, as_pod, Pod
);

guard!(
    /// Expects a normalized Node.
    expect_node, Kind::Node, as_node, SlimNode
);
guard!(
    /// Expects a normalized Namespace.
    expect_namespace, Kind::Namespace, as_namespace, SlimNamespace
);
guard!(
    /// Expects a normalized MeshEndpoint.
    expect_mesh_endpoint, Kind::MeshEndpoint, as_mesh_endpoint, SlimMeshEndpoint
);
guard!(
    /// Expects a MeshNode.
    expect_mesh_node, Kind::MeshNode, as_mesh_node, MeshNode
);
