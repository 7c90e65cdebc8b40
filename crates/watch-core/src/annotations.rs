//! Well-known annotation keys consulted by the equality rules.

/// IPv4 address of the mesh host device, published by the node agent.
pub const HOST_IPV4: &str = "mesh.microscaler.io/host-ipv4";

/// IPv6 address of the mesh host device, published by the node agent.
pub const HOST_IPV6: &str = "mesh.microscaler.io/host-ipv6";

/// Name of the node's IPv4 health-check endpoint.
pub const V4_HEALTH_NAME: &str = "mesh.microscaler.io/v4-health-name";

/// Name of the node's IPv6 health-check endpoint.
pub const V6_HEALTH_NAME: &str = "mesh.microscaler.io/v6-health-name";

/// Per-pod opt-in to L7 proxy visibility.
pub const PROXY_VISIBILITY: &str = "policy.mesh.microscaler.io/proxy-visibility";

/// Marks a service as global across connected clusters.
pub const GLOBAL_SERVICE: &str = "service.mesh.microscaler.io/global";

/// Marks a global service as shared with other clusters.
pub const SHARED_SERVICE: &str = "service.mesh.microscaler.io/shared";

/// Rewritten by kubectl on every apply; never semantically relevant.
pub const LAST_APPLIED_CONFIG: &str = "kubectl.kubernetes.io/last-applied-configuration";

/// Node annotations that affect datapath state.
pub(crate) const NODE_RELEVANT: &[&str] = &[HOST_IPV4, HOST_IPV6, V4_HEALTH_NAME, V6_HEALTH_NAME];

/// Service annotations that affect cross-cluster visibility.
pub(crate) const SERVICE_RELEVANT: &[&str] = &[GLOBAL_SERVICE, SHARED_SERVICE];
