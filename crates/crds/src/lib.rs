//! MeshOps CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the MeshOps agents:
//! - MeshNetworkPolicy: namespaced policy rules applied by the node agents
//! - ClusterMeshNetworkPolicy: cluster-wide variant of the same rules
//! - MeshEndpoint: per-workload identity and networking state
//! - MeshNode: per-node addressing and health state

pub mod cluster_mesh_network_policy;
pub mod mesh_endpoint;
pub mod mesh_network_policy;
pub mod mesh_node;
pub mod rule;

pub use cluster_mesh_network_policy::*;
pub use mesh_endpoint::*;
pub use mesh_network_policy::*;
pub use mesh_node::*;
pub use rule::*;
