//! Service-parsing capability consumed by the service equality rule.
//!
//! Deciding what a service means for the datapath (frontend, ports, node
//! ports, selector scope) is owned by the load-balancing layer, not by
//! this core. Equality only needs the derived identity and info values and
//! their comparison, so the parser is taken as a capability and the
//! comparable shapes live here.

use crate::slim::SlimService;
use std::collections::BTreeMap;
use std::net::IpAddr;

/// Node addressing configuration handed through to the service parser,
/// used to resolve node-port frontends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeAddressing {
    /// Primary IPv4 address of this node, if IPv4 is enabled.
    pub ipv4: Option<IpAddr>,
    /// Primary IPv6 address of this node, if IPv6 is enabled.
    pub ipv6: Option<IpAddr>,
}

/// Stable identity of a service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceId {
    /// Service name.
    pub name: String,
    /// Service namespace.
    pub namespace: String,
}

/// One service port as the datapath sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePortInfo {
    /// L4 protocol ("TCP", "UDP").
    pub protocol: String,
    /// Frontend port number.
    pub port: u16,
}

/// Everything the datapath derives from a service, in a structurally
/// comparable shape.
#[derive(Debug, Clone, Default)]
pub struct ServiceInfo {
    /// Cluster-internal frontend address; `None` for headless services.
    pub frontend_ip: Option<IpAddr>,
    /// Whether the service is headless.
    pub is_headless: bool,
    /// Whether external traffic is accepted.
    pub include_external: bool,
    /// Whether the service is shared across clusters.
    pub shared: bool,
    /// Frontend ports by name.
    pub ports: BTreeMap<String, ServicePortInfo>,
    /// Node ports by name.
    pub node_ports: BTreeMap<String, u16>,
    /// Backend selector labels.
    pub selector: BTreeMap<String, String>,
}

impl ServiceInfo {
    /// Field-by-field equality.
    ///
    /// All service equality logic lives here; a field added to this struct
    /// must be added to this comparison.
    pub fn deep_equal(&self, other: &Self) -> bool {
        self.frontend_ip == other.frontend_ip
            && self.is_headless == other.is_headless
            && self.include_external == other.include_external
            && self.shared == other.shared
            && self.ports == other.ports
            && self.node_ports == other.node_ports
            && self.selector == other.selector
    }
}

/// Derives the stable identity and comparable info of a normalized service.
///
/// Implemented by the load-balancing layer; tests use a local stub.
pub trait ServiceParser {
    /// Parses `svc` against the given node addressing.
    fn parse(&self, svc: &SlimService, addressing: &NodeAddressing) -> (ServiceId, ServiceInfo);
}
