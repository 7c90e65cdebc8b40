//! Per-kind semantic equality.
//!
//! Each rule is restricted to the fields downstream reconciliation
//! actually reads; everything else may churn freely without waking the
//! reconcilers. All comparisons are read-only; nothing here touches the
//! cached objects, so no serialization against concurrent readers is
//! needed.

use crate::annotations;
use crate::service::{NodeAddressing, ServiceParser};
use crate::slim::{
    SlimEndpointSlice, SlimEndpoints, SlimNamespace, SlimNetworkPolicy, SlimNode, SlimPolicy,
    SlimService,
};
use k8s_openapi::api::core::v1::{Container, Pod, PodIP, Taint};
use std::collections::BTreeMap;

/// Whether the annotation under each relevant key matches between the two
/// maps.
///
/// A missing key compares as the empty string, so "absent" and "present
/// but empty" are the same value.
pub fn annotations_equal(
    relevant: &[&str],
    anno1: &BTreeMap<String, String>,
    anno2: &BTreeMap<String, String>,
) -> bool {
    relevant.iter().all(|key| {
        anno1.get(*key).map_or("", String::as_str) == anno2.get(*key).map_or("", String::as_str)
    })
}

/// Exact map equality with one key filtered out of both sides.
///
/// Used to skip kubectl's last-applied-configuration annotation without
/// mutating the live maps.
fn maps_equal_except(
    ignored: &str,
    map1: &BTreeMap<String, String>,
    map2: &BTreeMap<String, String>,
) -> bool {
    map1.iter()
        .filter(|(key, _)| key.as_str() != ignored)
        .eq(map2.iter().filter(|(key, _)| key.as_str() != ignored))
}

/// The agents consume the entire spec, so the whole of it is significant.
pub fn network_policy(np1: &SlimNetworkPolicy, np2: &SlimNetworkPolicy) -> bool {
    np1.name == np2.name && np1.namespace == np2.namespace && np1.spec == np2.spec
}

/// Sharing annotations plus whatever the service parser derives.
///
/// Annotation churn outside the cross-cluster visibility keys never flips
/// the result; spec churn only matters when it changes the parsed
/// [`crate::ServiceInfo`].
pub fn service<P: ServiceParser>(
    parser: &P,
    addressing: &NodeAddressing,
    svc1: &SlimService,
    svc2: &SlimService,
) -> bool {
    if !annotations_equal(
        annotations::SERVICE_RELEVANT,
        &svc1.annotations,
        &svc2.annotations,
    ) {
        return false;
    }

    let (id1, info1) = parser.parse(svc1, addressing);
    let (id2, info2) = parser.parse(svc2, addressing);

    id1 == id2 && info1.deep_equal(&info2)
}

/// Identity plus subsets.
pub fn endpoints(ep1: &SlimEndpoints, ep2: &SlimEndpoints) -> bool {
    ep1.name == ep2.name && ep1.namespace == ep2.namespace && ep1.subsets == ep2.subsets
}

/// Identity plus endpoints and ports.
///
/// The address type was already dropped at normalization; it is immutable
/// after the slice is created.
pub fn endpoint_slice(eps1: &SlimEndpointSlice, eps2: &SlimEndpointSlice) -> bool {
    eps1.name == eps2.name
        && eps1.namespace == eps2.namespace
        && eps1.endpoints == eps2.endpoints
        && eps1.ports == eps2.ports
}

/// Identity, annotations, and rules of a mesh policy.
///
/// kubectl's last-applied-configuration annotation is excluded: external
/// tooling rewrites it on every apply with no semantic effect. Status is
/// not compared; status churn must not retrigger policy computation.
pub fn policy(pol1: &SlimPolicy, pol2: &SlimPolicy) -> bool {
    pol1.name == pol2.name
        && pol1.namespace == pol2.namespace
        && maps_equal_except(
            annotations::LAST_APPLIED_CONFIG,
            &pol1.annotations,
            &pol2.annotations,
        )
        && pol1.rule == pol2.rule
        && pol1.rules == pol2.rules
}

/// The pod fields the agents read: addressing, identity, visibility, and
/// the container surface.
///
/// Everything else in the pod spec (resources, env, probes) is
/// explicitly irrelevant.
pub fn pod(pod1: &Pod, pod2: &Pod) -> bool {
    fn pod_ip(p: &Pod) -> Option<&str> {
        p.status.as_ref().and_then(|s| s.pod_ip.as_deref())
    }
    fn host_ip(p: &Pod) -> Option<&str> {
        p.status.as_ref().and_then(|s| s.host_ip.as_deref())
    }
    fn service_account(p: &Pod) -> Option<&str> {
        p.spec.as_ref().and_then(|s| s.service_account_name.as_deref())
    }
    let host_network = |p: &Pod| {
        p.spec
            .as_ref()
            .and_then(|s| s.host_network)
            .unwrap_or(false)
    };

    if pod_ip(pod1).unwrap_or("") != pod_ip(pod2).unwrap_or("")
        || host_ip(pod1).unwrap_or("") != host_ip(pod2).unwrap_or("")
        || service_account(pod1).unwrap_or("") != service_account(pod2).unwrap_or("")
        || host_network(pod1) != host_network(pod2)
    {
        return false;
    }

    fn pod_ips(p: &Pod) -> &[PodIP] {
        p.status
            .as_ref()
            .and_then(|s| s.pod_ips.as_deref())
            .unwrap_or_default()
    }
    if pod_ips(pod1) != pod_ips(pod2) {
        return false;
    }

    let empty = BTreeMap::new();
    fn anno<'a>(
        p: &'a Pod,
        empty: &'a BTreeMap<String, String>,
    ) -> &'a BTreeMap<String, String> {
        p.metadata.annotations.as_ref().unwrap_or(empty)
    }
    if !annotations_equal(
        &[annotations::PROXY_VISIBILITY],
        anno(pod1, &empty),
        anno(pod2, &empty),
    ) {
        return false;
    }

    fn labels<'a>(
        p: &'a Pod,
        empty: &'a BTreeMap<String, String>,
    ) -> &'a BTreeMap<String, String> {
        p.metadata.labels.as_ref().unwrap_or(empty)
    }
    if labels(pod1, &empty) != labels(pod2, &empty) {
        return false;
    }

    fn containers(p: &Pod) -> &[Container] {
        p.spec
            .as_ref()
            .map(|s| s.containers.as_slice())
            .unwrap_or_default()
    }
    let (c1, c2) = (containers(pod1), containers(pod2));
    c1.len() == c2.len() && c1.iter().zip(c2).all(|(a, b)| pod_containers_equal(a, b))
}

/// Whether two containers match on name, image, and the ordered list of
/// volume-mount paths.
pub fn pod_containers_equal(c1: &Container, c2: &Container) -> bool {
    if c1.name != c2.name
        || c1.image.as_deref().unwrap_or("") != c2.image.as_deref().unwrap_or("")
    {
        return false;
    }

    let mounts1 = c1.volume_mounts.as_deref().unwrap_or_default();
    let mounts2 = c2.volume_mounts.as_deref().unwrap_or_default();
    mounts1.len() == mounts2.len()
        && mounts1
            .iter()
            .zip(mounts2)
            .all(|(m1, m2)| m1.mount_path == m2.mount_path)
}

/// Whether two taints name the same key and effect.
pub fn taint_match(t1: &Taint, t2: &Taint) -> bool {
    t1.key == t2.key && t1.effect == t2.effect
}

/// Name, datapath annotations, and taints.
///
/// Taints are compared by position: same length, and at each index the
/// key/effect must match along with the value and the added timestamp.
/// Reordering taints therefore counts as a change: chosen semantics, kept
/// simple on purpose.
pub fn node(node1: &SlimNode, node2: &SlimNode) -> bool {
    if node1.name != node2.name {
        return false;
    }

    if !annotations_equal(
        annotations::NODE_RELEVANT,
        &node1.annotations,
        &node2.annotations,
    ) {
        return false;
    }

    node1.taints.len() == node2.taints.len()
        && node1.taints.iter().zip(&node2.taints).all(|(t1, t2)| {
            taint_match(t1, t2)
                && t1.value.as_deref().unwrap_or("") == t2.value.as_deref().unwrap_or("")
                && t1.time_added == t2.time_added
        })
}

/// Name and labels; namespace annotations carry nothing the agents read.
pub fn namespace(ns1: &SlimNamespace, ns2: &SlimNamespace) -> bool {
    ns1.name == ns2.name && ns1.labels == ns2.labels
}
