//! Unit tests for the per-kind equality rules.

use crate::annotations;
use crate::equal;
use crate::kind::{Kind, KindRegistry};
use crate::raw::{RawEvent, RawObject};
use crate::service::{NodeAddressing, ServiceId, ServiceInfo, ServiceParser, ServicePortInfo};
use crate::slim::{
    Normalized, SlimEndpointSlice, SlimMeshEndpoint, SlimNamespace, SlimNetworkPolicy, SlimNode,
    SlimPolicy, SlimService,
};
use crds::{MeshEndpointStatus, MeshNode, MeshNodeSpec, PolicyRule};
use k8s_openapi::api::core::v1::{
    Container, EnvVar, Namespace, Pod, PodSpec, PodStatus, Service, ServicePort, ServiceSpec,
    Taint, VolumeMount,
};
use k8s_openapi::api::discovery::v1::{Endpoint, EndpointPort};
use k8s_openapi::api::networking::v1::NetworkPolicySpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta, Time};
use std::collections::BTreeMap;

/// Minimal stand-in for the load-balancer's service parser: identity from
/// metadata, info from cluster IP, ports, and selector.
struct StubParser;

impl ServiceParser for StubParser {
    fn parse(&self, svc: &SlimService, _addressing: &NodeAddressing) -> (ServiceId, ServiceInfo) {
        let id = ServiceId {
            name: svc.name.clone(),
            namespace: svc.namespace.clone(),
        };
        let mut info = ServiceInfo::default();
        if let Some(spec) = &svc.spec {
            info.is_headless = spec.cluster_ip.as_deref() == Some("None");
            if !info.is_headless {
                info.frontend_ip = spec.cluster_ip.as_deref().and_then(|ip| ip.parse().ok());
            }
            info.selector = spec.selector.clone().unwrap_or_default();
            for port in spec.ports.as_deref().unwrap_or_default() {
                info.ports.insert(
                    port.name.clone().unwrap_or_default(),
                    ServicePortInfo {
                        protocol: port.protocol.clone().unwrap_or_else(|| "TCP".to_string()),
                        port: u16::try_from(port.port).unwrap_or_default(),
                    },
                );
            }
        }
        (id, info)
    }
}

fn registry() -> KindRegistry<StubParser> {
    KindRegistry::new(StubParser, NodeAddressing::default())
}

fn service(name: &str, namespace: &str) -> Service {
    Service {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            annotations: Some(BTreeMap::new()),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            cluster_ip: Some("10.96.0.12".to_string()),
            selector: Some(BTreeMap::from([("app".to_string(), "web".to_string())])),
            ports: Some(vec![ServicePort {
                name: Some("http".to_string()),
                port: 80,
                protocol: Some("TCP".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        status: None,
    }
}

fn normalize_service(svc: Service) -> SlimService {
    match Kind::Service
        .normalize(RawEvent::Object(RawObject::Service(Box::new(svc))))
        .into_object()
    {
        Some(Normalized::Service(slim)) => slim,
        other => panic!("expected a normalized Service, got {other:?}"),
    }
}

fn pod(pod_ip: &str) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some("web-1".to_string()),
            namespace: Some("prod".to_string()),
            labels: Some(BTreeMap::from([("app".to_string(), "web".to_string())])),
            ..Default::default()
        },
        spec: Some(PodSpec {
            service_account_name: Some("web".to_string()),
            host_network: Some(false),
            containers: vec![Container {
                name: "web".to_string(),
                image: Some("web:v1".to_string()),
                volume_mounts: Some(vec![VolumeMount {
                    mount_path: "/data".to_string(),
                    name: "data".to_string(),
                    ..Default::default()
                }]),
                ..Default::default()
            }],
            ..Default::default()
        }),
        status: Some(PodStatus {
            pod_ip: Some(pod_ip.to_string()),
            host_ip: Some("192.0.2.10".to_string()),
            ..Default::default()
        }),
    }
}

fn slim_node(name: &str, taints: Vec<Taint>) -> SlimNode {
    SlimNode {
        name: name.to_string(),
        annotations: BTreeMap::new(),
        addresses: Vec::new(),
        pod_cidr: String::new(),
        pod_cidrs: Vec::new(),
        taints,
    }
}

fn taint(key: &str, value: &str, added_secs: i64) -> Taint {
    Taint {
        key: key.to_string(),
        effect: "NoSchedule".to_string(),
        value: Some(value.to_string()),
        time_added: Some(Time(
            k8s_openapi::chrono::DateTime::from_timestamp(added_secs, 0)
                .unwrap_or_default(),
        )),
    }
}

fn slim_network_policy(pod_label: &str) -> SlimNetworkPolicy {
    SlimNetworkPolicy {
        name: "allow-web".to_string(),
        namespace: "prod".to_string(),
        spec: Some(NetworkPolicySpec {
            pod_selector: Some(LabelSelector {
                match_labels: Some(BTreeMap::from([(
                    "app".to_string(),
                    pod_label.to_string(),
                )])),
                ..Default::default()
            }),
            ..Default::default()
        }),
    }
}

fn slim_endpoint_slice(backend_ip: &str) -> SlimEndpointSlice {
    SlimEndpointSlice {
        name: "web-abc".to_string(),
        namespace: "prod".to_string(),
        endpoints: vec![Endpoint {
            addresses: vec![backend_ip.to_string()],
            ..Default::default()
        }],
        ports: Vec::new(),
    }
}

fn slim_policy(name: &str, annotations: BTreeMap<String, String>) -> SlimPolicy {
    SlimPolicy {
        name: name.to_string(),
        namespace: Some("prod".to_string()),
        annotations,
        rule: Some(PolicyRule::default()),
        rules: Vec::new(),
        status: None,
    }
}

#[test]
fn test_equal_is_reflexive_for_every_kind() {
    let reg = registry();
    let objects = vec![
        Normalized::NetworkPolicy(slim_network_policy("web")),
        Normalized::Service(normalize_service(service("web", "prod"))),
        Normalized::Endpoints(crate::slim::SlimEndpoints {
            name: "web".to_string(),
            namespace: "prod".to_string(),
            subsets: Vec::new(),
        }),
        Normalized::EndpointSlice(slim_endpoint_slice("10.0.1.5")),
        Normalized::Pod(Box::new(pod("10.0.1.5"))),
        Normalized::Node(slim_node("node-1", vec![taint("a", "1", 0)])),
        Normalized::Namespace(SlimNamespace {
            name: "prod".to_string(),
            labels: BTreeMap::new(),
        }),
        Normalized::MeshNetworkPolicy(slim_policy("pol", BTreeMap::new())),
        Normalized::ClusterMeshNetworkPolicy(SlimPolicy {
            namespace: None,
            ..slim_policy("cluster-pol", BTreeMap::new())
        }),
        Normalized::MeshEndpoint(SlimMeshEndpoint {
            name: "web-1".to_string(),
            namespace: "prod".to_string(),
            status: MeshEndpointStatus::default(),
        }),
        Normalized::MeshNode(MeshNode::new("node-1", MeshNodeSpec::default())),
    ];
    for obj in &objects {
        assert!(
            reg.equal(obj, obj),
            "equality must be reflexive for {:?}",
            obj.kind()
        );
    }
}

#[test]
fn test_equal_is_false_across_kinds() {
    let reg = registry();
    let ns = Normalized::Namespace(SlimNamespace {
        name: "prod".to_string(),
        labels: BTreeMap::new(),
    });
    let pod = Normalized::Pod(Box::new(pod("10.0.1.5")));
    assert!(!reg.equal(&ns, &pod));
}

#[test]
fn test_network_policy_spec_change_is_significant() {
    let reg = registry();
    let np1 = slim_network_policy("web");
    let np2 = slim_network_policy("db");
    assert!(!reg.equal(
        &Normalized::NetworkPolicy(np1),
        &Normalized::NetworkPolicy(np2)
    ));
}

#[test]
fn test_endpoint_slice_endpoint_and_port_changes_are_significant() {
    let eps1 = slim_endpoint_slice("10.0.1.5");

    let eps2 = slim_endpoint_slice("10.0.1.6");
    assert!(!equal::endpoint_slice(&eps1, &eps2));

    let mut eps3 = eps1.clone();
    eps3.ports.push(EndpointPort {
        port: Some(8080),
        ..Default::default()
    });
    assert!(!equal::endpoint_slice(&eps1, &eps3));
}

#[test]
fn test_service_unrelated_annotation_churn_is_ignored() {
    let reg = registry();
    let svc1 = normalize_service(service("web", "prod"));

    let mut raw2 = service("web", "prod");
    raw2
        .metadata
        .annotations
        .get_or_insert_with(BTreeMap::new)
        .insert("example.com/team".to_string(), "payments".to_string());
    let svc2 = normalize_service(raw2);

    assert!(
        reg.equal(
            &Normalized::Service(svc1),
            &Normalized::Service(svc2)
        ),
        "an annotation outside the sharing set must not flip equality"
    );
}

#[test]
fn test_service_sharing_annotation_is_significant() {
    let reg = registry();
    let svc1 = normalize_service(service("web", "prod"));

    let mut raw2 = service("web", "prod");
    raw2.metadata
        .annotations
        .get_or_insert_with(BTreeMap::new)
        .insert(annotations::GLOBAL_SERVICE.to_string(), "true".to_string());
    let svc2 = normalize_service(raw2);

    assert!(!reg.equal(&Normalized::Service(svc1), &Normalized::Service(svc2)));
}

#[test]
fn test_service_spec_change_flips_equality_via_parsed_info() {
    let reg = registry();
    let svc1 = normalize_service(service("web", "prod"));

    let mut raw2 = service("web", "prod");
    if let Some(spec) = raw2.spec.as_mut() {
        spec.cluster_ip = Some("10.96.0.99".to_string());
    }
    let svc2 = normalize_service(raw2);

    assert!(!reg.equal(&Normalized::Service(svc1), &Normalized::Service(svc2)));
}

#[test]
fn test_policy_last_applied_config_is_excluded_and_maps_untouched() {
    let reg = registry();
    let anno1 = BTreeMap::from([
        (annotations::LAST_APPLIED_CONFIG.to_string(), "{v1}".to_string()),
        ("team".to_string(), "payments".to_string()),
    ]);
    let anno2 = BTreeMap::from([
        (annotations::LAST_APPLIED_CONFIG.to_string(), "{v2}".to_string()),
        ("team".to_string(), "payments".to_string()),
    ]);
    let pol1 = slim_policy("pol", anno1.clone());
    let pol2 = slim_policy("pol", anno2.clone());

    assert!(
        reg.equal(
            &Normalized::MeshNetworkPolicy(pol1.clone()),
            &Normalized::MeshNetworkPolicy(pol2.clone())
        ),
        "last-applied-config churn must not flip equality"
    );
    // The comparison reads the live cached objects; it must not have
    // touched either annotation map.
    assert_eq!(pol1.annotations, anno1);
    assert_eq!(pol2.annotations, anno2);
}

#[test]
fn test_policy_other_annotations_are_significant() {
    let reg = registry();
    let pol1 = slim_policy(
        "pol",
        BTreeMap::from([("team".to_string(), "payments".to_string())]),
    );
    let pol2 = slim_policy(
        "pol",
        BTreeMap::from([("team".to_string(), "core".to_string())]),
    );
    assert!(!reg.equal(
        &Normalized::MeshNetworkPolicy(pol1),
        &Normalized::MeshNetworkPolicy(pol2)
    ));
}

#[test]
fn test_policy_status_churn_is_ignored() {
    let reg = registry();
    let pol1 = slim_policy("pol", BTreeMap::new());
    let mut pol2 = pol1.clone();
    pol2.status = Some(crds::MeshNetworkPolicyStatus::default());
    assert!(reg.equal(
        &Normalized::MeshNetworkPolicy(pol1),
        &Normalized::MeshNetworkPolicy(pol2)
    ));
}

#[test]
fn test_policy_rule_change_is_significant() {
    let reg = registry();
    let pol1 = slim_policy("pol", BTreeMap::new());
    let mut pol2 = pol1.clone();
    pol2.rule = None;
    assert!(!reg.equal(
        &Normalized::MeshNetworkPolicy(pol1),
        &Normalized::MeshNetworkPolicy(pol2)
    ));
}

#[test]
fn test_node_taint_reordering_is_a_change() {
    let t0 = taint("a", "1", 1_000);
    let t1 = taint("b", "2", 2_000);
    let node1 = slim_node("node-1", vec![t0.clone(), t1.clone()]);
    let node2 = slim_node("node-1", vec![t1, t0]);

    assert!(
        !equal::node(&node1, &node2),
        "taints are compared by position"
    );
}

#[test]
fn test_node_taint_timestamp_is_significant() {
    let node1 = slim_node("node-1", vec![taint("a", "1", 1_000)]);
    let node2 = slim_node("node-1", vec![taint("a", "1", 2_000)]);
    assert!(!equal::node(&node1, &node2));
}

#[test]
fn test_node_relevant_annotation_is_significant_and_others_ignored() {
    let mut node1 = slim_node("node-1", Vec::new());
    let mut node2 = slim_node("node-1", Vec::new());

    node1
        .annotations
        .insert("unrelated".to_string(), "x".to_string());
    assert!(
        equal::node(&node1, &node2),
        "annotations outside the allow-list must be ignored"
    );

    node2.annotations.insert(
        annotations::HOST_IPV4.to_string(),
        "192.0.2.10".to_string(),
    );
    assert!(!equal::node(&node1, &node2));
}

#[test]
fn test_pod_env_var_change_is_irrelevant() {
    let pod1 = pod("10.0.1.5");
    let mut pod2 = pod("10.0.1.5");
    if let Some(spec) = pod2.spec.as_mut() {
        spec.containers[0].env = Some(vec![EnvVar {
            name: "LOG_LEVEL".to_string(),
            value: Some("debug".to_string()),
            ..Default::default()
        }]);
    }
    assert!(
        equal::pod(&pod1, &pod2),
        "env vars are outside the relevant-field set"
    );
}

#[test]
fn test_pod_ip_change_is_significant() {
    assert!(!equal::pod(&pod("10.0.1.5"), &pod("10.0.1.6")));
}

#[test]
fn test_pod_container_image_and_mounts_are_significant() {
    let pod1 = pod("10.0.1.5");

    let mut pod2 = pod1.clone();
    if let Some(spec) = pod2.spec.as_mut() {
        spec.containers[0].image = Some("web:v2".to_string());
    }
    assert!(!equal::pod(&pod1, &pod2));

    let mut pod3 = pod1.clone();
    if let Some(spec) = pod3.spec.as_mut() {
        if let Some(mounts) = spec.containers[0].volume_mounts.as_mut() {
            mounts[0].mount_path = "/other".to_string();
        }
    }
    assert!(!equal::pod(&pod1, &pod3));
}

#[test]
fn test_pod_proxy_visibility_annotation_is_significant() {
    let pod1 = pod("10.0.1.5");
    let mut pod2 = pod1.clone();
    pod2.metadata
        .annotations
        .get_or_insert_with(BTreeMap::new)
        .insert(
            annotations::PROXY_VISIBILITY.to_string(),
            "<Ingress/80/TCP/HTTP>".to_string(),
        );
    assert!(!equal::pod(&pod1, &pod2));
}

#[test]
fn test_namespace_annotations_are_irrelevant_labels_are_not() {
    let reg = registry();
    let raw = |note: &str| Namespace {
        metadata: ObjectMeta {
            name: Some("prod".to_string()),
            labels: Some(BTreeMap::from([("env".to_string(), "prod".to_string())])),
            annotations: Some(BTreeMap::from([("note".to_string(), note.to_string())])),
            ..Default::default()
        },
        ..Default::default()
    };
    let normalize = |ns: Namespace| {
        match Kind::Namespace
            .normalize(RawEvent::Object(RawObject::Namespace(ns)))
            .into_object()
        {
            Some(obj) => obj,
            None => panic!("expected a normalized Namespace"),
        }
    };

    let ns1 = normalize(raw("alpha"));
    let ns2 = normalize(raw("beta"));
    assert!(
        reg.equal(&ns1, &ns2),
        "annotation churn must not flip equality"
    );

    let mut raw3 = raw("alpha");
    raw3.metadata
        .labels
        .get_or_insert_with(BTreeMap::new)
        .insert("tier".to_string(), "1".to_string());
    assert!(!reg.equal(&ns1, &normalize(raw3)));
}

#[test]
fn test_annotations_equal_treats_absent_as_empty() {
    let with_empty = BTreeMap::from([(annotations::HOST_IPV4.to_string(), String::new())]);
    let absent = BTreeMap::new();
    assert!(
        equal::annotations_equal(&[annotations::HOST_IPV4], &with_empty, &absent),
        "absent and present-but-empty must compare equal"
    );
}

#[test]
fn test_endpoints_subset_change_is_significant() {
    let reg = registry();
    let ep1 = crate::slim::SlimEndpoints {
        name: "web".to_string(),
        namespace: "prod".to_string(),
        subsets: Vec::new(),
    };
    let mut ep2 = ep1.clone();
    ep2.subsets.push(k8s_openapi::api::core::v1::EndpointSubset {
        addresses: Some(vec![k8s_openapi::api::core::v1::EndpointAddress {
            ip: "10.0.1.5".to_string(),
            ..Default::default()
        }]),
        ..Default::default()
    });
    assert!(reg.equal(
        &Normalized::Endpoints(ep1.clone()),
        &Normalized::Endpoints(ep1.clone())
    ));
    assert!(!reg.equal(&Normalized::Endpoints(ep1), &Normalized::Endpoints(ep2)));
}
