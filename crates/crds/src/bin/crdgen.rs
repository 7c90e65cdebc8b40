//! Prints the MeshOps CRD manifests as multi-document YAML, suitable for
//! `kubectl apply -f -`.

use kube::CustomResourceExt;

fn main() -> Result<(), serde_yaml::Error> {
    let manifests = [
        serde_yaml::to_string(&crds::MeshNetworkPolicy::crd())?,
        serde_yaml::to_string(&crds::ClusterMeshNetworkPolicy::crd())?,
        serde_yaml::to_string(&crds::MeshEndpoint::crd())?,
        serde_yaml::to_string(&crds::MeshNode::crd())?,
    ];
    for manifest in manifests {
        println!("---");
        print!("{manifest}");
    }
    Ok(())
}
