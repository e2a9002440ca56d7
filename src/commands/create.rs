use crate::runtime::ContainerRuntime;
use crate::services::{ClusterRequest, ProvisionedCluster, Provisioner, ValidationPolicy};
use anyhow::{Context, Result};

/// Handle `create cluster`
pub fn handle_create_cluster<R: ContainerRuntime>(
    runtime: &R,
    request: &ClusterRequest,
    policy: ValidationPolicy,
) -> Result<ProvisionedCluster> {
    println!("Creating cluster '{}'...", request.name);
    println!("Using image: {}", request.image);
    println!("Control plane nodes: {}", request.control_plane_nodes);
    println!("Worker nodes: {}", request.worker_nodes);

    if let Some(ref path) = request.config {
        println!(
            "Warning: config file {} is accepted but not applied",
            path.display()
        );
    }

    let cluster = Provisioner::new(runtime, policy)
        .create_cluster(request)
        .with_context(|| format!("Failed to create cluster '{}'", request.name))?;

    println!("✓ Cluster '{}' created successfully!", cluster.name);
    println!("You can now use kubectl to interact with your cluster:");
    println!("  kubectl cluster-info --context {}", cluster.network);

    Ok(cluster)
}
