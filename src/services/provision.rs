//! Provision Service
//!
//! Creates a cluster's network, then its control-plane nodes, then its
//! workers. Each step needs the previous one, so the first failure stops the
//! run. Nodes created before a failure are left running; `delete cluster`
//! cleans them up.

use crate::error::{ClusterError, RuntimeError};
use crate::naming::{self, NodeRole};
use crate::runtime::{ContainerRuntime, ContainerSpec};
use std::path::PathBuf;

pub const DEFAULT_IMAGE: &str = "kindest/node:v1.31.2";

/// Input for `create cluster`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRequest {
    pub name: String,
    pub image: String,
    pub control_plane_nodes: usize,
    pub worker_nodes: usize,
    /// kind-style config file; accepted but not interpreted
    pub config: Option<PathBuf>,
}

impl Default for ClusterRequest {
    fn default() -> Self {
        Self {
            name: naming::DEFAULT_CLUSTER_NAME.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            control_plane_nodes: 1,
            worker_nodes: 0,
            config: None,
        }
    }
}

/// Checks applied to a request before anything is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub allow_zero_control_plane: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            allow_zero_control_plane: true,
        }
    }
}

impl ClusterRequest {
    pub fn validate(&self, policy: &ValidationPolicy) -> Result<(), ClusterError> {
        if self.name.trim().is_empty() {
            return Err(ClusterError::InvalidRequest(
                "cluster name cannot be empty".to_string(),
            ));
        }
        if self.image.trim().is_empty() {
            return Err(ClusterError::InvalidRequest(
                "node image cannot be empty".to_string(),
            ));
        }
        if self.control_plane_nodes == 0 && !policy.allow_zero_control_plane {
            return Err(ClusterError::InvalidRequest(
                "at least one control-plane node is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Every node name in creation order
    pub fn node_names(&self) -> Vec<(String, NodeRole)> {
        let control_planes = (0..self.control_plane_nodes).map(|i| {
            (
                naming::control_plane_name(&self.name, i, self.control_plane_nodes),
                NodeRole::ControlPlane,
            )
        });
        let workers =
            (0..self.worker_nodes).map(|i| (naming::worker_name(&self.name, i), NodeRole::Worker));
        control_planes.chain(workers).collect()
    }
}

/// What a successful create produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedCluster {
    pub name: String,
    pub network: String,
    pub network_reused: bool,
    pub nodes: Vec<String>,
}

pub struct Provisioner<'a, R: ContainerRuntime> {
    runtime: &'a R,
    policy: ValidationPolicy,
}

impl<'a, R: ContainerRuntime> Provisioner<'a, R> {
    pub fn new(runtime: &'a R, policy: ValidationPolicy) -> Self {
        Self { runtime, policy }
    }

    pub fn create_cluster(
        &self,
        request: &ClusterRequest,
    ) -> Result<ProvisionedCluster, ClusterError> {
        request.validate(&self.policy)?;
        self.runtime.is_available()?;

        let network = naming::network_name(&request.name);
        let network_reused = self.ensure_network(&network)?;

        let mut nodes = Vec::with_capacity(request.control_plane_nodes + request.worker_nodes);
        for (node, role) in request.node_names() {
            self.create_node(&node, role, &network, &request.image)?;
            nodes.push(node);
        }

        Ok(ProvisionedCluster {
            name: request.name.clone(),
            network,
            network_reused,
            nodes,
        })
    }

    /// Returns true when an existing network was reused
    fn ensure_network(&self, network: &str) -> Result<bool, ClusterError> {
        if self.runtime.network_exists(network) {
            println!("Network {} already exists, reusing...", network);
            return Ok(true);
        }

        self.runtime
            .create_network(network)
            .map_err(|source| ClusterError::NetworkCreation {
                network: network.to_string(),
                source,
            })?;
        println!("✓ Created network: {}", network);
        Ok(false)
    }

    fn create_node(
        &self,
        node: &str,
        role: NodeRole,
        network: &str,
        image: &str,
    ) -> Result<(), ClusterError> {
        let label = role_label(role);
        println!("Creating {} node: {}", label, node);

        let spec = ContainerSpec::node(node, network, image);
        self.runtime
            .create_container(&spec)
            .map_err(|source: RuntimeError| ClusterError::NodeCreation {
                node: node.to_string(),
                role,
                source,
            })?;

        println!("✓ Created {} node: {}", label, node);
        Ok(())
    }
}

fn role_label(role: NodeRole) -> &'static str {
    match role {
        NodeRole::ControlPlane => "control plane",
        NodeRole::Worker => "worker",
    }
}
