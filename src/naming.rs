//! Cluster resource naming
//!
//! kinc keeps no state of its own. Every network and container belonging to a
//! cluster is found again by name, so these functions are the only record of
//! which resources make up a cluster.
//!
//! Layout for a cluster called `demo`:
//!
//! ```text
//! network         kinc-demo
//! control plane   demo-control-plane          (exactly one control-plane node)
//!                 demo-control-plane-1 .. N   (more than one)
//! workers         demo-worker-1 .. M          (always numbered)
//! ```

use serde::Serialize;
use std::fmt;

pub const DEFAULT_CLUSTER_NAME: &str = "kinc";

/// Prefix shared by every cluster network
pub const NETWORK_PREFIX: &str = "kinc-";

const CONTROL_PLANE_MARKER: &str = "control-plane";
const WORKER_MARKER: &str = "worker";

/// Role a node container plays in its cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeRole {
    ControlPlane,
    Worker,
}

impl NodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::ControlPlane => CONTROL_PLANE_MARKER,
            NodeRole::Worker => WORKER_MARKER,
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node container name split back into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeName {
    pub cluster: String,
    pub role: NodeRole,
    /// 1-based index; `None` for the unnumbered single control-plane node
    pub index: Option<usize>,
}

pub fn network_name(cluster: &str) -> String {
    format!("{}{}", NETWORK_PREFIX, cluster)
}

/// Prefix every node container of `cluster` starts with
pub fn container_prefix(cluster: &str) -> String {
    format!("{}-", cluster)
}

/// Name of the control-plane node at zero-based `index` out of `total`.
///
/// A cluster with exactly one control-plane node gets the bare
/// `<cluster>-control-plane` name; larger sets are numbered from 1.
pub fn control_plane_name(cluster: &str, index: usize, total: usize) -> String {
    if total == 1 {
        format!("{}-{}", cluster, CONTROL_PLANE_MARKER)
    } else {
        format!("{}-{}-{}", cluster, CONTROL_PLANE_MARKER, index + 1)
    }
}

/// Name of the worker node at zero-based `index`. Workers are numbered from 1
/// even when there is only one.
pub fn worker_name(cluster: &str, index: usize) -> String {
    format!("{}-{}-{}", cluster, WORKER_MARKER, index + 1)
}

/// Classify a container by substring match.
///
/// Any name containing `control-plane` is a control-plane node, everything
/// else is a worker. A cluster whose own name contains `control-plane` will
/// therefore report all of its workers as control-plane nodes.
pub fn classify_role(resource_name: &str) -> NodeRole {
    if resource_name.contains(CONTROL_PLANE_MARKER) {
        NodeRole::ControlPlane
    } else {
        NodeRole::Worker
    }
}

/// Whether a network or container name belongs to `cluster`.
///
/// Plain prefix matching: the containers of cluster `demo-x` also match
/// cluster `demo`.
pub fn belongs_to_cluster(resource_name: &str, cluster: &str) -> bool {
    resource_name.starts_with(&container_prefix(cluster))
        || resource_name.starts_with(&network_name(cluster))
}

/// Recover cluster, role and index from a node container name.
///
/// Returns `None` for names that could not have been produced by
/// [`control_plane_name`] or [`worker_name`].
pub fn parse_node_name(name: &str) -> Option<NodeName> {
    let single = format!("-{}", CONTROL_PLANE_MARKER);
    if let Some(cluster) = name.strip_suffix(&single) {
        return node(cluster, NodeRole::ControlPlane, None);
    }

    let (head, index) = name.rsplit_once('-')?;
    let index: usize = index.parse().ok().filter(|i| *i >= 1)?;
    if let Some(cluster) = head.strip_suffix(&single) {
        return node(cluster, NodeRole::ControlPlane, Some(index));
    }
    if let Some(cluster) = head.strip_suffix(&format!("-{}", WORKER_MARKER)) {
        return node(cluster, NodeRole::Worker, Some(index));
    }
    None
}

fn node(cluster: &str, role: NodeRole, index: Option<usize>) -> Option<NodeName> {
    if cluster.is_empty() {
        return None;
    }
    Some(NodeName {
        cluster: cluster.to_string(),
        role,
        index,
    })
}
