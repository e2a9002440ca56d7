//! Cluster teardown
//!
//! Removes every container and the network belonging to a cluster. One
//! resource failing to go away never stops the rest from being attempted;
//! each resource gets its own [`Outcome`] in the returned report.

use crate::error::{ClusterError, RuntimeError};
use crate::naming;
use crate::runtime::{ContainerRuntime, record_name};
use std::fmt;

/// Result of trying to remove one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Removed,
    /// Nothing to remove
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Container,
    Network,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Container => f.write_str("container"),
            ResourceKind::Network => f.write_str("network"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceOutcome {
    pub kind: ResourceKind,
    pub name: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownReport {
    pub cluster: String,
    pub resources: Vec<ResourceOutcome>,
}

impl TeardownReport {
    pub fn containers(&self) -> impl Iterator<Item = &ResourceOutcome> {
        self.resources
            .iter()
            .filter(|r| r.kind == ResourceKind::Container)
    }

    pub fn network(&self) -> Option<&ResourceOutcome> {
        self.resources
            .iter()
            .find(|r| r.kind == ResourceKind::Network)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ResourceOutcome> {
        self.resources
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Failed(_)))
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Names of the containers that belong to `cluster`, in runtime order
pub fn cluster_containers<R: ContainerRuntime>(
    runtime: &R,
    cluster: &str,
) -> Result<Vec<String>, RuntimeError> {
    let prefix = naming::container_prefix(cluster);
    let records = runtime.list_containers(Some(&prefix))?;
    // The runtime's name filter matches anywhere in the name. Only node
    // containers are ours here; `kinc-<cluster>*` names are other clusters.
    Ok(records
        .iter()
        .filter_map(|line| record_name(line))
        .filter(|name| name.starts_with(&prefix))
        .map(str::to_string)
        .collect())
}

/// Delete everything belonging to `cluster`.
///
/// Only an empty cluster name, an unavailable runtime or a failed container
/// listing is an error; removal failures are recorded in the report.
pub fn delete_cluster<R: ContainerRuntime>(
    runtime: &R,
    cluster: &str,
) -> Result<TeardownReport, ClusterError> {
    // An empty name makes the prefix "-", which matches every node container
    if cluster.trim().is_empty() {
        return Err(ClusterError::InvalidRequest(
            "cluster name cannot be empty".to_string(),
        ));
    }
    runtime.is_available()?;

    let containers = cluster_containers(runtime, cluster)?;
    tracing::debug!(cluster, count = containers.len(), "discovered containers");

    let mut resources = Vec::with_capacity(containers.len() + 1);
    for name in containers {
        let outcome = remove_container(runtime, &name);
        report(ResourceKind::Container, &name, &outcome);
        resources.push(ResourceOutcome {
            kind: ResourceKind::Container,
            name,
            outcome,
        });
    }

    let network = naming::network_name(cluster);
    let outcome = remove_network(runtime, &network);
    report(ResourceKind::Network, &network, &outcome);
    resources.push(ResourceOutcome {
        kind: ResourceKind::Network,
        name: network,
        outcome,
    });

    Ok(TeardownReport {
        cluster: cluster.to_string(),
        resources,
    })
}

fn remove_container<R: ContainerRuntime>(runtime: &R, name: &str) -> Outcome {
    // Already stopped containers fail to stop
    if let Err(e) = runtime.stop_container(name) {
        tracing::debug!(container = name, error = %e, "stop failed, removing anyway");
    }

    match runtime.remove_container(name, true) {
        Ok(()) => Outcome::Removed,
        Err(e) => Outcome::Failed(e.to_string()),
    }
}

fn remove_network<R: ContainerRuntime>(runtime: &R, network: &str) -> Outcome {
    match runtime.remove_network(network) {
        Ok(()) => Outcome::Removed,
        Err(RuntimeError::NotFound { .. }) => Outcome::Skipped,
        Err(e) => Outcome::Failed(e.to_string()),
    }
}

fn report(kind: ResourceKind, name: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Removed => println!("✓ Removed {}: {}", kind, name),
        Outcome::Skipped => println!("  No {} {} to remove", kind, name),
        Outcome::Failed(reason) => {
            println!("Warning: failed to remove {} {}: {}", kind, name, reason)
        }
    }
}
