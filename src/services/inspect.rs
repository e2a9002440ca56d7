//! Cluster listing

use crate::error::RuntimeError;
use crate::naming::{self, NodeRole};
use crate::runtime::{ContainerRecord, ContainerRuntime};
use serde::Serialize;

/// One node container as reported by the runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterInfo {
    /// Container name as the runtime reports it
    pub name: String,
    pub status: String,
    pub role: NodeRole,
    pub age: String,
}

/// Snapshot of every kinc node container across all clusters.
///
/// Rows come back in runtime order. Records with fewer than three fields and
/// containers whose names are not kinc node names are dropped.
pub fn list_clusters<R: ContainerRuntime>(runtime: &R) -> Result<Vec<ClusterInfo>, RuntimeError> {
    runtime.is_available()?;

    let records = runtime.list_containers(None)?;
    Ok(records
        .iter()
        .filter_map(|line| ContainerRecord::parse(line))
        .filter(|record| naming::parse_node_name(&record.name).is_some())
        .map(|record| ClusterInfo {
            role: naming::classify_role(&record.name),
            name: record.name,
            status: record.status,
            age: record.created,
        })
        .collect())
}
