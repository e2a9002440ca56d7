//! Error types for runtime and cluster operations

use crate::naming::NodeRole;
use thiserror::Error;

/// Errors surfaced by a container runtime client
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The runtime executable could not be invoked at all
    #[error("{runtime} is required but not available: {reason}")]
    Unavailable { runtime: String, reason: String },

    /// A runtime command exited non-zero; `output` is combined stdout/stderr
    #[error("`{command}` failed, output: {output}")]
    Operation { command: String, output: String },

    /// The resource to act on does not exist
    #[error("{kind} {name} not found")]
    NotFound { kind: String, name: String },

    /// Listing resources failed at the invocation level
    #[error("failed to list resources with `{command}`: {reason}")]
    Discovery { command: String, reason: String },
}

/// Errors surfaced by the cluster orchestrators
#[derive(Error, Debug)]
pub enum ClusterError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("invalid cluster request: {0}")]
    InvalidRequest(String),

    #[error("failed to create network {network}: {source}")]
    NetworkCreation {
        network: String,
        #[source]
        source: RuntimeError,
    },

    #[error("failed to create {role} node {node}: {source}")]
    NodeCreation {
        node: String,
        role: NodeRole,
        #[source]
        source: RuntimeError,
    },
}

impl ClusterError {
    /// Name of the resource whose creation failed, if any
    pub fn failed_resource(&self) -> Option<&str> {
        match self {
            ClusterError::NetworkCreation { network, .. } => Some(network.as_str()),
            ClusterError::NodeCreation { node, .. } => Some(node.as_str()),
            _ => None,
        }
    }
}
