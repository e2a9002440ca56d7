//! Cluster lifecycle services
//!
//! All cluster state is read back from the runtime on every call.

pub mod inspect;
pub mod provision;
pub mod reaper;

pub use inspect::{ClusterInfo, list_clusters};
pub use provision::{ClusterRequest, ProvisionedCluster, Provisioner, ValidationPolicy};
pub use reaper::{Outcome, TeardownReport, delete_cluster};
