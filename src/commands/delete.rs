use crate::runtime::ContainerRuntime;
use crate::services::{TeardownReport, delete_cluster};
use anyhow::{Context, Result};

/// Handle `delete cluster`. Removal failures are printed as warnings and do
/// not fail the command.
pub fn handle_delete_cluster<R: ContainerRuntime>(
    runtime: &R,
    name: &str,
) -> Result<TeardownReport> {
    println!("Deleting cluster '{}'...", name);

    let report = delete_cluster(runtime, name)
        .with_context(|| format!("Failed to delete cluster '{}'", name))?;

    if report.containers().next().is_none() {
        println!("No containers found for cluster '{}'", name);
    }

    let failures = report.failures().count();
    if failures > 0 {
        println!(
            "Warning: {} resource(s) of cluster '{}' could not be removed",
            failures, name
        );
    }
    println!("✓ Cluster '{}' deleted successfully!", name);

    Ok(report)
}
