use crate::cli_types::OutputFormat;
use crate::runtime::ContainerRuntime;
use crate::services::{ClusterInfo, list_clusters};
use anyhow::{Context, Result};

const HEADERS: [&str; 4] = ["NAME", "STATUS", "ROLE", "AGE"];
const COLUMN_PADDING: usize = 2;

/// Handle `get clusters`
pub fn handle_get_clusters<R: ContainerRuntime>(runtime: &R, output: OutputFormat) -> Result<()> {
    let clusters = list_clusters(runtime).context("Failed to list clusters")?;

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&clusters)?);
        }
        OutputFormat::Table => {
            if clusters.is_empty() {
                println!("No clusters found.");
            } else {
                print!("{}", render_table(&clusters));
            }
        }
    }
    Ok(())
}

/// Left-aligned columns separated by at least two spaces
pub fn render_table(clusters: &[ClusterInfo]) -> String {
    let rows: Vec<[&str; 4]> = std::iter::once(HEADERS)
        .chain(
            clusters
                .iter()
                .map(|c| [c.name.as_str(), c.status.as_str(), c.role.as_str(), c.age.as_str()]),
        )
        .collect();

    let mut widths = [0usize; 4];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let last = row.len() - 1;
        for (i, cell) in row.iter().enumerate() {
            if i == last {
                out.push_str(cell);
            } else {
                out.push_str(&format!("{:<width$}", cell, width = widths[i] + COLUMN_PADDING));
            }
        }
        out.push('\n');
    }
    out
}
