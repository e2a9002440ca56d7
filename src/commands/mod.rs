// Command module routing
//
// To add a new command:
// 1. Create a new file in this directory (e.g., `mycommand.rs`)
// 2. Add `pub mod mycommand;` below
// 3. Add the match arm in `handle_command` function

pub mod create;
pub mod delete;
pub mod get;

use crate::cli_types::{Commands, CreateCommands, DeleteCommands, GetCommands};
use crate::config_manager::KincConfig;
use crate::runtime::PodmanRuntime;
use anyhow::Result;

/// Dispatch command to appropriate handler
///
/// `runtime_override` comes from the global `--runtime` flag and wins over
/// the config file.
pub fn handle_command(
    command: Commands,
    config: &KincConfig,
    runtime_override: Option<&str>,
) -> Result<()> {
    let runtime = PodmanRuntime::new(runtime_override.unwrap_or(&config.runtime));

    match command {
        Commands::Create {
            command:
                CreateCommands::Cluster {
                    name,
                    image,
                    control_plane_nodes,
                    worker_nodes,
                    config: kind_config,
                },
        } => {
            let request = crate::services::ClusterRequest {
                name,
                image: image.unwrap_or_else(|| config.image.clone()),
                control_plane_nodes,
                worker_nodes,
                config: kind_config,
            };
            create::handle_create_cluster(&runtime, &request, config.validation_policy())?;
        }
        Commands::Delete {
            command: DeleteCommands::Cluster { name },
        } => {
            delete::handle_delete_cluster(&runtime, &name)?;
        }
        Commands::Get {
            command: GetCommands::Clusters { output },
        } => {
            get::handle_get_clusters(&runtime, output)?;
        }
    }
    Ok(())
}
