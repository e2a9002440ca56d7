// CLI types for the kinc binary

use crate::naming::DEFAULT_CLUSTER_NAME;
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kinc")]
#[command(version)]
#[command(
    about = "kinc is a tool for running Kubernetes clusters in containers using podman",
    long_about = "kinc (Kubernetes in Container) runs multi-node Kubernetes clusters in \
podman containers with systemd support.\n\nIt creates, lists and deletes local clusters \
for development and testing."
)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Container runtime executable (defaults to the config file, then podman)
    #[arg(long, global = true, value_name = "BIN")]
    pub runtime: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create kinc resources
    Create {
        #[command(subcommand)]
        command: CreateCommands,
    },
    /// Delete kinc resources
    Delete {
        #[command(subcommand)]
        command: DeleteCommands,
    },
    /// Get information about kinc resources
    Get {
        #[command(subcommand)]
        command: GetCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CreateCommands {
    /// Create a new Kubernetes cluster
    Cluster {
        /// Cluster name
        #[arg(
            default_value = DEFAULT_CLUSTER_NAME,
            value_parser = NonEmptyStringValueParser::new()
        )]
        name: String,
        /// Node image to use for booting the cluster (defaults to kindest/node:v1.31.2)
        #[arg(short, long)]
        image: Option<String>,
        /// Number of control-plane nodes in the cluster
        #[arg(long, default_value_t = 1)]
        control_plane_nodes: usize,
        /// Number of worker nodes in the cluster
        #[arg(short, long, default_value_t = 0)]
        worker_nodes: usize,
        /// Path to a kind config file (accepted, currently ignored)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DeleteCommands {
    /// Delete a Kubernetes cluster and its network
    Cluster {
        /// Cluster name
        #[arg(
            default_value = DEFAULT_CLUSTER_NAME,
            value_parser = NonEmptyStringValueParser::new()
        )]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum GetCommands {
    /// List all cluster nodes
    Clusters {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_root_command() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "kinc");
        assert!(cmd.get_about().is_some());
        assert!(cmd.get_long_about().is_some());

        let names: Vec<&str> = cmd.get_subcommands().map(|c| c.get_name()).collect();
        for expected in ["create", "delete", "get"] {
            assert!(names.contains(&expected), "missing command {}", expected);
        }
    }

    #[test]
    fn test_create_defaults() {
        let cli = Cli::try_parse_from(["kinc", "create", "cluster"]).unwrap();
        match cli.command {
            Commands::Create {
                command:
                    CreateCommands::Cluster {
                        name,
                        image,
                        control_plane_nodes,
                        worker_nodes,
                        config,
                    },
            } => {
                assert_eq!(name, "kinc");
                assert!(image.is_none());
                assert_eq!(control_plane_nodes, 1);
                assert_eq!(worker_nodes, 0);
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_create_with_flags() {
        let cli = Cli::try_parse_from([
            "kinc",
            "create",
            "cluster",
            "demo",
            "-i",
            "kindest/node:v1.30.0",
            "--control-plane-nodes",
            "3",
            "-w",
            "2",
            "--config",
            "kind.yaml",
        ])
        .unwrap();
        match cli.command {
            Commands::Create {
                command:
                    CreateCommands::Cluster {
                        name,
                        image,
                        control_plane_nodes,
                        worker_nodes,
                        config,
                    },
            } => {
                assert_eq!(name, "demo");
                assert_eq!(image.as_deref(), Some("kindest/node:v1.30.0"));
                assert_eq!(control_plane_nodes, 3);
                assert_eq!(worker_nodes, 2);
                assert_eq!(config, Some(PathBuf::from("kind.yaml")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_negative_counts_are_rejected() {
        assert!(Cli::try_parse_from(["kinc", "create", "cluster", "-w", "-1"]).is_err());
    }

    #[test]
    fn test_delete_default_name() {
        let cli = Cli::try_parse_from(["kinc", "delete", "cluster"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Delete {
                command: DeleteCommands::Cluster { ref name }
            } if name == "kinc"
        ));
    }

    #[test]
    fn test_empty_cluster_name_is_rejected() {
        assert!(Cli::try_parse_from(["kinc", "delete", "cluster", ""]).is_err());
        assert!(Cli::try_parse_from(["kinc", "create", "cluster", ""]).is_err());
    }

    #[test]
    fn test_get_clusters_output() {
        let cli = Cli::try_parse_from(["kinc", "get", "clusters"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Get {
                command: GetCommands::Clusters {
                    output: OutputFormat::Table
                }
            }
        ));

        let cli = Cli::try_parse_from([
            "kinc",
            "--runtime",
            "podman-remote",
            "get",
            "clusters",
            "-o",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.runtime.as_deref(), Some("podman-remote"));
        assert!(matches!(
            cli.command,
            Commands::Get {
                command: GetCommands::Clusters {
                    output: OutputFormat::Json
                }
            }
        ));
    }
}
