// Library crate for kinc - cluster lifecycle on top of a container runtime CLI
pub mod cli_types;
pub mod commands;
pub mod config_manager;
pub mod error;
pub mod naming;
pub mod runtime;
pub mod services;
pub mod utils;

pub use cli_types::{Cli, Commands};
pub use commands::handle_command;
pub use error::{ClusterError, RuntimeError};
