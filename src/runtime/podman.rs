//! Podman CLI backend
//!
//! Every operation spawns the runtime executable and waits for it. Any binary
//! that accepts podman's `network exists` and `ps --format` syntax works.

use super::{ContainerRuntime, ContainerSpec};
use crate::error::RuntimeError;
use crate::utils::exec::{combined_output, display_command, local};
use std::process::Output;

pub const DEFAULT_RUNTIME: &str = "podman";

/// Go template for `ps --format`, one tab-delimited record per container
pub const LIST_FORMAT: &str = "{{.Names}}\t{{.Status}}\t{{.CreatedHuman}}";

#[derive(Debug, Clone)]
pub struct PodmanRuntime {
    binary: String,
}

impl PodmanRuntime {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Spawn the runtime. Only a failure to start the process is an error here.
    fn run(&self, args: &[&str]) -> Result<Output, RuntimeError> {
        local::execute(&self.binary, args).map_err(|e| RuntimeError::Unavailable {
            runtime: self.binary.clone(),
            reason: format!("{:#}", e),
        })
    }

    /// Spawn the runtime and turn a non-zero exit into an operation error
    fn run_checked(&self, args: &[&str]) -> Result<Output, RuntimeError> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(RuntimeError::Operation {
                command: display_command(&self.binary, args),
                output: combined_output(&output),
            });
        }
        Ok(output)
    }
}

impl Default for PodmanRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME)
    }
}

impl ContainerRuntime for PodmanRuntime {
    fn name(&self) -> &str {
        &self.binary
    }

    fn is_available(&self) -> Result<(), RuntimeError> {
        if !local::check_command_exists(&self.binary) {
            return Err(RuntimeError::Unavailable {
                runtime: self.binary.clone(),
                reason: "executable not found in PATH".to_string(),
            });
        }
        self.run_checked(&["--version"])
            .map(|_| ())
            .map_err(|e| RuntimeError::Unavailable {
                runtime: self.binary.clone(),
                reason: e.to_string(),
            })
    }

    fn network_exists(&self, name: &str) -> bool {
        self.run(&["network", "exists", name])
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn create_network(&self, name: &str) -> Result<(), RuntimeError> {
        self.run_checked(&["network", "create", name])?;
        Ok(())
    }

    fn remove_network(&self, name: &str) -> Result<(), RuntimeError> {
        match self.run_checked(&["network", "rm", name]) {
            Ok(_) => Ok(()),
            Err(RuntimeError::Operation { output, .. }) if is_not_found(&output) => {
                Err(RuntimeError::NotFound {
                    kind: "network".to_string(),
                    name: name.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    fn create_container(&self, spec: &ContainerSpec) -> Result<(), RuntimeError> {
        let args = spec.run_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_checked(&args)?;
        Ok(())
    }

    fn stop_container(&self, name: &str) -> Result<(), RuntimeError> {
        self.run_checked(&["stop", name])?;
        Ok(())
    }

    fn remove_container(&self, name: &str, force: bool) -> Result<(), RuntimeError> {
        if force {
            self.run_checked(&["rm", "-f", name])?;
        } else {
            self.run_checked(&["rm", name])?;
        }
        Ok(())
    }

    fn list_containers(&self, name_filter: Option<&str>) -> Result<Vec<String>, RuntimeError> {
        let filter = name_filter.map(|prefix| format!("name={}", prefix));
        let mut args = vec!["ps", "-a", "--format", LIST_FORMAT];
        if let Some(ref filter) = filter {
            args.push("--filter");
            args.push(filter.as_str());
        }

        let output = self.run_checked(&args).map_err(|e| RuntimeError::Discovery {
            command: display_command(&self.binary, &args),
            reason: e.to_string(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// podman reports "network not found", docker "No such network"
fn is_not_found(output: &str) -> bool {
    let output = output.to_lowercase();
    output.contains("not found") || output.contains("no such")
}
