//! In-memory runtime for orchestration tests

use super::{ContainerRuntime, ContainerSpec};
use crate::error::RuntimeError;
use std::cell::RefCell;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub(crate) struct State {
    networks: Vec<String>,
    /// (name, status, created) in creation order
    containers: Vec<(String, String, String)>,
    calls: Vec<String>,
}

/// Records every call and applies it to an in-memory network/container set
#[derive(Debug, Default)]
pub struct FakeRuntime {
    pub unavailable: bool,
    pub fail_create: HashSet<String>,
    pub fail_stop: HashSet<String>,
    pub fail_remove: HashSet<String>,
    pub fail_network_remove: bool,
    pub fail_listing: bool,
    /// Extra raw lines appended to every listing
    pub extra_records: Vec<String>,
    pub(crate) state: RefCell<State>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_network(self, name: &str) -> Self {
        self.state.borrow_mut().networks.push(name.to_string());
        self
    }

    pub fn with_container(self, name: &str, status: &str, created: &str) -> Self {
        self.state.borrow_mut().containers.push((
            name.to_string(),
            status.to_string(),
            created.to_string(),
        ));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn container_names(&self) -> Vec<String> {
        self.state
            .borrow()
            .containers
            .iter()
            .map(|(name, _, _)| name.clone())
            .collect()
    }

    pub fn networks(&self) -> Vec<String> {
        self.state.borrow().networks.clone()
    }

    fn record(&self, call: String) {
        self.state.borrow_mut().calls.push(call);
    }

    fn failure(command: String) -> RuntimeError {
        RuntimeError::Operation {
            command,
            output: "injected failure".to_string(),
        }
    }
}

impl ContainerRuntime for FakeRuntime {
    fn name(&self) -> &str {
        "fake"
    }

    fn is_available(&self) -> Result<(), RuntimeError> {
        self.record("available".to_string());
        if self.unavailable {
            return Err(RuntimeError::Unavailable {
                runtime: "fake".to_string(),
                reason: "not installed".to_string(),
            });
        }
        Ok(())
    }

    fn network_exists(&self, name: &str) -> bool {
        self.record(format!("network exists {}", name));
        self.state.borrow().networks.iter().any(|n| n == name)
    }

    fn create_network(&self, name: &str) -> Result<(), RuntimeError> {
        let call = format!("network create {}", name);
        self.record(call.clone());
        let mut state = self.state.borrow_mut();
        if self.fail_create.contains(name) || state.networks.iter().any(|n| n == name) {
            return Err(Self::failure(call));
        }
        state.networks.push(name.to_string());
        Ok(())
    }

    fn remove_network(&self, name: &str) -> Result<(), RuntimeError> {
        let call = format!("network rm {}", name);
        self.record(call.clone());
        let mut state = self.state.borrow_mut();
        if self.fail_network_remove {
            return Err(Self::failure(call));
        }
        if !state.networks.iter().any(|n| n == name) {
            return Err(RuntimeError::NotFound {
                kind: "network".to_string(),
                name: name.to_string(),
            });
        }
        state.networks.retain(|n| n != name);
        Ok(())
    }

    fn create_container(&self, spec: &ContainerSpec) -> Result<(), RuntimeError> {
        let call = format!("run {}", spec.name);
        self.record(call.clone());
        let mut state = self.state.borrow_mut();
        let duplicate = state.containers.iter().any(|(n, _, _)| n == &spec.name);
        if duplicate || self.fail_create.contains(&spec.name) {
            return Err(Self::failure(call));
        }
        state.containers.push((
            spec.name.clone(),
            "Up Less than a second".to_string(),
            "Less than a second ago".to_string(),
        ));
        Ok(())
    }

    fn stop_container(&self, name: &str) -> Result<(), RuntimeError> {
        let call = format!("stop {}", name);
        self.record(call.clone());
        if self.fail_stop.contains(name) {
            return Err(Self::failure(call));
        }
        Ok(())
    }

    fn remove_container(&self, name: &str, force: bool) -> Result<(), RuntimeError> {
        let call = if force {
            format!("rm -f {}", name)
        } else {
            format!("rm {}", name)
        };
        self.record(call.clone());
        if self.fail_remove.contains(name) {
            return Err(Self::failure(call));
        }
        self.state
            .borrow_mut()
            .containers
            .retain(|(n, _, _)| n != name);
        Ok(())
    }

    fn list_containers(&self, name_filter: Option<&str>) -> Result<Vec<String>, RuntimeError> {
        self.record(format!("ps {}", name_filter.unwrap_or("*")));
        if self.fail_listing {
            return Err(RuntimeError::Discovery {
                command: "ps".to_string(),
                reason: "injected failure".to_string(),
            });
        }
        let state = self.state.borrow();
        // Like podman, the name filter matches anywhere in the name
        let mut lines: Vec<String> = state
            .containers
            .iter()
            .filter(|(name, _, _)| name_filter.is_none_or(|f| name.contains(f)))
            .map(|(name, status, created)| format!("{}\t{}\t{}", name, status, created))
            .collect();
        lines.extend(self.extra_records.iter().cloned());
        Ok(lines)
    }
}
