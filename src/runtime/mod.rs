//! Container runtime client
//!
//! Orchestration code talks to the runtime only through [`ContainerRuntime`].
//! [`podman::PodmanRuntime`] drives a podman-compatible CLI; tests use an
//! in-memory fake.

pub mod podman;

#[cfg(test)]
pub(crate) mod fake;

use crate::error::RuntimeError;
use serde::Serialize;

pub use podman::PodmanRuntime;

/// Entrypoint baked into kindest/node images
pub const NODE_ENTRYPOINT: &str = "/usr/local/bin/entrypoint";
/// Init system booted by the entrypoint
pub const NODE_INIT: &str = "/sbin/init";
pub const NODE_TMPFS: &[&str] = &["/tmp", "/run", "/run/lock"];
pub const NODE_RESTART_POLICY: &str = "unless-stopped";

/// Operations every runtime backend provides.
///
/// All calls block until the underlying process exits.
pub trait ContainerRuntime {
    /// Executable or backend name, used in messages
    fn name(&self) -> &str;

    /// Precondition check run before any cluster operation
    fn is_available(&self) -> Result<(), RuntimeError>;

    /// Absence is a normal answer, not an error
    fn network_exists(&self, name: &str) -> bool;

    fn create_network(&self, name: &str) -> Result<(), RuntimeError>;

    /// A missing network is reported as [`RuntimeError::NotFound`]
    fn remove_network(&self, name: &str) -> Result<(), RuntimeError>;

    /// Not idempotent: creating a name that already exists fails
    fn create_container(&self, spec: &ContainerSpec) -> Result<(), RuntimeError>;

    fn stop_container(&self, name: &str) -> Result<(), RuntimeError>;

    fn remove_container(&self, name: &str, force: bool) -> Result<(), RuntimeError>;

    /// Raw `name\tstatus\tcreated` records in runtime order, optionally
    /// filtered by the runtime's name filter. No match is an empty list.
    fn list_containers(&self, name_filter: Option<&str>) -> Result<Vec<String>, RuntimeError>;
}

/// Bind mount of a host path into the container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMount {
    pub host_path: String,
    pub container_path: String,
    pub mode: String,
}

impl VolumeMount {
    pub fn to_arg(&self) -> String {
        format!("{}:{}:{}", self.host_path, self.container_path, self.mode)
    }
}

/// Everything needed to start one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub network: String,
    pub image: String,
    pub privileged: bool,
    /// Value for `--cgroupns`, e.g. "host"
    pub cgroup_namespace: Option<String>,
    pub tmpfs: Vec<String>,
    pub cgroup_mount: Option<VolumeMount>,
    pub restart_policy: Option<String>,
    /// First word after the image
    pub entrypoint: Option<String>,
    pub command: Vec<String>,
}

impl ContainerSpec {
    /// Shape shared by control-plane and worker nodes: privileged, host
    /// cgroup namespace, writable tmpfs for /tmp, /run and /run/lock, the host
    /// cgroup tree mounted read-write, and an init system as PID 1.
    pub fn node(name: &str, network: &str, image: &str) -> Self {
        Self {
            name: name.to_string(),
            network: network.to_string(),
            image: image.to_string(),
            privileged: true,
            cgroup_namespace: Some("host".to_string()),
            tmpfs: NODE_TMPFS.iter().map(|p| p.to_string()).collect(),
            cgroup_mount: Some(VolumeMount {
                host_path: "/sys/fs/cgroup".to_string(),
                container_path: "/sys/fs/cgroup".to_string(),
                mode: "rw".to_string(),
            }),
            restart_policy: Some(NODE_RESTART_POLICY.to_string()),
            entrypoint: Some(NODE_ENTRYPOINT.to_string()),
            command: vec![NODE_INIT.to_string()],
        }
    }

    /// Arguments for `<runtime> run`, starting with "run"
    pub fn run_args(&self) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "-d".to_string(),
            "--name".to_string(),
            self.name.clone(),
            "--network".to_string(),
            self.network.clone(),
        ];

        if self.privileged {
            args.push("--privileged".to_string());
        }

        if let Some(ref ns) = self.cgroup_namespace {
            args.push(format!("--cgroupns={}", ns));
        }

        for path in &self.tmpfs {
            args.push("--tmpfs".to_string());
            args.push(path.clone());
        }

        if let Some(ref mount) = self.cgroup_mount {
            args.push("--volume".to_string());
            args.push(mount.to_arg());
        }

        if let Some(ref policy) = self.restart_policy {
            args.push("--restart".to_string());
            args.push(policy.clone());
        }

        args.push(self.image.clone());

        if let Some(ref entrypoint) = self.entrypoint {
            args.push(entrypoint.clone());
        }
        args.extend(self.command.iter().cloned());

        args
    }
}

/// One parsed line of container listing output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerRecord {
    pub name: String,
    pub status: String,
    pub created: String,
}

impl ContainerRecord {
    /// Parse a tab-delimited `name\tstatus\tcreated` record. Records with
    /// fewer than three fields yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split('\t');
        let name = fields.next()?;
        let status = fields.next()?;
        let created = fields.next()?;
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            status: status.to_string(),
            created: created.to_string(),
        })
    }
}

/// Container name from a raw listing record
pub fn record_name(line: &str) -> Option<&str> {
    line.split('\t')
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
}
