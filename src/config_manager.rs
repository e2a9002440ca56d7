use crate::runtime::podman::DEFAULT_RUNTIME;
use crate::services::provision::{DEFAULT_IMAGE, ValidationPolicy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "kinc";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Overrides the config file location
pub const CONFIG_PATH_ENV: &str = "KINC_CONFIG";
pub const RUNTIME_ENV: &str = "KINC_RUNTIME";
pub const IMAGE_ENV: &str = "KINC_IMAGE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KincConfig {
    /// Runtime executable name or path
    pub runtime: String,
    /// Node image used when `--image` is not given
    pub image: String,
    /// Accept clusters with no control-plane node
    pub allow_zero_control_plane: bool,
}

impl Default for KincConfig {
    fn default() -> Self {
        Self {
            runtime: DEFAULT_RUNTIME.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            allow_zero_control_plane: true,
        }
    }
}

impl KincConfig {
    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            allow_zero_control_plane: self.allow_zero_control_plane,
        }
    }

    /// Apply `KINC_RUNTIME` / `KINC_IMAGE` style overrides from `lookup`
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(runtime) = lookup(RUNTIME_ENV).filter(|v| !v.trim().is_empty()) {
            self.runtime = runtime;
        }
        if let Some(image) = lookup(IMAGE_ENV).filter(|v| !v.trim().is_empty()) {
            self.image = image;
        }
        self
    }
}

pub fn get_home_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE")) // Windows fallback
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            // Fallback to using whoami crate
            let username = whoami::username();
            if cfg!(target_os = "macos") {
                PathBuf::from(format!("/Users/{}", username))
            } else {
                PathBuf::from(format!("/home/{}", username))
            }
        })
}

pub fn get_config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    get_home_dir()
        .join(".config")
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Load the user config with environment overrides applied. A missing file
/// gives the defaults.
pub fn load_config() -> Result<KincConfig> {
    let config_path = get_config_file_path();
    let config = load_config_from(&config_path)?;
    Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
}

pub fn load_config_from(config_path: &Path) -> Result<KincConfig> {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(KincConfig::default());
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let config: KincConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(config)
}
