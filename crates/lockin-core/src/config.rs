use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/lockin/config.toml`.
///
/// The record format (`127.0.0.1 <domain> # managed by lockin`) is fixed and
/// deliberately not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockinConfig {
    /// Hosts file to edit.
    pub hosts_path: PathBuf,
    /// Directory the per-site cleanup scripts are written to.
    pub script_dir: PathBuf,
    /// Prefix privileged commands with `sudo` when not running as root.
    pub use_sudo: bool,
    /// Program that queues a job for a given time (reads the command on stdin).
    pub scheduler_program: String,
}

impl Default for LockinConfig {
    fn default() -> Self {
        Self {
            hosts_path: PathBuf::from("/etc/hosts"),
            script_dir: PathBuf::from("/usr/local/bin"),
            use_sudo: true,
            scheduler_program: "at".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("lockin")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LockinConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LockinConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: LockinConfig = toml::from_str(&data)?;
    Ok(cfg)
}
