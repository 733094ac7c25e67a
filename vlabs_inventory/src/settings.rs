use anyhow::{Context, Result, anyhow};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// VM inventory file (JSON)
    pub inventory: Option<PathBuf>,

    /// Label printed next to RAM values, values are never converted
    #[serde(default = "default_unit")]
    pub ram_unit: String,

    /// Label printed next to disk values
    #[serde(default = "default_unit")]
    pub disk_unit: String,

    /// Only list running VMs
    #[serde(default)]
    pub active_only: bool,
}

fn default_unit() -> String {
    "MiB".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            inventory: None,
            ram_unit: default_unit(),
            disk_unit: default_unit(),
            active_only: false,
        }
    }
}

impl Settings {
    /// Load settings from a config file.
    ///
    /// When `required` is false a missing file yields the defaults.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        Config::builder()
            .add_source(File::from(path).required(required))
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Pick the inventory file, preferring the command line value
    pub fn inventory_path(&self, cli: Option<&Path>) -> Result<PathBuf> {
        cli.map(Path::to_path_buf)
            .or_else(|| self.inventory.clone())
            .ok_or_else(|| anyhow!("No inventory file configured, use --inventory"))
    }
}
