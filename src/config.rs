use std::fs;
use std::path::Path;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::cli::OutputFormat;

pub const DEFAULT_USAGES: &str = "usages.csv";
pub const DEFAULT_PRICING: &str = "costs.csv";

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Usage dataset location: file path or http(s) URL.
    pub usages: Option<String>,
    /// Pricing dataset location: file path or http(s) URL.
    pub pricing: Option<String>,
    pub format: Option<OutputFormat>,
}

pub fn load_config() -> Config {
    let Some(dirs) = ProjectDirs::from("", "", "spendchart") else {
        return Config::default();
    };
    load_config_from(&dirs.config_dir().join("config.toml"))
}

pub fn load_config_from(path: &Path) -> Config {
    let Ok(data) = fs::read_to_string(path) else {
        return Config::default();
    };

    match toml::from_str(&data) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("invalid config at {}: {}", path.display(), e);
            Config::default()
        }
    }
}
