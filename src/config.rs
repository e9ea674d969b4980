use std::path::{Path, PathBuf};

use compact_str::ToCompactString;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::result::{GlimError, Result};

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GlimConfig {
    /// GitLab API root, e.g. https://gitlab.example.com/api/v4
    pub gitlab_url: String,
    /// The Personal Access Token to authenticate with GitLab
    pub gitlab_token: String,
    /// Log level override, e.g. "debug"
    pub log_level: Option<String>,
}

impl GlimConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.gitlab_url.trim().is_empty() {
            return Err("gitlab_url is required".to_string());
        }
        if self.gitlab_token.trim().is_empty() {
            return Err("gitlab_token is required".to_string());
        }
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(dirs) = BaseDirs::new() {
        dirs.config_dir().join("glim-gitlab.toml")
    } else {
        PathBuf::from("glim-gitlab.toml")
    }
}

/// Reads the config file, falling back to defaults when it does not exist.
pub fn load_config(config_file: &Path) -> Result<GlimConfig> {
    if !config_file.exists() {
        return Ok(GlimConfig::default());
    }

    confy::load_path(config_file).map_err(|e| GlimError::ConfigError(e.to_compact_string()))
}

pub fn save_config(config_file: &Path, config: &GlimConfig) -> Result<()> {
    confy::store_path(config_file, config)
        .map_err(|e| GlimError::ConfigError(e.to_compact_string()))?;

    Ok(())
}
