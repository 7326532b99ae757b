use std::path::{Path, PathBuf};

use config::{Case, Config, ConfigError, Environment, File};
use etcetera::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;

/// User settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct VcConfig {
    /// Remote used for fetch, push and pull-request URLs
    pub remote: String,
    /// Branch the `master` command switches to
    pub default_branch: String,
    /// Entries shown by `commit-history` without an explicit count
    pub history_limit: usize,
    /// Command template for opening URLs; `{url}` is replaced with the URL
    pub open_command: Option<String>,
}

impl Default for VcConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            default_branch: "master".to_string(),
            history_limit: 10,
            open_command: None,
        }
    }
}

impl VcConfig {
    /// Load from the user config file and `VC_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path().as_deref())
    }

    /// Load from an explicit file (missing is fine) plus the environment.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            log::debug!("Reading config from {}", path.display());
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(
                Environment::with_prefix("VC")
                    .convert_case(Case::Kebab)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// `VC_CONFIG_PATH` if set, else `vc/config.toml` under the platform config dir.
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("VC_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        choose_base_strategy()
            .ok()
            .map(|strategy| strategy.config_dir().join("vc").join("config.toml"))
    }
}
