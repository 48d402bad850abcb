//! CLI configuration.
//!
//! Read from `config.toml` under the user config dir (or `--config`):
//!
//! ```toml
//! store_path = "/var/lib/probation-tracker/store.json"
//!
//! [evaluator]
//! uid = "uid-chief"
//! email = "chief@dept.org"
//! display_name = "B. Chief"
//! ```
//!
//! A missing file is a valid empty config; every field is optional.

use std::path::{Path, PathBuf};

use anyhow::Context;
use probation_core::Principal;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct CliConfig {
    /// Path to the JSON store file.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    /// Identity used to stamp evaluator fields and for `owner` checks.
    #[serde(default)]
    pub evaluator: Option<EvaluatorConfig>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EvaluatorConfig {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
}

impl From<EvaluatorConfig> for Principal {
    fn from(cfg: EvaluatorConfig) -> Self {
        Self {
            uid: cfg.uid,
            email: cfg.email,
            display_name: cfg.display_name,
        }
    }
}

/// Load the config file, preferring an explicit `--config` path.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<CliConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => return Ok(CliConfig::default()),
        },
    };
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("probation-tracker").join("config.toml"))
}

/// Store location when neither the flag nor the config file names one.
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("probation-tracker").join("store.json"))
        .unwrap_or_else(|| PathBuf::from("probation-store.json"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let cfg: CliConfig = toml::from_str(
            r#"
            store_path = "/tmp/store.json"

            [evaluator]
            uid = "uid-1"
            email = "eval@dept.org"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.store_path.unwrap(), PathBuf::from("/tmp/store.json"));
        let evaluator = cfg.evaluator.unwrap();
        assert_eq!(evaluator.uid, "uid-1");
        assert_eq!(evaluator.display_name, "");
    }

    #[test]
    fn empty_config_is_fine() {
        let cfg: CliConfig = toml::from_str("").unwrap();
        assert!(cfg.store_path.is_none());
        assert!(cfg.evaluator.is_none());
    }
}
