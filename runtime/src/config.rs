//! Runtime configuration, loaded from `~/.bloombox/config.json`.

use anyhow::{Context, Result};
use bloombox_signals::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_RENDER_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_USER_AGENT: &str = concat!("BloomboxBot/", env!("CARGO_PKG_VERSION"));

/// Settings for fetching, rendering and extraction.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Budget for the static HTML fetch.
    pub fetch_timeout_ms: u64,
    /// Budget for navigating and sampling in the headless browser.
    pub render_timeout_ms: u64,
    pub user_agent: String,
    /// Chrome/Chromium binary; autodetected when unset.
    pub chrome_path: Option<PathBuf>,
    /// JSONL run log. `None` disables it.
    pub audit_log: Option<PathBuf>,
    pub pipeline: PipelineConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            render_timeout_ms: DEFAULT_RENDER_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_path: None,
            audit_log: Some(bloombox_dir().join("runs.jsonl")),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load the config.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// location is tried and a missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    debug!("no config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&data)
            .with_context(|| format!("invalid config: {}", path.display()))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

/// `~/.bloombox`, or `/tmp/.bloombox` without a home directory.
pub fn bloombox_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".bloombox")
}

pub fn default_config_path() -> PathBuf {
    bloombox_dir().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.fetch_timeout_ms, 15_000);
        assert_eq!(config.render_timeout_ms, 30_000);
        assert!(config.user_agent.starts_with("BloomboxBot/"));
        assert!(config.audit_log.unwrap().ends_with(".bloombox/runs.jsonl"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"render_timeout_ms": 5000, "audit_log": null, "pipeline": {{"weights": {{"theme_color_meta": 40}}}}}}"#
        )
        .unwrap();

        let config = RuntimeConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.render_timeout_ms, 5000);
        assert_eq!(config.fetch_timeout_ms, DEFAULT_FETCH_TIMEOUT_MS);
        assert!(config.audit_log.is_none());
        assert_eq!(config.pipeline.weights.theme_color_meta, 40);
        assert_eq!(config.pipeline.weights.custom_property, 10);
    }

    #[test]
    fn test_explicit_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = RuntimeConfig::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn test_invalid_json_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = RuntimeConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }
}
