use crate::manifest::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the distribution server.
pub const DIST_SERVER_ENV: &str = "RUST_DIST_SERVER";

/// Settings file passed with `--config`.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub build_dir: Option<PathBuf>,
}

/// Resolved settings for one fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    pub base_url: String,
    pub build_dir: PathBuf,
    pub quiet: bool,
}

/// Per-layer overrides, highest precedence first in [`FetchConfig::resolve`].
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub build_dir: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub env_base_url: Option<String>,
    pub quiet: bool,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config: FileConfig = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        // Relative build_dir is relative to the config file itself
        if let Some(dir) = config.build_dir.take() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.build_dir = Some(if dir.is_relative() { base.join(dir) } else { dir });
        }
        Ok(config)
    }
}

impl FetchConfig {
    /// Layer CLI flags > environment > config file > defaults.
    pub fn resolve(overrides: Overrides, default_build_dir: PathBuf) -> Result<Self> {
        let file = match &overrides.config_file {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let base_url = overrides
            .base_url
            .or(overrides.env_base_url.filter(|s| !s.trim().is_empty()))
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let build_dir = overrides
            .build_dir
            .or(file.build_dir)
            .unwrap_or(default_build_dir);

        Ok(Self {
            base_url: normalize_base_url(&base_url),
            build_dir,
            quiet: overrides.quiet,
        })
    }
}

pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
