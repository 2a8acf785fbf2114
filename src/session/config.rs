use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::session::theme::ColorMode;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub show_welcome: bool,
    pub color: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            show_welcome: true,
            color: ColorMode::Auto,
        }
    }
}

impl Config {
    /// `<config_dir>/chatfront/config.json`, falling back to the working directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chatfront")
            .join("config.json")
    }

    /// Reads the config at `path`, writing the defaults there first if it is missing.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            let file = File::open(path)?;
            let config = serde_json::from_reader(file)?;
            debug!(path = %path.display(), "loaded config");
            return Ok(config);
        }

        let config = Config::default();
        config.save(path)?;
        debug!(path = %path.display(), "wrote default config");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Base URL to talk to: the explicit override (flag or `CHAT_API_URL`) wins over the file.
    pub fn resolve_base_url(&self, override_url: Option<&str>) -> String {
        let raw = override_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(&self.base_url);
        normalize_base_url(raw)
    }
}

pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
