use rust_embed::Embed;
use serde::Deserialize;
use std::sync::LazyLock;
use thiserror::Error;

const DOCK_FILE: &str = "dock.json";

static DOCK_APPS: LazyLock<Result<Vec<DockApp>, ConfigError>> =
    LazyLock::new(|| load_dock_apps(DOCK_FILE));

#[derive(Embed)]
#[folder = "config"]
pub struct Config;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DockApp {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub can_open: bool,
}

impl DockApp {
    pub fn icon_src(&self) -> String {
        format!("/images/{}", self.icon)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    Missing(String),
    #[error("Couldn't parse {file}: {reason}")]
    Parse { file: String, reason: String },
}

/// The dock entries shipped with the site, parsed once per process.
pub fn dock_apps() -> Result<Vec<DockApp>, ConfigError> {
    DOCK_APPS.clone()
}

fn load_dock_apps(file: &str) -> Result<Vec<DockApp>, ConfigError> {
    let content = Config::get(file).ok_or_else(|| ConfigError::Missing(file.to_string()))?;
    let text = std::str::from_utf8(&content.data).map_err(|e| ConfigError::Parse {
        file: file.to_string(),
        reason: e.to_string(),
    })?;
    parse_dock_apps(file, text)
}

pub fn parse_dock_apps(file: &str, text: &str) -> Result<Vec<DockApp>, ConfigError> {
    serde_json::from_str(text).map_err(|e| ConfigError::Parse {
        file: file.to_string(),
        reason: e.to_string(),
    })
}
