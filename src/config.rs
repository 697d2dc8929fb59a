//! Configuration handling for the TUI

use crate::state::View;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default API address
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application directories (config, data, logs)
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("sn", "gin", "gin-admin")
}

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Base URL of the GIN API
    pub api_base_url: Option<String>,
    /// Request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Route opened at startup (e.g. "/add-formation")
    pub initial_route: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a file, falling back to defaults if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: TuiConfig = serde_json::from_str(&content)?;
            return Ok(config);
        }
        Ok(Self::default())
    }
}

/// Effective settings after merging command line, environment and file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub initial_view: View,
}

/// Values given on the command line (clap already folds in the environment)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub route: Option<String>,
}

impl Settings {
    pub fn resolve(config: &TuiConfig, overrides: Overrides) -> Self {
        let api_base_url = overrides
            .api_base_url
            .or_else(|| config.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = overrides
            .request_timeout_secs
            .or(config.request_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let route = overrides.route.or_else(|| config.initial_route.clone());
        let initial_view = match route {
            Some(path) => View::from_path(&path).unwrap_or_else(|| {
                tracing::warn!("Unknown route {path:?}, opening home");
                View::Home
            }),
            None => View::Home,
        };

        Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            initial_view,
        }
    }
}
