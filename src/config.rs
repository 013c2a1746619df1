/// Runtime configuration
/// Static settings live in tauri.conf.json; these are environment overrides.

use log::LevelFilter;
use std::str::FromStr;
use tauri::Url;

pub const LOG_ENV: &str = "OTTO_LOG";
pub const UPDATE_ENDPOINT_ENV: &str = "OTTO_UPDATE_ENDPOINT";

#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub log_level: LevelFilter,
    /// Replaces the updater endpoints from tauri.conf.json
    pub update_endpoint: Option<Url>,
    /// Rejected overrides, logged once the logger is installed
    pub warnings: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            update_endpoint: None,
            warnings: Vec::new(),
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Bad values keep the default and leave a warning behind.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup(LOG_ENV) {
            match LevelFilter::from_str(level.trim()) {
                Ok(level) => config.log_level = level,
                Err(_) => config
                    .warnings
                    .push(format!("ignoring {}={:?}: not a log level", LOG_ENV, level)),
            }
        }

        if let Some(endpoint) = lookup(UPDATE_ENDPOINT_ENV) {
            match Url::parse(endpoint.trim()) {
                Ok(url) => config.update_endpoint = Some(url),
                Err(e) => config
                    .warnings
                    .push(format!("ignoring {}={:?}: {}", UPDATE_ENDPOINT_ENV, endpoint, e)),
            }
        }

        config
    }
}
