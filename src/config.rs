use std::path::{Path, PathBuf};

use dotenv::dotenv;
use log::{debug, info, warn};

use crate::error::WeatherError;

pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";
pub const API_URL_VAR: &str = "OPENWEATHER_API_URL";
pub const ICON_URL_VAR: &str = "OPENWEATHER_ICON_URL";

/// Value shipped in the sample `.env`; treated the same as no key at all.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

pub const DEFAULT_API_BASE: &str = "http://api.openweathermap.org";
pub const DEFAULT_ICON_BASE: &str = "http://openweathermap.org";

/// Places a `.env` file may live, most specific first.
fn env_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
    }
    paths.push(PathBuf::from(".env"));

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            paths.push(exe_dir.join(".env"));
            // macOS bundles keep resources next to Contents/MacOS
            if let Some(contents_dir) = exe_dir.parent() {
                paths.push(contents_dir.join("Resources").join(".env"));
            }
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let home = PathBuf::from(home);
        paths.push(home.join(".city_weather.env"));
        paths.push(home.join(".env"));
    }
    paths
}

/// Load the first `.env` file found, falling back to dotenv's own search.
///
/// Returns the path that was loaded, if any.
pub fn load_env_file(explicit: Option<&Path>) -> Option<PathBuf> {
    for path in env_candidates(explicit) {
        if !path.exists() {
            debug!("no .env at {}", path.display());
            continue;
        }
        match dotenv::from_path(&path) {
            Ok(()) => {
                info!("loaded environment from {}", path.display());
                return Some(path);
            }
            Err(e) => warn!("failed to load {}: {}", path.display(), e),
        }
    }

    match dotenv() {
        Ok(path) => {
            info!("loaded environment from {}", path.display());
            Some(path)
        }
        Err(_) => {
            debug!("no .env file found, using process environment only");
            None
        }
    }
}

/// Runtime settings for the weather client.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub icon_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            icon_base: DEFAULT_ICON_BASE.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let config = Self {
            api_key: lookup(API_KEY_VAR),
            api_base: base(API_URL_VAR, DEFAULT_API_BASE),
            icon_base: base(ICON_URL_VAR, DEFAULT_ICON_BASE),
        };
        match config.api_key() {
            Ok(key) => debug!("API key found (length: {})", key.len()),
            Err(_) => warn!(
                "{} is missing or still the placeholder; searches will fail until it is set",
                API_KEY_VAR
            ),
        }
        config
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// The usable API key, or a configuration error when it is absent,
    /// blank, or still the placeholder.
    pub fn api_key(&self) -> Result<&str, WeatherError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && key != API_KEY_PLACEHOLDER => Ok(key),
            _ => Err(WeatherError::MissingApiKey),
        }
    }
}
