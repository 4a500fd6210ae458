//! Settings file and data-source resolution.
//!
//! Settings live in the platform config folder:
//! - macOS: ~/Library/Application Support/com.bom-grid.BOM Grid/
//! - Windows: %APPDATA%/bom-grid/BOM Grid/config/
//! - Linux: ~/.config/bomgrid/

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use bom_grid::ColumnPreset;
use bom_ingest::{DEFAULT_TIMEOUT, DataSource};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "bom-grid";
const APP_NAME: &str = "BOM Grid";
const CONFIG_FILENAME: &str = "settings.toml";

/// Environment variable naming the endpoint base URL.
pub const API_URL_ENV: &str = "BOM_API_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub grid: GridSettings,
    pub export: ExportSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Base URL of the BOM service, e.g. `http://localhost:8001`.
    pub api_url: Option<String>,
    /// JSON snapshot used when no URL is configured.
    pub snapshot: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            api_url: None,
            snapshot: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Item ids expanded when a grid view opens.
    pub default_expanded: Vec<String>,
    pub preset: ColumnPreset,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            default_expanded: vec!["1".to_string(), "2".to_string()],
            preset: ColumnPreset::Default,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory for exports written without an explicit `--output`.
    pub output_dir: Option<PathBuf>,
}

/// Default settings file location, if the platform has one.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

pub fn parse_settings(text: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(text)
}

/// Load settings from `explicit` or the default location.
///
/// Falls back to defaults when the file is missing, unreadable or invalid.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(settings_path) else {
        warn!("could not determine settings path, using defaults");
        return Settings::default();
    };

    match fs::read_to_string(&path) {
        Ok(content) => match parse_settings(&content) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse settings, using defaults"
                );
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if explicit.is_some() {
                warn!(path = %path.display(), "settings file not found, using defaults");
            }
            Settings::default()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read settings, using defaults");
            Settings::default()
        }
    }
}

/// Data-source choices given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceOverrides {
    pub api_url: Option<String>,
    pub snapshot: Option<PathBuf>,
    pub sample: bool,
}

/// Pick the data source: command line, then `BOM_API_URL`, then settings,
/// then the bundled sample.
pub fn resolve_source(
    overrides: &SourceOverrides,
    env_api_url: Option<String>,
    settings: &SourceSettings,
) -> DataSource {
    let timeout = Duration::from_secs(settings.timeout_secs);
    let http = |base_url: String| DataSource::Http { base_url, timeout };

    if overrides.sample {
        return DataSource::Sample;
    }
    if let Some(url) = &overrides.api_url {
        return http(url.clone());
    }
    if let Some(path) = &overrides.snapshot {
        return DataSource::Snapshot(path.clone());
    }
    if let Some(url) = env_api_url.filter(|url| !url.trim().is_empty()) {
        return http(url);
    }
    if let Some(url) = &settings.api_url {
        return http(url.clone());
    }
    if let Some(path) = &settings.snapshot {
        return DataSource::Snapshot(path.clone());
    }
    DataSource::Sample
}
