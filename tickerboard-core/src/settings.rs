//! Optional TOML settings that seed the input widgets.
//!
//! ```toml
//! [watchlist]
//! tickers = "BBAI, PLTR, AI"
//! days = 30
//!
//! [chart]
//! height = 16
//! ```
//!
//! Settings are only read, never written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::panel::{RenderOptions, DEFAULT_CHART_HEIGHT};
use crate::watchlist::{LookbackDays, DEFAULT_TICKERS};

/// Smallest chart that still shows a body and both wicks.
pub const MIN_CHART_HEIGHT: u16 = 6;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchlistSettings {
    pub tickers: String,
    pub days: LookbackDays,
}

impl Default for WatchlistSettings {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.to_string(),
            days: LookbackDays::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub height: u16,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            height: DEFAULT_CHART_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub watchlist: WatchlistSettings,
    pub chart: ChartSettings,
}

impl Settings {
    /// `<config_dir>/tickerboard/settings.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tickerboard").join("settings.toml"))
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from a file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load from an explicit path, or the default location, or fall back to defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        match explicit.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            chart_height: self.chart.height.max(MIN_CHART_HEIGHT),
        }
    }
}
