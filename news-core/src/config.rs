use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::error::ConfigError;
use crate::fetch::FetchConfig;
use crate::state::DEFAULT_FILTER;

pub const DEFAULT_BASE_URL: &str = "https://zaceno.github.io/hatut/data";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub network: NetworkConfig,
    pub theme: ThemeConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub seed_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub request_timeout_seconds: u64,
    pub retry_attempts: u8,
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background_color: [u8; 3],
    pub panel_color: [u8; 3],
    pub accent_color: [u8; 3],
    pub text_color: [u8; 3],
    pub secondary_text_color: [u8; 3],
    pub border_color: [u8; 3],
    pub reading_color: [u8; 3],
    pub error_color: [u8; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub font_size: f32,
    pub story_list_width: f32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            seed_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 10,
            retry_attempts: 1,
            retry_backoff_ms: 250,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background_color: [30, 30, 30],
            panel_color: [37, 37, 38],
            accent_color: [0, 122, 204],
            text_color: [204, 204, 204],
            secondary_text_color: [150, 150, 150],
            border_color: [60, 60, 60],
            reading_color: [9, 71, 113],
            error_color: [244, 67, 54],
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            story_list_width: 320.0,
        }
    }
}

impl AppConfig {
    /// Path of the config file under the user's configuration directory.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("newsdesk").join("config.json"))
    }

    /// Loads the user config. A missing file is created with the defaults;
    /// an unreadable or malformed one is left untouched and the defaults are used.
    pub fn load() -> Self {
        let path = match Self::config_file_path() {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "no configuration directory, using defaults");
                return Self::default();
            }
        };

        match Self::from_file(&path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                let default_config = Self::default();
                if let Err(save_err) = default_config.save_to(&path) {
                    warn!(error = %save_err, path = %path.display(), "could not save default configuration");
                }
                default_config
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "could not load configuration, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::config_file_path()?)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Ok(Url::parse(&self.source.base_url)?)
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            request_timeout: Duration::from_secs(self.network.request_timeout_seconds),
            max_retries: self.network.retry_attempts,
            retry_backoff_ms: self.network.retry_backoff_ms,
        }
    }
}

fn color32(rgb: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Moves every channel by `delta`, clamped to the valid range.
pub fn shade(rgb: [u8; 3], delta: i16) -> egui::Color32 {
    let channel = |c: u8| (i16::from(c) + delta).clamp(0, 255) as u8;
    egui::Color32::from_rgb(channel(rgb[0]), channel(rgb[1]), channel(rgb[2]))
}

impl ThemeConfig {
    pub fn background_color32(&self) -> egui::Color32 {
        color32(self.background_color)
    }

    pub fn panel_color32(&self) -> egui::Color32 {
        color32(self.panel_color)
    }

    pub fn accent_color32(&self) -> egui::Color32 {
        color32(self.accent_color)
    }

    pub fn text_color32(&self) -> egui::Color32 {
        color32(self.text_color)
    }

    pub fn secondary_text_color32(&self) -> egui::Color32 {
        color32(self.secondary_text_color)
    }

    pub fn border_color32(&self) -> egui::Color32 {
        color32(self.border_color)
    }

    pub fn reading_color32(&self) -> egui::Color32 {
        color32(self.reading_color)
    }

    pub fn error_color32(&self) -> egui::Color32 {
        color32(self.error_color)
    }

    /// Text input background, a step darker than the window.
    pub fn input_color32(&self) -> egui::Color32 {
        shade(self.background_color, -5)
    }

    /// Resting widget fill, lifted off the panel.
    pub fn widget_color32(&self) -> egui::Color32 {
        shade(self.panel_color, 13)
    }

    pub fn hover_color32(&self) -> egui::Color32 {
        shade(self.panel_color, 9)
    }

    /// Translucent accent used behind selected text.
    pub fn selection_color32(&self) -> egui::Color32 {
        let [r, g, b] = self.accent_color;
        egui::Color32::from_rgba_unmultiplied(r, g, b, 60)
    }
}
