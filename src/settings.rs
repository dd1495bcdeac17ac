use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Base URL of the episodes API
    pub api_url: String,
    /// How many episodes the home page asks for
    pub home_episode_limit: usize,
    /// How many of those get the "latest releases" cards
    pub latest_count: usize,
    /// Seconds before the home page fetches the listing again
    pub revalidate_secs: u64,
    /// Skip interval in seconds
    pub skip_interval: u64,
    /// Volume level (0.0 to 1.0)
    pub default_volume: f32,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    /// The only value the application writes back
    pub theme: Theme,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3333/".to_string(),
            home_episode_limit: 12,
            latest_count: 2,
            revalidate_secs: 60 * 60 * 8,
            skip_interval: 15,
            default_volume: 0.7,
            log_level: "info".to_string(),
            theme: Theme::Light,
        }
    }
}

pub struct SettingsManager {
    settings_path: PathBuf,
    settings: AppSettings,
}

impl SettingsManager {
    pub fn new() -> Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Ok(Self::with_path(settings_path))
    }

    /// Settings backed by an explicit file; missing or unreadable files give defaults.
    pub fn with_path(settings_path: PathBuf) -> Self {
        let settings = match Self::load_from_file(&settings_path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings from {}, using defaults: {}", settings_path.display(), e);
                AppSettings::default()
            }
        };

        Self {
            settings_path,
            settings,
        }
    }

    pub fn get_settings_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("podcastr");

        // Ensure the directory exists
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        Ok(config_dir.join("settings.json"))
    }

    fn load_from_file(path: &Path) -> Result<AppSettings> {
        if !path.exists() {
            return Ok(AppSettings::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: AppSettings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.settings_path, content)?;
        log::info!("Settings saved to: {}", self.settings_path.display());
        Ok(())
    }

    pub fn get(&self) -> &AppSettings {
        &self.settings
    }

    pub fn update<F>(&mut self, updater: F) -> Result<()>
    where
        F: FnOnce(&mut AppSettings),
    {
        updater(&mut self.settings);
        self.save()
    }

    // Convenience getters
    pub fn api_url(&self) -> &str {
        &self.settings.api_url
    }

    pub fn skip_interval(&self) -> u64 {
        self.settings.skip_interval
    }

    pub fn default_volume(&self) -> f32 {
        self.settings.default_volume
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }
}
