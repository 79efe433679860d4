use crate::errors::{NavError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub navigation: NavigationSettings,
    pub presentation: PresentationSettings,
    pub events: EventSettings,
}

/// Settings for push/pop inside a stack
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    /// Whether pushes and pops are animated
    pub animated: bool,
}

/// Settings for presenting and dismissing stacks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationSettings {
    /// Whether presentations and programmatic dismissals are animated
    pub animated: bool,
    /// Bottom sheet height in points when the caller gives none
    pub default_sheet_height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    /// Capacity of the lifecycle event broadcast channel
    pub channel_capacity: usize,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self { animated: true }
    }
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            animated: true,
            default_sheet_height: 300.0,
        }
    }
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
        }
    }
}

impl Settings {
    /// Load settings from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| NavError::config(format!("Failed to read config file: {e}")))?;

        let settings: Settings = serde_json::from_str(&content)
            .map_err(|e| NavError::config(format!("Failed to parse config file: {e}")))?;

        Ok(settings)
    }

    /// Save settings to a file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| NavError::config(format!("Failed to serialize config: {e}")))?;

        fs::write(path, content)
            .map_err(|e| NavError::config(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Keys accepted by [`get_value`](Self::get_value) and [`set_value`](Self::set_value)
    pub fn keys() -> &'static [&'static str] {
        &[
            "navigation.animated",
            "presentation.animated",
            "presentation.default_sheet_height",
            "events.channel_capacity",
        ]
    }

    /// Update a configuration value by key
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return Err(NavError::config(format!("Invalid config key format: {key}")));
        }

        match (parts[0], parts[1]) {
            ("navigation", "animated") => {
                self.navigation.animated = value
                    .parse()
                    .map_err(|_| NavError::config(format!("Invalid boolean value: {value}")))?;
            }
            ("presentation", "animated") => {
                self.presentation.animated = value
                    .parse()
                    .map_err(|_| NavError::config(format!("Invalid boolean value: {value}")))?;
            }
            ("presentation", "default_sheet_height") => {
                self.presentation.default_sheet_height = value
                    .parse()
                    .map_err(|_| NavError::config(format!("Invalid number: {value}")))?;
            }
            ("events", "channel_capacity") => {
                self.events.channel_capacity = value
                    .parse()
                    .map_err(|_| NavError::config(format!("Invalid number: {value}")))?;
            }
            _ => return Err(NavError::config(format!("Unknown config key: {key}"))),
        }

        Ok(())
    }

    /// Get a configuration value by key
    pub fn get_value(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return Err(NavError::config(format!("Invalid config key format: {key}")));
        }

        let value = match (parts[0], parts[1]) {
            ("navigation", "animated") => self.navigation.animated.to_string(),
            ("presentation", "animated") => self.presentation.animated.to_string(),
            ("presentation", "default_sheet_height") => {
                self.presentation.default_sheet_height.to_string()
            }
            ("events", "channel_capacity") => self.events.channel_capacity.to_string(),
            _ => return Err(NavError::config(format!("Unknown config key: {key}"))),
        };

        Ok(value)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let height = self.presentation.default_sheet_height;
        if !height.is_finite() || height <= 0.0 {
            return Err(NavError::config(format!(
                "Default sheet height must be a positive number, got {height}"
            )));
        }

        if self.events.channel_capacity == 0 {
            return Err(NavError::config("Event channel capacity must be at least 1"));
        }

        Ok(())
    }
}
