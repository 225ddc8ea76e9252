// Kbdremap Config Parser - TOML with Serde
// Loads user overrides on top of the built-in presets

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use super::{Config, ConfigError, NamedGrid};

/// Root TOML table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    #[serde(default)]
    pub general: Option<GeneralConfig>,

    #[serde(default)]
    pub layout: Option<LayoutConfig>,

    /// Role token -> tap key name. Replaces the built-in table when present.
    #[serde(default)]
    pub dual_role: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Device name substring or `/dev/input/eventN` path
    pub device: Option<String>,
    pub abort_key: Option<String>,
    pub virtual_name: Option<String>,
}

/// Each layout value is a preset name or a literal grid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    pub hardware: Option<String>,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub modifier: Option<String>,
    /// Toggle token; an empty string disables layout switching
    pub toggle: Option<String>,
}

impl Config {
    /// Load a config file
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path)?;
        log::debug!("loading config from {}", path.as_ref().display());
        Self::from_toml(&content)
    }

    /// Parse TOML; anything not set keeps its built-in default.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;
        Ok(parsed.into_config())
    }

    /// Default config path (~/.config/kbdremap/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kbdremap").join("config.toml"))
    }

    /// Load from the default location, or fall back to the presets
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_toml_path(path);
            }
        }
        Ok(Self::default())
    }
}

impl ConfigToml {
    pub fn into_config(self) -> Config {
        let mut config = Config::default();

        if let Some(general) = self.general {
            if let Some(device) = general.device {
                config.device = device;
            }
            if let Some(abort_key) = general.abort_key {
                config.abort_key = abort_key;
            }
            if let Some(virtual_name) = general.virtual_name {
                config.virtual_name = virtual_name;
            }
        }

        if let Some(layout) = self.layout {
            if let Some(hardware) = layout.hardware {
                config.hardware = NamedGrid::from_value(&hardware, "hardware");
            }
            if let Some(primary) = layout.primary {
                config.primary = NamedGrid::from_value(&primary, "primary");
            }
            if let Some(secondary) = layout.secondary {
                config.secondary = NamedGrid::from_value(&secondary, "secondary");
            }
            if let Some(modifier) = layout.modifier {
                config.modifier = Some(NamedGrid::from_value(&modifier, "modifier"));
            }
            if let Some(toggle) = layout.toggle {
                let toggle = toggle.trim().to_string();
                config.toggle = (!toggle.is_empty()).then_some(toggle);
            }
        }

        if let Some(dual_role) = self.dual_role {
            config.dual_roles = dual_role;
        }

        config
    }
}
