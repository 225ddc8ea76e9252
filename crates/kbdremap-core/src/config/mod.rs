// Kbdremap Config
// Startup configuration: layouts, dual-role table, device selection

pub mod presets;

#[cfg(feature = "pure-rust")]
pub mod parser;

use indexmap::IndexMap;

use crate::dual_role::{DualRoleRegistry, RegistryError};
use crate::layout::{resolve, LayoutError, LayoutGrid, LayoutMap};
use crate::transform::RouterConfig;

pub use presets::Preset;

#[cfg(feature = "pure-rust")]
pub use parser::ConfigToml;

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("layout '{layout}': {source}")]
    Layout {
        layout: String,
        #[source]
        source: LayoutError,
    },

    #[error("layout '{0}' is empty")]
    EmptyLayout(String),

    #[error("dual-role table: {0}")]
    Registry(#[from] RegistryError),

    #[error("invalid abort key: {0}")]
    InvalidAbortKey(String),
}

/// A layout grid together with the name used in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedGrid {
    pub name: String,
    pub grid: LayoutGrid,
}

impl NamedGrid {
    pub fn preset(preset: Preset) -> Self {
        Self {
            name: preset.to_string(),
            grid: LayoutGrid::parse(preset.grid_text()),
        }
    }

    /// Interpret a config value: a preset name, or else a literal grid
    /// named after the setting it came from.
    pub fn from_value(value: &str, setting: &str) -> Self {
        match Preset::lookup(value) {
            Some(preset) => Self::preset(preset),
            None => Self {
                name: setting.to_string(),
                grid: LayoutGrid::parse(value),
            },
        }
    }

    fn build_map(&self, hardware: &LayoutGrid) -> Result<LayoutMap, ConfigError> {
        if self.grid.is_empty() {
            return Err(ConfigError::EmptyLayout(self.name.clone()));
        }
        LayoutMap::build(&self.name, hardware, &self.grid).map_err(|source| ConfigError::Layout {
            layout: self.name.clone(),
            source,
        })
    }
}

/// Complete startup configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Device name substring, or a `/dev/input/eventN` path
    pub device: String,
    pub abort_key: String,
    pub virtual_name: String,
    pub hardware: NamedGrid,
    pub primary: NamedGrid,
    pub secondary: NamedGrid,
    /// Layout the role tokens are located in; the primary layout when unset
    pub modifier: Option<NamedGrid>,
    pub toggle: Option<String>,
    /// Role token -> tap key name, in file order
    pub dual_roles: IndexMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: presets::DEFAULT_DEVICE.to_string(),
            abort_key: presets::DEFAULT_ABORT_KEY.to_string(),
            virtual_name: presets::DEFAULT_VIRTUAL_NAME.to_string(),
            hardware: NamedGrid::preset(Preset::Hardware),
            primary: NamedGrid::preset(Preset::Colemak),
            secondary: NamedGrid::preset(Preset::QwertyRu),
            modifier: None,
            toggle: Some(presets::DEFAULT_TOGGLE_TOKEN.to_string()),
            dual_roles: presets::DEFAULT_DUAL_ROLES
                .iter()
                .map(|(token, tap)| (token.to_string(), tap.to_string()))
                .collect(),
        }
    }
}

impl Config {
    pub fn modifier_layout(&self) -> &NamedGrid {
        self.modifier.as_ref().unwrap_or(&self.primary)
    }

    /// Resolve every name and build the router tables.
    pub fn compile(&self) -> Result<RouterConfig, ConfigError> {
        let hardware = &self.hardware.grid;
        if hardware.is_empty() {
            return Err(ConfigError::EmptyLayout(self.hardware.name.clone()));
        }
        hardware.resolve().map_err(|source| ConfigError::Layout {
            layout: self.hardware.name.clone(),
            source,
        })?;

        let primary = self.primary.build_map(hardware)?;
        let secondary = self.secondary.build_map(hardware)?;

        let modifier = self.modifier_layout();
        modifier.grid.resolve().map_err(|source| ConfigError::Layout {
            layout: modifier.name.clone(),
            source,
        })?;
        let registry = DualRoleRegistry::derive(
            hardware,
            &modifier.grid,
            self.dual_roles
                .iter()
                .map(|(token, tap)| (token.as_str(), tap.as_str())),
            self.toggle.as_deref(),
        )?;

        let abort_key = resolve(&self.abort_key)
            .ok()
            .flatten()
            .ok_or_else(|| ConfigError::InvalidAbortKey(self.abort_key.clone()))?;

        log::info!(
            "layouts '{}' ({} keys) and '{}' ({} keys), {} dual-role keys, abort key {}",
            primary.name(),
            primary.len(),
            secondary.name(),
            secondary.len(),
            registry.len(),
            abort_key
        );

        Ok(RouterConfig {
            primary,
            secondary,
            registry,
            abort_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::keys;
    use crate::layout::Target;

    #[test]
    fn test_default_compiles() {
        let router = Config::default().compile().unwrap();
        assert_eq!(router.primary.name(), "colemak");
        assert_eq!(router.secondary.name(), "qwerty_ru");
        assert_eq!(router.abort_key, keys::PAUSE);
    }

    #[test]
    fn test_default_dual_roles() {
        let router = Config::default().compile().unwrap();
        let registry = &router.registry;

        assert_eq!(registry.tap_for(keys::CAPSLOCK), Some(keys::ESC));
        // SPS appears twice in the thumb row; the right-alt position wins
        assert_eq!(registry.tap_for(keys::RIGHTALT), Some(keys::SPACE));
        assert!(!registry.is_dual_role(keys::HENKAN));
        assert_eq!(registry.toggle_key(), Some(keys::COMPOSE));
    }

    #[test]
    fn test_default_colemak_mappings() {
        let router = Config::default().compile().unwrap();
        let colemak = &router.primary;

        assert_eq!(colemak.get(keys::E), Some(Target::Key(keys::F)));
        assert_eq!(colemak.get(keys::CAPSLOCK), Some(Target::Key(keys::LEFTCTRL)));
        assert_eq!(colemak.get(keys::YEN), Some(Target::Key(keys::MINUS)));
        assert_eq!(colemak.get(keys::KEY_6), Some(Target::Suppressed));
        assert_eq!(colemak.get(keys::HENKAN), Some(Target::Key(keys::RIGHTSHIFT)));
        assert_eq!(colemak.get(keys::COMPOSE), Some(Target::Key(keys::CAPSLOCK)));
        assert_eq!(colemak.get(keys::PAUSE), None);
    }

    #[test]
    fn test_named_grid_from_value() {
        assert_eq!(
            NamedGrid::from_value("Colemak", "primary"),
            NamedGrid::preset(Preset::Colemak)
        );
        let custom = NamedGrid::from_value("A S D", "secondary");
        assert_eq!(custom.name, "secondary");
        assert_eq!(custom.grid.len(), 3);
    }

    #[test]
    fn test_compile_rejects_unknown_key() {
        let config = Config {
            secondary: NamedGrid::from_value("A B NOPE", "secondary"),
            ..Config::default()
        };
        let err = config.compile().unwrap_err();
        assert!(matches!(err, ConfigError::Layout { ref layout, .. } if layout == "secondary"));
    }

    #[test]
    fn test_compile_rejects_empty_layout() {
        let config = Config {
            primary: NamedGrid::from_value("   ", "primary"),
            ..Config::default()
        };
        assert!(matches!(config.compile(), Err(ConfigError::EmptyLayout(_))));
    }

    #[test]
    fn test_compile_rejects_bad_abort_key() {
        let config = Config {
            abort_key: "#".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.compile(), Err(ConfigError::InvalidAbortKey(_))));
    }

    #[test]
    fn test_compile_rejects_unplaced_toggle() {
        let config = Config {
            toggle: Some("NOWHERE".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.compile(),
            Err(ConfigError::Registry(RegistryError::TokenNotInLayout(_)))
        ));
    }

    #[test]
    fn test_separate_modifier_layout() {
        let config = Config {
            modifier: Some(NamedGrid::preset(Preset::QwertyRu)),
            ..Config::default()
        };
        let router = config.compile().unwrap();
        assert_eq!(router.registry.tap_for(keys::CAPSLOCK), Some(keys::ESC));
    }
}
