// Kbdremap Dual-Role Registry
// Which physical keys are tap/hold keys, and which key toggles layouts

use std::collections::HashMap;
use std::fmt;

use crate::layout::{resolve, LayoutGrid};
use crate::Key;

/// A dual-role key resolved against the active layout.
///
/// `hold` is what the active layout maps `physical` to and is emitted while
/// the key acts as a modifier. `tap` is emitted as a press/release pair when
/// the key turns out to have been tapped on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DualRoleKey {
    pub physical: Key,
    pub hold: Key,
    pub tap: Key,
}

impl fmt::Display for DualRoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (hold {}, tap {})", self.physical, self.hold, self.tap)
    }
}

/// Errors raised while deriving the registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("token '{0}' does not appear in the modifier layout")]
    TokenNotInLayout(String),

    #[error("token '{0}' sits on a hardware position with no key")]
    NoPhysicalKey(String),

    #[error("unknown key name '{name}' for token '{token}'")]
    UnknownKeyName { token: String, name: String },

    #[error("tap key for token '{0}' is the placeholder")]
    NoTapKey(String),
}

/// Dual-role keys and the layout toggle key, by physical code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DualRoleRegistry {
    taps: HashMap<Key, Key>,
    toggle: Option<Key>,
}

impl DualRoleRegistry {
    /// Build a registry from already resolved keys.
    pub fn new(taps: HashMap<Key, Key>, toggle: Option<Key>) -> Self {
        Self { taps, toggle }
    }

    /// Derive the registry by locating role tokens in the modifier layout.
    ///
    /// Each `(token, tap_name)` pair names a token of `modifier` (such as
    /// `CTRLESC`); the hardware key at the same grid position becomes
    /// dual-role with `tap_name` as its tap key. `toggle_token` is located
    /// the same way. When a token occurs several times the last occurrence
    /// is the one that counts.
    pub fn derive<'a, I>(
        hardware: &LayoutGrid,
        modifier: &LayoutGrid,
        dual_roles: I,
        toggle_token: Option<&str>,
    ) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let back_pairs: HashMap<&str, &str> = modifier
            .tokens()
            .iter()
            .map(String::as_str)
            .zip(hardware.tokens().iter().map(String::as_str))
            .collect();

        let physical_for = |token: &str| -> Result<Key, RegistryError> {
            let hw_token = back_pairs
                .get(token)
                .ok_or_else(|| RegistryError::TokenNotInLayout(token.to_string()))?;
            resolve(hw_token)
                .map_err(|_| RegistryError::UnknownKeyName {
                    token: token.to_string(),
                    name: hw_token.to_string(),
                })?
                .ok_or_else(|| RegistryError::NoPhysicalKey(token.to_string()))
        };

        let mut taps = HashMap::new();
        for (token, tap_name) in dual_roles {
            let physical = physical_for(token)?;
            let tap = resolve(tap_name)
                .map_err(|_| RegistryError::UnknownKeyName {
                    token: token.to_string(),
                    name: tap_name.to_string(),
                })?
                .ok_or_else(|| RegistryError::NoTapKey(token.to_string()))?;

            if let Some(previous) = taps.insert(physical, tap) {
                log::warn!(
                    "dual-role token '{}' lands on {} which already taps {}; using {}",
                    token,
                    physical,
                    previous,
                    tap
                );
            }
            log::debug!("dual-role key {} taps {} (token '{}')", physical, tap, token);
        }

        let toggle = toggle_token.map(physical_for).transpose()?;
        if let Some(toggle) = toggle {
            log::debug!("layout toggle key {}", toggle);
        }

        Ok(Self { taps, toggle })
    }

    pub fn is_dual_role(&self, key: Key) -> bool {
        self.taps.contains_key(&key)
    }

    pub fn tap_for(&self, key: Key) -> Option<Key> {
        self.taps.get(&key).copied()
    }

    pub fn toggle_key(&self) -> Option<Key> {
        self.toggle
    }

    pub fn is_toggle(&self, key: Key) -> bool {
        self.toggle == Some(key)
    }

    /// Dual-role keys as `(physical, tap)`, sorted by physical code
    pub fn entries(&self) -> Vec<(Key, Key)> {
        let mut entries: Vec<_> = self.taps.iter().map(|(p, t)| (*p, *t)).collect();
        entries.sort();
        entries
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}
