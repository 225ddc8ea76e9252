// Kbdremap Layout - Layout Table Builder
// Zips a hardware grid with a target grid into a physical -> target map

use std::collections::HashMap;
use std::fmt;

use super::grid::LayoutGrid;
use super::LayoutError;
use crate::Key;

/// What a physical key turns into under a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Emit this key instead
    Key(Key),
    /// Emit nothing
    Suppressed,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Key(key) => fmt::Display::fmt(key, f),
            Target::Suppressed => f.pad("-"),
        }
    }
}

/// Mapping from physical key to target for one layout.
///
/// Keys absent from the map are passed through unchanged by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMap {
    name: String,
    mappings: HashMap<Key, Target>,
}

impl LayoutMap {
    /// Build a layout by pairing `physical` and `target` positionally.
    ///
    /// Pairing stops at the shorter grid: physical keys past the end of the
    /// target grid stay out of the map and therefore pass through. A physical
    /// key listed twice keeps its last pairing. Every token of both grids
    /// must resolve, including the unpaired tail.
    pub fn build(
        name: impl Into<String>,
        physical: &LayoutGrid,
        target: &LayoutGrid,
    ) -> Result<Self, LayoutError> {
        let name = name.into();
        let physical_keys = physical.resolve()?;
        let target_keys = target.resolve()?;

        if physical_keys.len() != target_keys.len() {
            log::warn!(
                "layout '{}': hardware grid has {} keys, target grid has {}; \
                 only the first {} positions are remapped",
                name,
                physical_keys.len(),
                target_keys.len(),
                physical_keys.len().min(target_keys.len())
            );
        }

        let mut mappings = HashMap::new();
        for (from, to) in physical_keys.into_iter().zip(target_keys) {
            let Some(from) = from else {
                continue;
            };
            let target = match to {
                Some(key) => Target::Key(key),
                None => Target::Suppressed,
            };
            mappings.insert(from, target);
        }

        log::debug!("layout '{}': {} mapped keys", name, mappings.len());
        Ok(Self { name, mappings })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: Key) -> Option<Target> {
        self.mappings.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Entries sorted by physical key code
    pub fn entries(&self) -> Vec<(Key, Target)> {
        let mut entries: Vec<_> = self.mappings.iter().map(|(k, t)| (*k, *t)).collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }

    /// Every key this layout can emit
    pub fn target_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.mappings.values().filter_map(|target| match target {
            Target::Key(key) => Some(*key),
            Target::Suppressed => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::keys;

    fn grid(text: &str) -> LayoutGrid {
        LayoutGrid::parse(text)
    }

    #[test]
    fn test_build_pairs_positionally() {
        let map = LayoutMap::build("t", &grid("Q W E"), &grid("Q W F")).unwrap();
        assert_eq!(map.get(keys::E), Some(Target::Key(keys::F)));
        assert_eq!(map.get(keys::Q), Some(Target::Key(keys::Q)));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_build_suppresses_placeholder_targets() {
        let map = LayoutMap::build("t", &grid("A S"), &grid("A #")).unwrap();
        assert_eq!(map.get(keys::S), Some(Target::Suppressed));
    }

    #[test]
    fn test_build_skips_placeholder_physical_positions() {
        let map = LayoutMap::build("t", &grid("A # D"), &grid("S F G")).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(keys::D), Some(Target::Key(keys::G)));
        assert!(!map.target_keys().any(|k| k == keys::F));
    }

    #[test]
    fn test_build_truncates_to_shorter_grid() {
        let map = LayoutMap::build("t", &grid("A S D"), &grid("Z X")).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(keys::D), None);

        let map = LayoutMap::build("t", &grid("A"), &grid("Z X C")).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_build_rejects_unknown_token_in_unpaired_tail() {
        let err = LayoutMap::build("t", &grid("A S"), &grid("Z X NOTAKEY")).unwrap_err();
        assert!(matches!(err, LayoutError::UnknownKeyName { position: 2, .. }));
    }

    #[test]
    fn test_build_duplicate_physical_keeps_last() {
        let map = LayoutMap::build("t", &grid("A A"), &grid("Z X")).unwrap();
        assert_eq!(map.get(keys::A), Some(Target::Key(keys::X)));
    }

    #[test]
    fn test_entries_are_sorted() {
        let map = LayoutMap::build("t", &grid("S A"), &grid("A S")).unwrap();
        let entries = map.entries();
        assert_eq!(entries[0].0, keys::A);
        assert_eq!(entries[1].0, keys::S);
    }
}
