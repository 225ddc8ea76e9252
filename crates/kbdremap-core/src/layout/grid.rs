// Kbdremap Layout - Grids
// Whitespace-separated key tokens laid out like the physical keyboard

use std::fmt;

use super::names::resolve;
use super::LayoutError;
use crate::Key;

/// An ordered sequence of key tokens.
///
/// Line breaks and column alignment only help the human reading the grid;
/// two grids correspond by token index alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutGrid {
    tokens: Vec<String>,
}

impl LayoutGrid {
    pub fn parse(text: &str) -> Self {
        Self {
            tokens: text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Resolve every token; `None` entries are placeholders.
    pub fn resolve(&self) -> Result<Vec<Option<Key>>, LayoutError> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(position, token)| {
                resolve(token).map_err(|_| LayoutError::UnknownKeyName {
                    token: token.clone(),
                    position,
                })
            })
            .collect()
    }
}

impl fmt::Display for LayoutGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::keys;

    #[test]
    fn test_parse_ignores_layout_whitespace() {
        let grid = LayoutGrid::parse("\n   Q  W\n\tE   R \n");
        assert_eq!(grid.tokens(), &["Q", "W", "E", "R"]);
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_empty_grid() {
        assert!(LayoutGrid::parse("  \n ").is_empty());
    }

    #[test]
    fn test_resolve() {
        let grid = LayoutGrid::parse("A # LCTRL");
        assert_eq!(
            grid.resolve().unwrap(),
            vec![Some(keys::A), None, Some(keys::LEFTCTRL)]
        );
    }

    #[test]
    fn test_resolve_reports_position() {
        let err = LayoutGrid::parse("A B BOGUS").resolve().unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownKeyName {
                token: "BOGUS".to_string(),
                position: 2
            }
        );
    }
}
