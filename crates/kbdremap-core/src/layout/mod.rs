// Kbdremap Layout
// Key-name resolution, layout grids and physical -> target tables

mod grid;
mod map;
pub mod names;

pub use grid::LayoutGrid;
pub use map::{LayoutMap, Target};
pub use names::{expand, resolve, PLACEHOLDER};

/// Errors raised while building layout tables
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("unknown key name '{token}' at grid position {position}")]
    UnknownKeyName { token: String, position: usize },
}
