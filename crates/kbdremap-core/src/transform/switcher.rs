// Kbdremap Layout Switcher
// Holds the two configured layouts and which one is active

use crate::layout::LayoutMap;

#[derive(Debug, Clone)]
pub struct LayoutSwitcher {
    layouts: [LayoutMap; 2],
    active: usize,
}

impl LayoutSwitcher {
    /// Start on `primary`
    pub fn new(primary: LayoutMap, secondary: LayoutMap) -> Self {
        Self {
            layouts: [primary, secondary],
            active: 0,
        }
    }

    pub fn active(&self) -> &LayoutMap {
        &self.layouts[self.active]
    }

    pub fn is_primary_active(&self) -> bool {
        self.active == 0
    }

    /// Flip to the other layout and return it
    pub fn toggle(&mut self) -> &LayoutMap {
        self.active ^= 1;
        &self.layouts[self.active]
    }
}
