// Kbdremap Transform Module
// Event routing, dual-role resolution and layout switching

pub mod engine;
pub mod resolver;
pub mod switcher;

pub use engine::{EngineState, EventRouter, RouterConfig, Routed};
pub use resolver::{DualRoleResolver, Emitted};
pub use switcher::LayoutSwitcher;
