// Kbdremap Core Library
// Layout tables, dual-role keys and the event router

pub mod action;
pub mod config;
pub mod dual_role;
pub mod event;
pub mod input;
pub mod key;
pub mod layout;
pub mod output;
pub mod transform;

pub use action::Action;
pub use config::{Config, ConfigError, NamedGrid, Preset};
pub use dual_role::{DualRoleKey, DualRoleRegistry, RegistryError};
pub use event::{
    run_session, DeviceGrab, EventSink, EventSource, Grabbable, SessionEnd, SessionError,
};
pub use input::{is_abort, is_key_event, is_virtual_device, matches_device, RawEvent};
pub use key::{Key, UnknownKeyName};
pub use layout::{LayoutError, LayoutGrid, LayoutMap, Target};
pub use transform::{
    DualRoleResolver, Emitted, EngineState, EventRouter, LayoutSwitcher, Routed, RouterConfig,
};

#[cfg(feature = "pure-rust")]
pub use event::{DeviceInfo, EventLoopError, EventLoopResult, KeyboardDevice};
#[cfg(feature = "pure-rust")]
pub use output::{UInputError, UInputSink};
