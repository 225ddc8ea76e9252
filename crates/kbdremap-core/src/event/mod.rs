// Kbdremap Event Handling
// Session loop, grab guard and the evdev input device

#[cfg(feature = "pure-rust")]
pub mod r#loop;
pub mod session;

#[cfg(feature = "pure-rust")]
pub use r#loop::{DeviceInfo, EventLoopError, EventLoopResult, KeyboardDevice};
pub use session::{
    run_session, DeviceGrab, EventSink, EventSource, Grabbable, SessionEnd, SessionError,
};
