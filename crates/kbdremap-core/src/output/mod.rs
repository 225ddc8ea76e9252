// Kbdremap Output Layer
// Synthetic output device

#[cfg(feature = "pure-rust")]
mod uinput;

#[cfg(feature = "pure-rust")]
pub use uinput::{UInputError, UInputSink};
