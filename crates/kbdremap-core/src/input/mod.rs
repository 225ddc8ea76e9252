// Kbdremap Input Layer
// Raw event model and physical device selection

mod event;
mod filter;

pub use event::{is_abort, is_key_event, RawEvent, EV_KEY, EV_MSC, EV_SYN};
pub use filter::{is_virtual_device, matches_device};
