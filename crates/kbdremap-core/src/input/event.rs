// Kbdremap Input Layer - Raw Events
// Device-independent event triple and event class checks

use std::fmt;

use crate::{Action, Key};

/// EV_SYN event type code from input-event-codes.h
pub const EV_SYN: u16 = 0x00;
/// EV_KEY event type code from input-event-codes.h
pub const EV_KEY: u16 = 0x01;
/// EV_MSC event type code from input-event-codes.h
pub const EV_MSC: u16 = 0x04;

/// One input or output event as the kernel sees it: `(type, code, value)`.
///
/// The timestamp of device events is not carried; the synthetic device
/// stamps its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawEvent {
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub fn new(event_type: u16, code: u16, value: i32) -> Self {
        Self {
            event_type,
            code,
            value,
        }
    }

    /// Key event with a raw value
    pub fn key(key: Key, value: i32) -> Self {
        Self::new(EV_KEY, key.code(), value)
    }

    pub fn press(key: Key) -> Self {
        Self::key(key, Action::Press.value())
    }

    pub fn release(key: Key) -> Self {
        Self::key(key, Action::Release.value())
    }

    pub fn repeat(key: Key) -> Self {
        Self::key(key, Action::Repeat.value())
    }

    /// SYN_REPORT marker
    pub fn syn() -> Self {
        Self::new(EV_SYN, 0, 0)
    }

    pub fn is_key(&self) -> bool {
        is_key_event(self.event_type)
    }

    /// Key carried by a key event, `None` for every other event class
    pub fn as_key(&self) -> Option<Key> {
        self.is_key().then_some(Key::from(self.code))
    }

    /// Decoded edge, `None` for out-of-range values
    pub fn action(&self) -> Option<Action> {
        Action::from_value(self.value)
    }
}

impl fmt::Display for RawEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_key() {
            Some(key) => match self.action() {
                Some(action) => write!(f, "{} {}", key, action),
                None => write!(f, "{} value={}", key, self.value),
            },
            None => write!(
                f,
                "type={:#04x} code={} value={}",
                self.event_type, self.code, self.value
            ),
        }
    }
}

/// Check if an event type is a key event.
pub fn is_key_event(event_type: u16) -> bool {
    event_type == EV_KEY
}

/// Check if an event is the abort gesture: a press (not repeat) of the
/// configured abort key.
pub fn is_abort(event: &RawEvent, abort_key: Key) -> bool {
    event.as_key() == Some(abort_key) && event.action().is_some_and(Action::is_press)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::keys;

    #[test]
    fn test_is_key_event() {
        assert!(is_key_event(EV_KEY));
        assert!(!is_key_event(EV_SYN));
        assert!(!is_key_event(EV_MSC));
        assert!(!is_key_event(0x02)); // EV_REL
    }

    #[test]
    fn test_abort_needs_press_edge() {
        assert!(is_abort(&RawEvent::press(keys::PAUSE), keys::PAUSE));
        assert!(!is_abort(&RawEvent::release(keys::PAUSE), keys::PAUSE));
        assert!(!is_abort(&RawEvent::repeat(keys::PAUSE), keys::PAUSE));
        assert!(!is_abort(&RawEvent::press(keys::A), keys::PAUSE));
    }

    #[test]
    fn test_abort_ignores_non_key_events() {
        // MSC_SCAN carrying the same numeric code as PAUSE
        let scan = RawEvent::new(EV_MSC, keys::PAUSE.code(), 1);
        assert!(!is_abort(&scan, keys::PAUSE));
    }

    #[test]
    fn test_as_key() {
        assert_eq!(RawEvent::press(keys::A).as_key(), Some(keys::A));
        assert_eq!(RawEvent::syn().as_key(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(RawEvent::press(keys::A).to_string(), "A press");
        assert_eq!(RawEvent::key(keys::A, 7).to_string(), "A value=7");
        assert_eq!(RawEvent::syn().to_string(), "type=0x00 code=0 value=0");
    }
}
