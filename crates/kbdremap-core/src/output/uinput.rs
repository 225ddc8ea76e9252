// Kbdremap uinput Output Layer
// Synthetic keyboard that receives the transformed events

use std::collections::BTreeSet;
use std::io;

use evdev::uinput::VirtualDeviceBuilder;
use evdev::{AttributeSet, EventType, InputEvent, MiscType};

use crate::event::EventSink;
use crate::input::RawEvent;
use crate::Key;

/// Error types for uinput operations
#[derive(Debug, thiserror::Error)]
pub enum UInputError {
    #[error("Failed to create virtual device: {0}")]
    DeviceCreation(String),
}

/// Virtual uinput keyboard
pub struct UInputSink {
    device: evdev::uinput::VirtualDevice,
}

impl UInputSink {
    /// Create a virtual keyboard able to emit every key in `keys`
    pub fn new<I>(name: &str, keys: I) -> Result<Self, UInputError>
    where
        I: IntoIterator<Item = Key>,
    {
        let codes: BTreeSet<u16> = keys.into_iter().map(Key::code).collect();
        let mut attributes = AttributeSet::<evdev::Key>::new();
        for code in &codes {
            attributes.insert(evdev::Key::new(*code));
        }

        let device = VirtualDeviceBuilder::new()
            .map_err(|e: io::Error| UInputError::DeviceCreation(e.to_string()))?
            .name(name)
            .with_keys(&attributes)
            .map_err(|e: io::Error| UInputError::DeviceCreation(e.to_string()))?
            .with_msc(&misc_capabilities())
            .map_err(|e: io::Error| UInputError::DeviceCreation(e.to_string()))?
            .build()
            .map_err(|e: io::Error| UInputError::DeviceCreation(e.to_string()))?;

        log::info!("virtual device '{}' created with {} keys", name, codes.len());
        Ok(Self { device })
    }
}

/// Scan codes are passed through unchanged, so the device must accept them
fn misc_capabilities() -> AttributeSet<MiscType> {
    let mut misc = AttributeSet::<MiscType>::new();
    misc.insert(MiscType::MSC_SCAN);
    misc
}

fn to_input_event(event: &RawEvent) -> InputEvent {
    InputEvent::new(EventType(event.event_type), event.code, event.value)
}

impl EventSink for UInputSink {
    fn emit(&mut self, events: &[RawEvent]) -> io::Result<()> {
        let events: Vec<InputEvent> = events.iter().map(to_input_event).collect();
        self.device.emit(&events)
    }
}
