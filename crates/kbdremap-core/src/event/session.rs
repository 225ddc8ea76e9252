// Kbdremap Session
// Grab guard and the blocking read -> route -> write loop
//
// The loop is generic over where events come from and where they go, so the
// same dispatch runs against evdev/uinput in production and in-memory
// devices in tests.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::input::RawEvent;
use crate::transform::{EventRouter, Routed};

/// A device that can be exclusively acquired
pub trait Grabbable {
    fn grab(&mut self) -> io::Result<()>;
    fn ungrab(&mut self) -> io::Result<()>;
}

/// Where physical events come from
pub trait EventSource {
    /// Wait for the next batch of events.
    ///
    /// An empty batch is a wakeup with nothing to read (timeout or signal);
    /// the caller re-checks its shutdown flag and reads again.
    fn read_events(&mut self) -> io::Result<Vec<RawEvent>>;
}

/// Where transformed events go
pub trait EventSink {
    /// Write a batch of events contiguously, in order
    fn emit(&mut self, events: &[RawEvent]) -> io::Result<()>;
}

/// Errors that end a session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to grab input device: {0}")]
    Grab(#[source] io::Error),

    #[error("lost input device: {0}")]
    DeviceLost(#[source] io::Error),

    #[error("failed to write to output device: {0}")]
    Output(#[source] io::Error),
}

/// How a session ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The abort key was pressed
    Aborted,
    /// The shutdown flag was cleared (signal)
    Interrupted,
}

/// Exclusive hold on an input device.
///
/// The grab is released exactly once: by `release()`, or on drop if nobody
/// released it first. Dropping during unwinding releases too, so a panic
/// never leaves the keyboard captured.
pub struct DeviceGrab<D: Grabbable> {
    device: D,
    held: bool,
}

impl<D: Grabbable> DeviceGrab<D> {
    pub fn acquire(mut device: D) -> Result<Self, SessionError> {
        device.grab().map_err(SessionError::Grab)?;
        log::info!("input device grabbed");
        Ok(Self { device, held: true })
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Release the grab. Returns false if it was already released.
    pub fn release(&mut self) -> bool {
        if !self.held {
            return false;
        }
        self.held = false;
        match self.device.ungrab() {
            Ok(()) => log::info!("input device released"),
            Err(e) => log::warn!("failed to release input device: {}", e),
        }
        true
    }
}

impl<D: Grabbable> Drop for DeviceGrab<D> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Run the event loop until the abort key, a shutdown request, or an error.
///
/// The grab is released before this returns, on every path.
pub fn run_session<D, K>(
    grab: &mut DeviceGrab<D>,
    sink: &mut K,
    router: &mut EventRouter,
    running: &AtomicBool,
) -> Result<SessionEnd, SessionError>
where
    D: Grabbable + EventSource,
    K: EventSink,
{
    let end = dispatch(grab.device_mut(), sink, router, running);
    grab.release();
    match &end {
        Ok(end) => log::info!("session ended: {:?}", end),
        Err(e) => log::error!("session failed: {}", e),
    }
    end
}

fn dispatch<S, K>(
    source: &mut S,
    sink: &mut K,
    router: &mut EventRouter,
    running: &AtomicBool,
) -> Result<SessionEnd, SessionError>
where
    S: EventSource,
    K: EventSink,
{
    while running.load(Ordering::SeqCst) {
        let events = source.read_events().map_err(SessionError::DeviceLost)?;
        for event in events {
            match router.route(event) {
                Routed::Abort => return Ok(SessionEnd::Aborted),
                Routed::Emit(out) => {
                    if !out.is_empty() {
                        sink.emit(&out).map_err(SessionError::Output)?;
                    }
                }
            }
        }
    }
    Ok(SessionEnd::Interrupted)
}
