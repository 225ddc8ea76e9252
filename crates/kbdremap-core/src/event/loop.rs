// Kbdremap Event Loop - evdev Input Device
// Finding, grabbing and reading the physical keyboard

use std::io;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use evdev::{Device, EventType};

use crate::event::session::{EventSource, Grabbable};
use crate::input::{matches_device, RawEvent};
use crate::Key;

/// Result type for event loop operations
pub type EventLoopResult<T> = Result<T, EventLoopError>;

/// Errors that can occur while opening input devices
#[derive(Debug, thiserror::Error)]
pub enum EventLoopError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Device information for listing devices
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    /// Device path
    pub path: PathBuf,
    /// Device name
    pub name: String,
    /// Whether the device reports key events
    pub has_keys: bool,
}

/// The physical keyboard, read with `poll` so a shutdown request is noticed
/// even while no key is pressed.
pub struct KeyboardDevice {
    device: Device,
    path: PathBuf,
    name: String,
}

impl KeyboardDevice {
    /// Wakeup interval while idle, so the shutdown flag is rechecked
    pub const POLL_TIMEOUT_MS: i32 = 100;

    /// Open a device by path
    pub fn open<P: AsRef<Path>>(path: P) -> EventLoopResult<Self> {
        let path = path.as_ref().to_path_buf();
        let device = Device::open(&path)?;
        Ok(Self::from_device(device, path))
    }

    /// Find the first device whose name contains `pattern` (or whose path
    /// equals it), skipping the synthetic device named `virtual_name`.
    pub fn find(pattern: &str, virtual_name: &str) -> EventLoopResult<Self> {
        for (path, device) in evdev::enumerate() {
            let name = device.name().unwrap_or("Unknown");
            let path_str = path.to_str().unwrap_or_default();
            if matches_device(name, path_str, pattern, virtual_name) {
                log::info!("using input device '{}' at {}", name, path.display());
                return Ok(Self::from_device(device, path));
            }
        }

        // An explicit path may not show up in enumeration (permissions)
        if pattern.starts_with('/') {
            return Self::open(pattern);
        }

        Err(EventLoopError::DeviceNotFound(format!(
            "no input device matches '{}'",
            pattern
        )))
    }

    fn from_device(device: Device, path: PathBuf) -> Self {
        let name = device.name().unwrap_or("Unknown").to_string();
        Self {
            device,
            path,
            name,
        }
    }

    /// List all input devices
    ///
    /// This is useful for the --list-devices CLI flag.
    pub fn list_devices() -> EventLoopResult<Vec<DeviceInfo>> {
        let mut devices: Vec<DeviceInfo> = evdev::enumerate()
            .map(|(path, device)| DeviceInfo {
                name: device.name().unwrap_or("Unknown").to_string(),
                has_keys: device.supported_events().contains(EventType::KEY),
                path,
            })
            .collect();

        if devices.is_empty() {
            return Err(EventLoopError::DeviceNotFound(
                "No input devices found".to_string(),
            ));
        }

        devices.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(devices)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Key codes the device reports
    pub fn supported_keys(&self) -> Vec<Key> {
        self.device
            .supported_keys()
            .map(|keys| keys.iter().map(|k| Key::from(k.code())).collect())
            .unwrap_or_default()
    }
}

impl Grabbable for KeyboardDevice {
    fn grab(&mut self) -> io::Result<()> {
        self.device.grab()
    }

    fn ungrab(&mut self) -> io::Result<()> {
        self.device.ungrab()
    }
}

impl EventSource for KeyboardDevice {
    fn read_events(&mut self) -> io::Result<Vec<RawEvent>> {
        let mut poll_fd = libc::pollfd {
            fd: self.device.as_raw_fd(),
            events: libc::POLLIN,
            revents: 0,
        };

        let poll_result = unsafe { libc::poll(&mut poll_fd, 1, Self::POLL_TIMEOUT_MS) };

        if poll_result < 0 {
            let err = io::Error::last_os_error();
            // EINTR means a signal arrived; the caller checks its flag
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(Vec::new());
            }
            return Err(err);
        }

        if poll_result == 0 {
            return Ok(Vec::new());
        }

        // POLLERR/POLLHUP surface as a read error below
        let events = self
            .device
            .fetch_events()?
            .map(|event| RawEvent::new(event.event_type().0, event.code(), event.value()))
            .collect();
        Ok(events)
    }
}
