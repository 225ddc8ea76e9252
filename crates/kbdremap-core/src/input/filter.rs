// Kbdremap Input Layer - Device Filtering
// Picks the physical keyboard to grab by name or path

/// Check if a device is the one the user asked for.
///
/// A pattern starting with `/` is compared against the device path exactly;
/// anything else is a substring of the device name. Our own synthetic device
/// never matches, otherwise the remapper would grab its own output.
///
/// # Arguments
/// * `device_name` - The device name from evdev
/// * `device_path` - The device path (e.g., "/dev/input/event0")
/// * `pattern` - Configured device name substring or path
/// * `virtual_name` - Name of the synthetic output device
pub fn matches_device(
    device_name: &str,
    device_path: &str,
    pattern: &str,
    virtual_name: &str,
) -> bool {
    if is_virtual_device(device_name, virtual_name) {
        return false;
    }

    if pattern.starts_with('/') {
        return device_path == pattern;
    }

    device_name.contains(pattern)
}

/// Check if a device is the synthetic device created by this program.
pub fn is_virtual_device(device_name: &str, virtual_name: &str) -> bool {
    !virtual_name.is_empty() && device_name == virtual_name
}
