use std::fmt;

/// Edge carried by a key event's `value` field.
///
/// The kernel reports `0` for release, `1` for press and `2` for autorepeat
/// while the key stays down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Action {
    Release = 0,
    Press = 1,
    Repeat = 2,
}

impl Action {
    /// Returns true only for the press edge (not autorepeat)
    pub fn is_press(self) -> bool {
        matches!(self, Action::Press)
    }

    /// Decode an evdev event value
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(Action::Release),
            1 => Some(Action::Press),
            2 => Some(Action::Repeat),
            _ => None,
        }
    }

    pub fn value(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Release => write!(f, "release"),
            Action::Press => write!(f, "press"),
            Action::Repeat => write!(f, "repeat"),
        }
    }
}
