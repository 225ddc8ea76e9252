// Kbdremap Key Type
// Key codes from Linux input-event-codes.h and their canonical names

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

include!(concat!(env!("OUT_DIR"), "/key_codes.rs"));

/// A key name that has no code in the key table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name: {0}")]
pub struct UnknownKeyName(pub String);

/// Canonical key names, in code order. Names are the `KEY_*` constants of
/// input-event-codes.h with the prefix stripped.
static KEY_TABLE: &[(&str, u16)] = &[
    ("RESERVED", 0),
    ("ESC", 1),
    ("1", 2),
    ("2", 3),
    ("3", 4),
    ("4", 5),
    ("5", 6),
    ("6", 7),
    ("7", 8),
    ("8", 9),
    ("9", 10),
    ("0", 11),
    ("MINUS", 12),
    ("EQUAL", 13),
    ("BACKSPACE", 14),
    ("TAB", 15),
    ("Q", 16),
    ("W", 17),
    ("E", 18),
    ("R", 19),
    ("T", 20),
    ("Y", 21),
    ("U", 22),
    ("I", 23),
    ("O", 24),
    ("P", 25),
    ("LEFTBRACE", 26),
    ("RIGHTBRACE", 27),
    ("ENTER", 28),
    ("LEFTCTRL", 29),
    ("A", 30),
    ("S", 31),
    ("D", 32),
    ("F", 33),
    ("G", 34),
    ("H", 35),
    ("J", 36),
    ("K", 37),
    ("L", 38),
    ("SEMICOLON", 39),
    ("APOSTROPHE", 40),
    ("GRAVE", 41),
    ("LEFTSHIFT", 42),
    ("BACKSLASH", 43),
    ("Z", 44),
    ("X", 45),
    ("C", 46),
    ("V", 47),
    ("B", 48),
    ("N", 49),
    ("M", 50),
    ("COMMA", 51),
    ("DOT", 52),
    ("SLASH", 53),
    ("RIGHTSHIFT", 54),
    ("KPASTERISK", 55),
    ("LEFTALT", 56),
    ("SPACE", 57),
    ("CAPSLOCK", 58),
    ("F1", 59),
    ("F2", 60),
    ("F3", 61),
    ("F4", 62),
    ("F5", 63),
    ("F6", 64),
    ("F7", 65),
    ("F8", 66),
    ("F9", 67),
    ("F10", 68),
    ("NUMLOCK", 69),
    ("SCROLLLOCK", 70),
    ("KP7", 71),
    ("KP8", 72),
    ("KP9", 73),
    ("KPMINUS", 74),
    ("KP4", 75),
    ("KP5", 76),
    ("KP6", 77),
    ("KPPLUS", 78),
    ("KP1", 79),
    ("KP2", 80),
    ("KP3", 81),
    ("KP0", 82),
    ("KPDOT", 83),
    ("ZENKAKUHANKAKU", 85),
    ("102ND", 86),
    ("F11", 87),
    ("F12", 88),
    ("RO", 89),
    ("KATAKANA", 90),
    ("HIRAGANA", 91),
    ("HENKAN", 92),
    ("KATAKANAHIRAGANA", 93),
    ("MUHENKAN", 94),
    ("KPJPCOMMA", 95),
    ("KPENTER", 96),
    ("RIGHTCTRL", 97),
    ("KPSLASH", 98),
    ("SYSRQ", 99),
    ("RIGHTALT", 100),
    ("LINEFEED", 101),
    ("HOME", 102),
    ("UP", 103),
    ("PAGEUP", 104),
    ("LEFT", 105),
    ("RIGHT", 106),
    ("END", 107),
    ("DOWN", 108),
    ("PAGEDOWN", 109),
    ("INSERT", 110),
    ("DELETE", 111),
    ("MACRO", 112),
    ("MUTE", 113),
    ("VOLUMEDOWN", 114),
    ("VOLUMEUP", 115),
    ("POWER", 116),
    ("KPEQUAL", 117),
    ("KPPLUSMINUS", 118),
    ("PAUSE", 119),
    ("SCALE", 120),
    ("KPCOMMA", 121),
    ("HANGEUL", 122),
    ("HANJA", 123),
    ("YEN", 124),
    ("LEFTMETA", 125),
    ("RIGHTMETA", 126),
    ("COMPOSE", 127),
    ("STOP", 128),
    ("AGAIN", 129),
    ("PROPS", 130),
    ("UNDO", 131),
    ("FRONT", 132),
    ("COPY", 133),
    ("OPEN", 134),
    ("PASTE", 135),
    ("FIND", 136),
    ("CUT", 137),
    ("HELP", 138),
    ("MENU", 139),
    ("CALC", 140),
    ("SETUP", 141),
    ("SLEEP", 142),
    ("WAKEUP", 143),
    ("FILE", 144),
    ("SENDFILE", 145),
    ("DELETEFILE", 146),
    ("XFER", 147),
    ("PROG1", 148),
    ("PROG2", 149),
    ("WWW", 150),
    ("MSDOS", 151),
    ("COFFEE", 152),
    ("ROTATE_DISPLAY", 153),
    ("CYCLEWINDOWS", 154),
    ("MAIL", 155),
    ("BOOKMARKS", 156),
    ("COMPUTER", 157),
    ("BACK", 158),
    ("FORWARD", 159),
    ("CLOSECD", 160),
    ("EJECTCD", 161),
    ("EJECTCLOSECD", 162),
    ("NEXTSONG", 163),
    ("PLAYPAUSE", 164),
    ("PREVIOUSSONG", 165),
    ("STOPCD", 166),
    ("RECORD", 167),
    ("REWIND", 168),
    ("PHONE", 169),
    ("ISO", 170),
    ("CONFIG", 171),
    ("HOMEPAGE", 172),
    ("REFRESH", 173),
    ("EXIT", 174),
    ("MOVE", 175),
    ("EDIT", 176),
    ("SCROLLUP", 177),
    ("SCROLLDOWN", 178),
    ("KPLEFTPAREN", 179),
    ("KPRIGHTPAREN", 180),
    ("NEW", 181),
    ("REDO", 182),
    ("F13", 183),
    ("F14", 184),
    ("F15", 185),
    ("F16", 186),
    ("F17", 187),
    ("F18", 188),
    ("F19", 189),
    ("F20", 190),
    ("F21", 191),
    ("F22", 192),
    ("F23", 193),
    ("F24", 194),
    ("PLAYCD", 200),
    ("PAUSECD", 201),
    ("PROG3", 202),
    ("PROG4", 203),
    ("ALL_APPLICATIONS", 204),
    ("SUSPEND", 205),
    ("CLOSE", 206),
    ("PLAY", 207),
    ("FASTFORWARD", 208),
    ("BASSBOOST", 209),
    ("PRINT", 210),
    ("HP", 211),
    ("CAMERA", 212),
    ("SOUND", 213),
    ("QUESTION", 214),
    ("EMAIL", 215),
    ("CHAT", 216),
    ("SEARCH", 217),
    ("CONNECT", 218),
    ("FINANCE", 219),
    ("SPORT", 220),
    ("SHOP", 221),
    ("ALTERASE", 222),
    ("CANCEL", 223),
    ("BRIGHTNESSDOWN", 224),
    ("BRIGHTNESSUP", 225),
    ("MEDIA", 226),
    ("SWITCHVIDEOMODE", 227),
    ("KBDILLUMTOGGLE", 228),
    ("KBDILLUMDOWN", 229),
    ("KBDILLUMUP", 230),
    ("SEND", 231),
    ("REPLY", 232),
    ("FORWARDMAIL", 233),
    ("SAVE", 234),
    ("DOCUMENTS", 235),
    ("BATTERY", 236),
    ("BLUETOOTH", 237),
    ("WLAN", 238),
    ("UWB", 239),
    ("UNKNOWN", 240),
    ("VIDEO_NEXT", 241),
    ("VIDEO_PREV", 242),
    ("BRIGHTNESS_CYCLE", 243),
    ("BRIGHTNESS_AUTO", 244),
    ("DISPLAY_OFF", 245),
    ("WWAN", 246),
    ("RFKILL", 247),
    ("MICMUTE", 248),
];

/// Secondary names accepted on input; never produced by `key_name`.
static KEY_ALIASES: &[(&str, u16)] = &[
    ("HANGUEL", 122),
    ("SCREENLOCK", 152),
    ("DIRECTION", 153),
    ("DASHBOARD", 204),
    ("BRIGHTNESS_ZERO", 244),
];

fn names_by_code() -> &'static HashMap<u16, &'static str> {
    static BY_CODE: OnceLock<HashMap<u16, &'static str>> = OnceLock::new();
    BY_CODE.get_or_init(|| KEY_TABLE.iter().map(|&(name, code)| (code, name)).collect())
}

fn codes_by_name() -> &'static HashMap<&'static str, u16> {
    static BY_NAME: OnceLock<HashMap<&'static str, u16>> = OnceLock::new();
    BY_NAME.get_or_init(|| {
        KEY_TABLE
            .iter()
            .chain(KEY_ALIASES.iter())
            .map(|&(name, code)| (name, code))
            .collect()
    })
}

/// Display name for a key code
pub fn key_name(code: u16) -> &'static str {
    names_by_code().get(&code).copied().unwrap_or("UNKNOWN")
}

/// Look up a canonical key name.
///
/// Matching is case-insensitive and an optional `KEY_` prefix is ignored, so
/// `LEFTCTRL`, `leftctrl` and `KEY_LEFTCTRL` all resolve to the same code.
pub fn key_from_name(name: &str) -> Option<Key> {
    let upper = name.trim().to_ascii_uppercase();
    let bare = upper.strip_prefix("KEY_").unwrap_or(&upper);
    codes_by_name().get(bare).copied().map(Key::from)
}

/// Well-known keys the engine and its defaults refer to by value.
pub mod keys {
    use super::Key;

    pub const ESC: Key = Key(1);
    pub const KEY_1: Key = Key(2);
    pub const KEY_6: Key = Key(7);
    pub const MINUS: Key = Key(12);
    pub const TAB: Key = Key(15);
    pub const Q: Key = Key(16);
    pub const W: Key = Key(17);
    pub const E: Key = Key(18);
    pub const R: Key = Key(19);
    pub const T: Key = Key(20);
    pub const Y: Key = Key(21);
    pub const P: Key = Key(25);
    pub const ENTER: Key = Key(28);
    pub const LEFTCTRL: Key = Key(29);
    pub const A: Key = Key(30);
    pub const S: Key = Key(31);
    pub const D: Key = Key(32);
    pub const F: Key = Key(33);
    pub const G: Key = Key(34);
    pub const H: Key = Key(35);
    pub const J: Key = Key(36);
    pub const K: Key = Key(37);
    pub const LEFTSHIFT: Key = Key(42);
    pub const Z: Key = Key(44);
    pub const X: Key = Key(45);
    pub const B: Key = Key(48);
    pub const RIGHTSHIFT: Key = Key(54);
    pub const SPACE: Key = Key(57);
    pub const CAPSLOCK: Key = Key(58);
    pub const F1: Key = Key(59);
    pub const HENKAN: Key = Key(92);
    pub const RIGHTALT: Key = Key(100);
    pub const PAUSE: Key = Key(119);
    pub const YEN: Key = Key(124);
    pub const COMPOSE: Key = Key(127);
    pub const BACK: Key = Key(158);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_name() {
        assert_eq!(key_from_name("A"), Some(Key::from(30)));
        assert_eq!(key_from_name("a"), Some(Key::from(30)));
        assert_eq!(key_from_name("LEFTCTRL"), Some(keys::LEFTCTRL));
        assert_eq!(key_from_name("KEY_LEFTCTRL"), Some(keys::LEFTCTRL));
        assert_eq!(key_from_name("1"), Some(Key::from(2)));
        assert_eq!(key_from_name("0"), Some(Key::from(11)));
        assert_eq!(key_from_name("102ND"), Some(Key::from(86)));
        assert_eq!(key_from_name("PAUSE"), Some(keys::PAUSE));
    }

    #[test]
    fn test_key_from_name_aliases() {
        assert_eq!(key_from_name("HANGUEL"), Some(Key::from(122)));
        assert_eq!(key_name(122), "HANGEUL");
    }

    #[test]
    fn test_unknown_key_name() {
        assert_eq!(key_from_name("LEFT_ARROW"), None);
        assert_eq!(key_from_name(""), None);
        assert_eq!(
            "NOPE".parse::<Key>(),
            Err(UnknownKeyName("NOPE".to_string()))
        );
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::from(30).to_string(), "A");
        assert_eq!(keys::COMPOSE.to_string(), "COMPOSE");
        assert_eq!(Key::from(0x2ff).to_string(), "UNKNOWN");
    }

    #[test]
    fn test_key_consts_match_table() {
        let named = [
            (keys::KEY_6, "6"),
            (keys::MINUS, "MINUS"),
            (keys::TAB, "TAB"),
            (keys::Y, "Y"),
            (keys::P, "P"),
            (keys::H, "H"),
            (keys::J, "J"),
            (keys::X, "X"),
            (keys::B, "B"),
            (keys::RIGHTSHIFT, "RIGHTSHIFT"),
            (keys::HENKAN, "HENKAN"),
            (keys::YEN, "YEN"),
            (keys::BACK, "BACK"),
        ];
        for (key, name) in named {
            assert_eq!(key.name(), name);
            assert_eq!(key_from_name(name), Some(key));
        }
    }

    #[test]
    fn test_table_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for (name, _) in KEY_TABLE.iter().chain(KEY_ALIASES.iter()) {
            assert!(seen.insert(*name), "duplicate key name {name}");
        }
    }

    #[test]
    fn test_table_round_trips_every_code() {
        for &(name, code) in KEY_TABLE {
            assert_eq!(key_from_name(name), Some(Key(code)));
            assert_eq!(key_name(code), name);
        }
    }
}
