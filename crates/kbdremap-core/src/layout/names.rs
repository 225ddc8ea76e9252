// Kbdremap Layout - Key-Name Resolver
// Expands grid abbreviations and resolves names to key codes

use crate::key::{key_from_name, UnknownKeyName};
use crate::Key;

/// Grid token for "no key at this position".
pub const PLACEHOLDER: &str = "#";

/// Short grid tokens and the canonical names they stand for.
///
/// `None` marks the placeholder. Several entries name the role a key plays
/// in a layout (`CTRLESC`, `SPS`, `LAN`) rather than the key itself; the
/// dual-role registry looks those tokens up by their literal spelling.
static ABBREVIATIONS: &[(&str, Option<&str>)] = &[
    ("C_LOCK", Some("CAPSLOCK")),
    ("INS", Some("INSERT")),
    ("DEL", Some("DELETE")),
    ("LSHIFT", Some("LEFTSHIFT")),
    ("RSHIFT", Some("RIGHTSHIFT")),
    ("LCTRL", Some("LEFTCTRL")),
    ("RCTRL", Some("RIGHTCTRL")),
    ("LALT", Some("LEFTALT")),
    ("RALT", Some("RIGHTALT")),
    ("LWIN", Some("LEFTMETA")),
    ("RWIN", Some("RIGHTMETA")),
    ("PGUP", Some("PAGEUP")),
    ("PGDN", Some("PAGEDOWN")),
    ("BS", Some("BACKSPACE")),
    ("RET", Some("ENTER")),
    ("`", Some("GRAVE")),
    ("'", Some("APOSTROPHE")),
    ("=", Some("EQUAL")),
    (",", Some("COMMA")),
    (".", Some("DOT")),
    ("-", Some("MINUS")),
    ("/", Some("SLASH")),
    ("\\", Some("BACKSLASH")),
    (";", Some("SEMICOLON")),
    ("[", Some("LEFTBRACE")),
    ("]", Some("RIGHTBRACE")),
    (PLACEHOLDER, None),
    ("CTRLESC", Some("LEFTCTRL")),
    ("SPS", Some("RIGHTSHIFT")),
    ("FN", Some("WAKEUP")),
    ("ENT", Some("ENTER")),
    ("WIN", Some("LEFTMETA")),
    ("ALT", Some("LEFTALT")),
    ("RA", Some("RIGHTALT")),
    ("CP", Some("COMPOSE")),
    ("XX1", Some("MUHENKAN")),
    ("XX2", Some("HENKAN")),
    ("XX3", Some("KATAKANAHIRAGANA")),
    ("LANG/LEAD", Some("RIGHTALT")),
    ("LAN", Some("CAPSLOCK")),
];

/// Expand an abbreviation to its canonical name.
///
/// Returns `None` for the placeholder; tokens that are not abbreviations are
/// returned unchanged.
pub fn expand(token: &str) -> Option<&str> {
    match ABBREVIATIONS.iter().find(|(short, _)| *short == token) {
        Some((_, long)) => *long,
        None => Some(token),
    }
}

/// Resolve a grid token to a key code.
///
/// `Ok(None)` means the token is the placeholder. Unknown names are an error
/// so that a typo in a layout stops the program before any device is touched.
pub fn resolve(token: &str) -> Result<Option<Key>, UnknownKeyName> {
    match expand(token) {
        None => Ok(None),
        Some(name) => key_from_name(name)
            .map(Some)
            .ok_or_else(|| UnknownKeyName(token.to_string())),
    }
}
