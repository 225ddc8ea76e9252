// Kbdremap Config - Built-in Presets
// Layout grids and defaults used when no config file overrides them

use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Device name substring of the usual laptop keyboard
pub const DEFAULT_DEVICE: &str = "AT Translated Set 2 keyboard";

/// Name given to the synthetic output device
pub const DEFAULT_VIRTUAL_NAME: &str = "kbdremap";

pub const DEFAULT_ABORT_KEY: &str = "PAUSE";

pub const DEFAULT_TOGGLE_TOKEN: &str = "LAN";

/// Dual-role tokens of the modifier layout and their tap keys
pub const DEFAULT_DUAL_ROLES: &[(&str, &str)] = &[("CTRLESC", "ESC"), ("SPS", "SPACE")];

/// Physical key positions of a JIS-style laptop keyboard.
pub const HARDWARE: &str = r"
     ` 1   2   3   4   5   6   7   8   9   0   -   =  YEN BS
   TAB   Q   W   E   R   T   Y   U   I   O   P   [   ]
C_LOCK    A   S   D   F   G   H   J   K   L   ;   '   \  RET
LSHIFT      Z   X   C   V   B   N   M   ,   .   /  RO RSHIFT
LCTRL   FN WIN ALT XX1    SPACE  XX2 XX3 RA CP RCTRL BACK
";

/// QWERTY split down the middle, with the thumb row repurposed.
pub const QWERTY_RU: &str = r"
     ` 1   2   3   4   5   #   #   6   7   8   9   0   - \
   TAB   Q   W   E   R   T   #   #   Y   U   I   O   P
CTRLESC   A   S   D   F   G   #   #   H   J   K   L   ;   '
        Z   X   C   V   B   #   #  #   N   M   ,   .  /
#       =  WIN ALT BS     SPACE  SPS ENT SPS LAN [  ]
";

/// Colemak on the same split arrangement as `QWERTY_RU`.
pub const COLEMAK: &str = r"
     ` 1   2   3   4   5   #   #   6   7   8   9   0   -  \
   TAB   Q   W   F   P   G   #   #   J   L   U   Y   ;
CTRLESC   A   R   S   T   D   #   #   H   N   E   I   O   '
        Z   X   C   V   B   #   #   #   K   M   ,   .  /
#       =  WIN ALT BS     SPACE  SPS ENT SPS LAN  [   ]
";

/// Built-in grids selectable by name in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Preset {
    Hardware,
    Colemak,
    QwertyRu,
}

impl Preset {
    pub fn grid_text(self) -> &'static str {
        match self {
            Preset::Hardware => HARDWARE,
            Preset::Colemak => COLEMAK,
            Preset::QwertyRu => QWERTY_RU,
        }
    }

    /// Parse a preset name, `None` for anything else
    pub fn lookup(name: &str) -> Option<Self> {
        Preset::from_str(name.trim()).ok()
    }
}
