//! Configuration schema.
//!
//! Every section is `deny_unknown_fields` and every key has a serde default
//! from [`defaults`](super::defaults).

use crate::config::defaults;
use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration of the compositor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StageConfig {
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    #[serde(default = "defaults::default_keyboard_config")]
    pub keyboard: KeyboardConfig,
    #[serde(default = "defaults::default_bindings_config")]
    pub bindings: BindingsConfig,
    #[serde(default = "defaults::default_placement_config")]
    pub placement: PlacementConfig,
    #[serde(default = "defaults::default_decoration_config")]
    pub decoration: DecorationConfig,
    #[serde(default = "defaults::default_ipc_config")]
    pub ipc: IpcConfig,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            logging: defaults::default_logging_config(),
            keyboard: defaults::default_keyboard_config(),
            bindings: defaults::default_bindings_config(),
            placement: defaults::default_placement_config(),
            decoration: defaults::default_decoration_config(),
            ipc: defaults::default_ipc_config(),
        }
    }
}

/// Logging configuration.
///
/// `level` is one of `trace`, `debug`, `info`, `warn`, `error`; `format` is
/// `text` or `json`. When `file_path` is set, a daily-rolling file layer is
/// installed in addition to stdout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Keymap and repeat settings applied to every keyboard device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KeyboardConfig {
    /// Comma separated XKB layout list. Index 0 and 1 are toggled at runtime.
    #[serde(default = "defaults::default_layouts")]
    pub layouts: String,
    /// Repeats per second.
    #[serde(default = "defaults::default_repeat_rate")]
    pub repeat_rate: i32,
    /// Milliseconds before repeat starts.
    #[serde(default = "defaults::default_repeat_delay")]
    pub repeat_delay: i32,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        defaults::default_keyboard_config()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BindingsConfig {
    /// Modifier that activates the primary binding table.
    #[serde(default = "defaults::default_primary_modifier")]
    pub primary_modifier: String,
    /// Replaces `primary_modifier` when `STAGE_DEV` is set, so a nested
    /// session does not fight the host compositor for the logo key.
    #[serde(default = "defaults::default_dev_modifier")]
    pub dev_modifier: String,
    /// Shell command line run by `primary + Return`.
    #[serde(default = "defaults::default_terminal")]
    pub terminal: String,
    #[serde(default = "defaults::default_helpers")]
    pub helpers: Vec<HelperBinding>,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        defaults::default_bindings_config()
    }
}

/// A `primary + <key>` binding that runs an external helper program.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HelperBinding {
    /// Single lowercase ASCII letter.
    pub key: String,
    /// Program followed by its arguments.
    pub command: Vec<String>,
}

impl HelperBinding {
    pub fn new(key: &str, command: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            command: command.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Modifier names accepted in `[bindings]`, with the modifier bit each one
/// selects. Matching is case-insensitive.
pub const MODIFIER_NAMES: [(&str, u32); 12] = [
    ("shift", 1 << 0),
    ("caps", 1 << 1),
    ("ctrl", 1 << 2),
    ("control", 1 << 2),
    ("alt", 1 << 3),
    ("mod1", 1 << 3),
    ("mod2", 1 << 4),
    ("mod3", 1 << 5),
    ("logo", 1 << 6),
    ("super", 1 << 6),
    ("mod4", 1 << 6),
    ("mod5", 1 << 7),
];

/// Looks up the modifier bit for a configured modifier name.
pub fn modifier_bit(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MODIFIER_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, bit)| *bit)
}

/// Automatic terminal placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PlacementConfig {
    /// Application identifiers placed into slots instead of being centered.
    #[serde(default = "defaults::default_terminal_app_ids")]
    pub terminal_app_ids: Vec<String>,
    /// Glyph width in pixels of the terminal font.
    #[serde(default = "defaults::default_terminal_font_width")]
    pub terminal_font_width: i32,
    #[serde(default = "defaults::default_terminal_columns")]
    pub terminal_columns: i32,
}

impl PlacementConfig {
    /// Pixel width of a terminal slot: `columns` glyphs plus 4px of padding.
    ///
    /// `None` if the product does not fit in an `i32`.
    pub fn checked_terminal_width(&self) -> Option<i32> {
        self.terminal_font_width
            .checked_mul(self.terminal_columns)
            .and_then(|w| w.checked_add(4))
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        defaults::default_placement_config()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DecorationConfig {
    #[serde(default = "defaults::default_focused_color")]
    pub focused_color: Color,
    #[serde(default = "defaults::default_border_color")]
    pub default_color: Color,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        defaults::default_decoration_config()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IpcConfig {
    /// Datagram socket the workspace indicator listens on.
    #[serde(default = "defaults::default_status_socket")]
    pub status_socket: PathBuf,
}

impl Default for IpcConfig {
    fn default() -> Self {
        defaults::default_ipc_config()
    }
}
