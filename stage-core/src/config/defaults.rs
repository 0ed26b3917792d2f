//! Compiled-in configuration values.
//!
//! These back both the `Default` impls and serde's `default` attributes, so a
//! missing file and a missing key resolve to the same value.

use crate::config::types::{
    BindingsConfig, DecorationConfig, HelperBinding, IpcConfig, KeyboardConfig, LoggingConfig,
    PlacementConfig,
};
use crate::types::Color;
use std::path::PathBuf;

// --- Logging ---

pub(crate) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_log_file_path() -> Option<PathBuf> {
    None
}

pub(crate) fn default_log_format() -> String {
    "text".to_string()
}

// --- Keyboard ---

pub(crate) fn default_keyboard_config() -> KeyboardConfig {
    KeyboardConfig {
        layouts: default_layouts(),
        repeat_rate: default_repeat_rate(),
        repeat_delay: default_repeat_delay(),
    }
}

pub(crate) fn default_layouts() -> String {
    "us,ru".to_string()
}

pub(crate) fn default_repeat_rate() -> i32 {
    25
}

pub(crate) fn default_repeat_delay() -> i32 {
    600
}

// --- Bindings ---

pub(crate) fn default_bindings_config() -> BindingsConfig {
    BindingsConfig {
        primary_modifier: default_primary_modifier(),
        dev_modifier: default_dev_modifier(),
        terminal: default_terminal(),
        helpers: default_helpers(),
    }
}

pub(crate) fn default_primary_modifier() -> String {
    "logo".to_string()
}

pub(crate) fn default_dev_modifier() -> String {
    "alt".to_string()
}

pub(crate) fn default_terminal() -> String {
    "foot".to_string()
}

/// `q w e r` select light scenes 0-3, `a s` select display modes 0-1.
pub(crate) fn default_helpers() -> Vec<HelperBinding> {
    let lights = ["q", "w", "e", "r"].into_iter().enumerate().map(|(i, key)| {
        let arg = i.to_string();
        HelperBinding::new(key, &["stage-lights", arg.as_str()])
    });
    let modes = ["a", "s"].into_iter().enumerate().map(|(i, key)| {
        let arg = i.to_string();
        HelperBinding::new(key, &["stage-display-mode", arg.as_str()])
    });
    lights.chain(modes).collect()
}

// --- Placement ---

pub(crate) fn default_placement_config() -> PlacementConfig {
    PlacementConfig {
        terminal_app_ids: default_terminal_app_ids(),
        terminal_font_width: default_terminal_font_width(),
        terminal_columns: default_terminal_columns(),
    }
}

pub(crate) fn default_terminal_app_ids() -> Vec<String> {
    vec!["foot".to_string(), "XTerm".to_string(), "URxvt".to_string()]
}

pub(crate) fn default_terminal_font_width() -> i32 {
    15
}

pub(crate) fn default_terminal_columns() -> i32 {
    80
}

// --- Decoration ---

pub(crate) fn default_decoration_config() -> DecorationConfig {
    DecorationConfig {
        focused_color: default_focused_color(),
        default_color: default_border_color(),
    }
}

pub(crate) fn default_focused_color() -> Color {
    Color::new(0.8, 0.4, 0.1, 0.1)
}

pub(crate) fn default_border_color() -> Color {
    Color::new(0.4, 0.4, 0.4, 0.1)
}

// --- IPC ---

pub(crate) fn default_ipc_config() -> IpcConfig {
    IpcConfig {
        status_socket: default_status_socket(),
    }
}

pub(crate) fn default_status_socket() -> PathBuf {
    PathBuf::from("/tmp/stage.sock")
}
