//! Configuration management for the stage compositor.
//!
//! - [`types`]: the configuration schema, rooted at [`StageConfig`].
//! - [`defaults`]: the compiled-in values used by `Default` and by serde when
//!   a key is missing.
//! - [`loader`]: [`ConfigLoader`], which parses TOML and validates the result.
//!
//! The compositor runs from `StageConfig::default()`. A TOML file is only an
//! overlay: any key it omits keeps its compiled-in value.

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{
    modifier_bit, BindingsConfig, DecorationConfig, HelperBinding, IpcConfig, KeyboardConfig,
    LoggingConfig, PlacementConfig, StageConfig, MODIFIER_NAMES,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults as config_defaults;
    use crate::types::Color;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn default_config_matches_compiled_constants() {
        let config = StageConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file_path, None);
        assert_eq!(config.keyboard.layouts, "us,ru");
        assert_eq!(config.keyboard.repeat_rate, 25);
        assert_eq!(config.keyboard.repeat_delay, 600);
        assert_eq!(config.bindings.primary_modifier, "logo");
        assert_eq!(config.bindings.dev_modifier, "alt");
        assert_eq!(config.bindings.terminal, "foot");
        assert_eq!(
            config.placement.terminal_app_ids,
            vec!["foot".to_string(), "XTerm".to_string(), "URxvt".to_string()]
        );
        assert_eq!(config.placement.terminal_font_width, 15);
        assert_eq!(config.placement.terminal_columns, 80);
        assert_eq!(config.decoration.focused_color, Color::new(0.8, 0.4, 0.1, 0.1));
        assert_eq!(config.decoration.default_color, Color::new(0.4, 0.4, 0.4, 0.1));
        assert_eq!(config.ipc.status_socket, PathBuf::from("/tmp/stage.sock"));
    }

    #[test]
    fn default_helpers_cover_light_and_mode_keys() {
        let helpers = config_defaults::default_helpers();
        let keys: Vec<&str> = helpers.iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, vec!["q", "w", "e", "r", "a", "s"]);
        assert_eq!(helpers[2].command.last().map(String::as_str), Some("2"));
        assert_eq!(helpers[5].command.last().map(String::as_str), Some("1"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: StageConfig = toml::from_str(
            r#"
            [keyboard]
            layouts = "us,de"
            "#,
        )
        .unwrap();
        assert_eq!(config.keyboard.layouts, "us,de");
        assert_eq!(config.keyboard.repeat_rate, 25);
        assert_eq!(config.bindings, BindingsConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<StageConfig, _> = toml::from_str(
            r#"
            [keyboard]
            layout = "us"
            "#,
        );
        assert!(result.is_err());
    }
}
