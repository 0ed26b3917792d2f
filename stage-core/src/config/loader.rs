//! Configuration loading.
//!
//! [`ConfigLoader`] parses a TOML overlay into [`StageConfig`] and validates
//! the result. With no file the compiled-in defaults are used unchanged.

use crate::config::types::modifier_bit;
use crate::config::StageConfig;
use crate::error::{ConfigError, CoreError};
use std::fs;
use std::io;
use std::path::Path;

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: [&str; 2] = ["text", "json"];
/// Letters already claimed by the primary binding table.
const RESERVED_KEYS: [&str; 2] = ["m", "f"];

/// Namespace for configuration loading.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parses and validates configuration from a TOML string.
    pub fn load_from_str(content: &str) -> Result<StageConfig, CoreError> {
        let config: StageConfig = toml::from_str(content).map_err(ConfigError::ParseError)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Reads, parses and validates the file at `path`.
    pub fn load_from_path(path: &Path) -> Result<StageConfig, CoreError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::load_from_str(&content)?;
        tracing::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Like [`load_from_path`](Self::load_from_path), but a missing file (or no
    /// path at all) yields `StageConfig::default()`.
    pub fn load_or_default(path: Option<&Path>) -> Result<StageConfig, CoreError> {
        let Some(path) = path else {
            return Ok(StageConfig::default());
        };
        match fs::read_to_string(path) {
            Ok(content) => Self::load_from_str(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("No configuration at {:?}, using defaults", path);
                Ok(StageConfig::default())
            }
            Err(source) => Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source,
            }
            .into()),
        }
    }

    /// Checks value ranges that the schema cannot express.
    pub fn validate(config: &StageConfig) -> Result<(), ConfigError> {
        let level = config.logging.level.to_lowercase();
        if !VALID_LEVELS.contains(&level.as_str()) {
            return Err(invalid(format!("invalid log level '{}'", config.logging.level)));
        }
        let format = config.logging.format.to_lowercase();
        if !VALID_FORMATS.contains(&format.as_str()) {
            return Err(invalid(format!("invalid log format '{}'", config.logging.format)));
        }

        if config.keyboard.repeat_rate <= 0 {
            return Err(invalid("keyboard.repeat_rate must be positive".to_string()));
        }
        if config.keyboard.repeat_delay < 0 {
            return Err(invalid("keyboard.repeat_delay must not be negative".to_string()));
        }
        if config.keyboard.layouts.trim().is_empty() {
            return Err(invalid("keyboard.layouts must not be empty".to_string()));
        }

        for modifier in [&config.bindings.primary_modifier, &config.bindings.dev_modifier] {
            if modifier_bit(modifier).is_none() {
                return Err(invalid(format!("unknown modifier '{}'", modifier)));
            }
        }
        if config.bindings.terminal.trim().is_empty() {
            return Err(invalid("bindings.terminal must not be empty".to_string()));
        }
        let mut seen: Vec<&str> = Vec::new();
        for helper in &config.bindings.helpers {
            let key = helper.key.as_str();
            let single_letter = key.len() == 1 && key.bytes().all(|b| b.is_ascii_lowercase());
            if !single_letter {
                return Err(invalid(format!(
                    "helper key '{}' must be a single lowercase letter",
                    key
                )));
            }
            if RESERVED_KEYS.contains(&key) {
                return Err(invalid(format!("helper key '{}' is reserved", key)));
            }
            if seen.contains(&key) {
                return Err(invalid(format!("helper key '{}' is bound twice", key)));
            }
            seen.push(key);
            if helper.command.first().map_or(true, |p| p.trim().is_empty()) {
                return Err(invalid(format!("helper '{}' has an empty command", key)));
            }
        }

        if config.placement.terminal_font_width <= 0 || config.placement.terminal_columns <= 0 {
            return Err(invalid(
                "placement.terminal_font_width and terminal_columns must be positive".to_string(),
            ));
        }
        if config.placement.checked_terminal_width().is_none() {
            return Err(invalid(
                "placement.terminal_font_width * terminal_columns is too large".to_string(),
            ));
        }

        if !config.decoration.focused_color.is_valid() || !config.decoration.default_color.is_valid()
        {
            return Err(invalid("decoration colors must be within [0, 1]".to_string()));
        }

        if config.ipc.status_socket.as_os_str().is_empty() {
            return Err(invalid("ipc.status_socket must not be empty".to_string()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn defaults_are_valid() {
        ConfigLoader::validate(&StageConfig::default()).unwrap();
    }

    #[test]
    fn load_from_path_reads_overlay() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stage.toml");
        fs::write(
            &path,
            r#"
            [bindings]
            terminal = "alacritty"

            [ipc]
            status_socket = "/run/user/1000/stage.sock"
            "#,
        )
        .unwrap();
        let config = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(config.bindings.terminal, "alacritty");
        assert_eq!(
            config.ipc.status_socket,
            PathBuf::from("/run/user/1000/stage.sock")
        );
        assert_eq!(config.bindings.primary_modifier, "logo");
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let config = ConfigLoader::load_or_default(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, StageConfig::default());
        assert_eq!(ConfigLoader::load_or_default(None).unwrap(), StageConfig::default());
    }

    #[test]
    fn load_from_path_reports_missing_file() {
        let dir = tempdir().unwrap();
        let err = ConfigLoader::load_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::ReadError { .. })));
    }

    #[test]
    fn parse_error_is_reported() {
        let err = ConfigLoader::load_from_str("[keyboard\nlayouts = 1").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::ParseError(_))));
    }

    #[rstest]
    #[case::super_key("super")]
    #[case::control("Control")]
    #[case::mod1("mod1")]
    #[case::mod4("mod4")]
    fn modifier_aliases_are_accepted(#[case] name: &str) {
        let content = format!("[bindings]\nprimary_modifier = \"{name}\"\ndev_modifier = \"{name}\"");
        let config = ConfigLoader::load_from_str(&content).unwrap();
        assert_eq!(config.bindings.primary_modifier, name);
    }

    #[rstest]
    #[case::log_level("[logging]\nlevel = \"loud\"")]
    #[case::log_format("[logging]\nformat = \"xml\"")]
    #[case::repeat_rate("[keyboard]\nrepeat_rate = 0")]
    #[case::modifier("[bindings]\nprimary_modifier = \"hyper\"")]
    #[case::empty_terminal("[bindings]\nterminal = \"  \"")]
    #[case::reserved_key("[[bindings.helpers]]\nkey = \"m\"\ncommand = [\"x\"]")]
    #[case::digit_key("[[bindings.helpers]]\nkey = \"1\"\ncommand = [\"x\"]")]
    #[case::empty_command("[[bindings.helpers]]\nkey = \"z\"\ncommand = []")]
    #[case::duplicate_key(
        "[[bindings.helpers]]\nkey = \"z\"\ncommand = [\"x\"]\n[[bindings.helpers]]\nkey = \"z\"\ncommand = [\"y\"]"
    )]
    #[case::font_width("[placement]\nterminal_font_width = 0")]
    #[case::terminal_width_overflow(
        "[placement]\nterminal_font_width = 100000\nterminal_columns = 100000"
    )]
    #[case::color("[decoration]\nfocused_color = [2.0, 0.0, 0.0, 1.0]")]
    fn invalid_values_are_rejected(#[case] content: &str) {
        let err = ConfigLoader::load_from_str(content).unwrap_err();
        assert!(
            matches!(err, CoreError::Config(ConfigError::ValidationError(_))),
            "unexpected error: {err}"
        );
    }
}
