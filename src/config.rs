//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::controller::slot::ControllerSlot;
use crate::error::{RemapError, Result};

/// Log levels accepted in `[logging] level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub bus: BusConfig,

    #[serde(default)]
    pub mappings: MappingsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Virtual bus configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BusConfig {
    #[serde(default = "default_slot")]
    pub default_slot: i64,

    #[serde(default = "default_true")]
    pub plug_in_on_start: bool,

    #[serde(default = "default_true")]
    pub unplug_all_on_exit: bool,
}

/// Mapping persistence configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MappingsConfig {
    #[serde(default = "default_mappings_path")]
    pub path: PathBuf,

    #[serde(default = "default_true")]
    pub load_on_start: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub file: Option<PathBuf>,
}

// Default value functions
fn default_slot() -> i64 { 1 }
fn default_true() -> bool { true }
fn default_mappings_path() -> PathBuf { PathBuf::from("settings.txt") }
fn default_log_level() -> String { "info".to_string() }

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            default_slot: default_slot(),
            plug_in_on_start: default_true(),
            unplug_all_on_exit: default_true(),
        }
    }
}

impl Default for MappingsConfig {
    fn default() -> Self {
        Self {
            path: default_mappings_path(),
            load_on_start: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl BusConfig {
    /// The configured default slot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::DriverError::InvalidSlot`] if out of range.
    pub fn slot(&self) -> Result<ControllerSlot> {
        Ok(ControllerSlot::new(self.default_slot)?)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use keypad_bridge::config::Config;
    ///
    /// let config = Config::load("config.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns error if TOML parsing or validation fails
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if ControllerSlot::new(self.bus.default_slot).is_err() {
            return Err(RemapError::Config(
                toml::de::Error::custom("default_slot must be between 1 and 4")
            ));
        }

        if self.mappings.path.as_os_str().is_empty() {
            return Err(RemapError::Config(
                toml::de::Error::custom("mappings path cannot be empty")
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(RemapError::Config(
                toml::de::Error::custom("log level must be one of: trace, debug, info, warn, error")
            ));
        }

        if let Some(file) = &self.logging.file {
            if file.as_os_str().is_empty() {
                return Err(RemapError::Config(
                    toml::de::Error::custom("log file cannot be empty when set")
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_config() -> Config {
        Config {
            bus: BusConfig {
                default_slot: default_slot(),
                plug_in_on_start: true,
                unplug_all_on_exit: true,
            },
            mappings: MappingsConfig {
                path: default_mappings_path(),
                load_on_start: true,
            },
            logging: LoggingConfig {
                level: default_log_level(),
                file: None,
            },
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bus.default_slot, 1);
        assert_eq!(config.mappings.path, PathBuf::from("settings.txt"));
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.bus.plug_in_on_start);
        assert!(config.bus.unplug_all_on_exit);
        assert!(config.mappings.load_on_start);
    }

    #[test]
    fn test_load_config_from_file() {
        let toml_content = r#"
[bus]
default_slot = 3
unplug_all_on_exit = false

[mappings]
path = "profiles/racing.txt"

[logging]
level = "debug"
file = "keypad-bridge.log"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.bus.slot().unwrap().number(), 3);
        assert!(config.bus.plug_in_on_start);
        assert!(!config.bus.unplug_all_on_exit);
        assert_eq!(config.mappings.path, PathBuf::from("profiles/racing.txt"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("keypad-bridge.log")));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path().join("config.toml"));
        assert!(matches!(result, Err(RemapError::Io(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = Config::parse("[bus\ndefault_slot = 1");
        assert!(matches!(result, Err(RemapError::Config(_))));
    }

    #[test]
    fn test_wrong_type() {
        let result = Config::parse("[bus]\ndefault_slot = \"one\"");
        assert!(matches!(result, Err(RemapError::Config(_))));
    }

    #[test]
    fn test_default_slot_out_of_range() {
        let mut config = create_valid_config();
        config.bus.default_slot = 0;
        assert!(config.validate().is_err());

        config.bus.default_slot = 5;
        assert!(config.validate().is_err());

        config.bus.default_slot = 4;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_mappings_path() {
        let mut config = create_valid_config();
        config.mappings.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = create_valid_config();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_all_log_levels_accepted() {
        let mut config = create_valid_config();
        for level in LOG_LEVELS {
            config.logging.level = level.to_string();
            assert!(config.validate().is_ok(), "{} should be valid", level);
        }
    }

    #[test]
    fn test_empty_log_file() {
        let mut config = create_valid_config();
        config.logging.file = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }
}
