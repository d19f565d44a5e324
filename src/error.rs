//! # Error Types
//!
//! Custom error types for Keypad Bridge using `thiserror`.

use thiserror::Error;

/// Failures reported by the virtual bus driver.
///
/// These are never retried internally. A failing bus usually means the
/// driver service is not installed or not running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The bus refused to plug in a controller
    #[error("could not plug in controller {slot}")]
    PlugIn { slot: u8 },

    /// The bus refused to unplug a controller
    #[error("could not unplug controller {slot} (was it plugged in?)")]
    Unplug { slot: u8 },

    /// The bus refused to unplug all controllers
    #[error("could not unplug all controllers (were any plugged in?)")]
    UnplugAll,

    /// The bus rejected an input report
    #[error("bus rejected report for controller {slot}")]
    Report { slot: u8 },

    /// Slot number outside the range the bus exposes
    #[error("controller slot {0} is out of range (must be 1-4)")]
    InvalidSlot(i64),
}

/// Main error type for Keypad Bridge
#[derive(Debug, Error)]
pub enum RemapError {
    /// Virtual bus errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed bus reports
    #[error("Report protocol error: {0}")]
    Protocol(String),

    /// Console input that is not a known command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

/// Result type alias for Keypad Bridge
pub type Result<T> = std::result::Result<T, RemapError>;
