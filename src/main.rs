//! # Keypad Bridge
//!
//! Drive a virtual Xbox 360 controller from the keyboard.
//!
//! This application loads the key mappings, plugs in a virtual controller
//! and feeds key transitions to the remapping engine. Without a hook
//! installed, transitions and mapping edits come from console commands on
//! stdin.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use keypad_bridge::config::{Config, LoggingConfig};
use keypad_bridge::console::{self, Command};
use keypad_bridge::engine::RemapEngine;
use keypad_bridge::error::{DriverError, RemapError};
use keypad_bridge::mapping::MappingHandle;
use keypad_bridge::report::{LoggingBus, VirtualBus};

/// Config file read when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Main entry point for Keypad Bridge
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Load `config.toml` (or the path given as first argument), falling
///      back to defaults if it does not exist
///    - Set up logging with tracing subscriber
///    - Load the mappings file and plug in the default controller
///
/// 2. **Main Loop**
///    - Read console commands from stdin and run them against the engine
///    - Handle Ctrl+C and end of input for graceful shutdown
///
/// 3. **Graceful Shutdown**
///    - Unplug every controller
///
/// # Errors
///
/// Returns error if:
/// - The config file exists but is invalid
/// - The log file cannot be set up
/// - Reading stdin fails
///
/// # Examples
///
/// ```bash
/// cargo run --release -- config.toml
/// ```
///
/// Expected output:
/// ```text
/// INFO keypad_bridge: Keypad Bridge v0.1.0 starting...
/// INFO keypad_bridge::mapping::handle: Loaded 12 mappings from settings.txt
/// INFO keypad_bridge::engine: Successfully plugged in controller 1
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    let config_path = config_path_from_args(std::env::args().skip(1));
    let config = if config_path.exists() {
        Config::load(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?
    } else {
        Config::default()
    };

    let _log_guard = init_logging(&config.logging)?;

    info!("Keypad Bridge v{} starting...", env!("CARGO_PKG_VERSION"));
    if !config_path.exists() {
        info!("No config at {}, using defaults", config_path.display());
    }

    let mappings = MappingHandle::new();
    if config.mappings.load_on_start {
        if let Err(e) = mappings.load_from(&config.mappings.path) {
            warn!("Could not load mappings from {}: {}", config.mappings.path.display(), e);
        }
    }

    let mut engine = RemapEngine::new(mappings, LoggingBus::new());
    let slot = config.bus.slot()?;
    engine.select_slot(slot);

    if config.bus.plug_in_on_start {
        let _ = engine.plug_in(slot);
    }

    info!("Reading commands from stdin");
    info!("Press Ctrl+C to exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read stdin")? {
                    Some(line) => run_line(&mut engine, &line, &config.mappings.path),
                    None => {
                        info!("End of input, shutting down...");
                        break;
                    }
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    if config.bus.unplug_all_on_exit {
        let _ = engine.unplug_all();
    }

    Ok(())
}

/// First command-line argument, or [`DEFAULT_CONFIG_PATH`]
fn config_path_from_args<I: Iterator<Item = String>>(mut args: I) -> PathBuf {
    args.next()
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Installs the global subscriber.
///
/// `RUST_LOG` directives are combined with the configured level. When a log
/// file is configured, output goes through a non-blocking writer whose guard
/// must live until exit.
fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let level: tracing::Level = config
        .level
        .parse()
        .with_context(|| format!("Invalid log level {:?}", config.level))?;
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    match &config.file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Log file {} has no file name", path.display()))?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

/// Parses and runs one console line, printing any output.
fn run_line<B: VirtualBus>(engine: &mut RemapEngine<B>, line: &str, settings_path: &Path) {
    if line.trim().is_empty() {
        return;
    }

    let result = line
        .parse::<Command>()
        .and_then(|command| console::execute(engine, command, settings_path));

    match result {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => {}
        Err(RemapError::Driver(DriverError::InvalidSlot(slot))) => {
            warn!("{}", DriverError::InvalidSlot(slot));
        }
        // Bus failures are logged by the engine
        Err(RemapError::Driver(_)) => {}
        Err(e) => warn!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_defaults() {
        assert_eq!(
            config_path_from_args(std::iter::empty()),
            PathBuf::from("config.toml")
        );
    }

    #[test]
    fn test_config_path_from_first_argument() {
        let args = vec!["custom.toml".to_string(), "ignored".to_string()];
        assert_eq!(
            config_path_from_args(args.into_iter()),
            PathBuf::from("custom.toml")
        );
    }

    #[test]
    fn test_run_line_drives_engine() {
        let mut engine = RemapEngine::new(MappingHandle::new(), LoggingBus::new());
        let path = Path::new("unused.txt");

        run_line(&mut engine, "Map: A, ButtonA", path);
        run_line(&mut engine, "plug 1", path);
        run_line(&mut engine, "down A", path);
        run_line(&mut engine, "not a command", path);
        run_line(&mut engine, "   ", path);

        assert!(engine.current_state().any_button_pressed());
        assert!(engine.sink().bus().is_plugged(1));
    }
}
