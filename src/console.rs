//! # Command Console
//!
//! Line-oriented commands that drive the engine from stdin.
//!
//! ```text
//! down <key>            simulate a key press (name or code)
//! up <key>              simulate a key release
//! Map: <key>, <action>  bind a key (ButtonNone unbinds)
//! unmap <key>           unbind a key
//! reset                 unbind every key
//! list                  show every binding
//! save | load           write or read the settings file
//! plug <n> | unplug <n> plug in or unplug controller n (1-4)
//! unplug-all            unplug every controller
//! slot <n>              route key transitions to controller n
//! find                  capture the next key press (again to cancel)
//! state                 show the active controller state
//! ```

use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use crate::controller::slot::ControllerSlot;
use crate::controller::state::ControllerState;
use crate::engine::{KeyTransition, RemapEngine};
use crate::error::{RemapError, Result};
use crate::mapping::action::{LogicalAction, TriggerSide};
use crate::mapping::keys::KeyCode;
use crate::mapping::settings::{parse_binding, MAP_PREFIX};
use crate::report::sink::VirtualBus;

/// One console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Key(KeyTransition),
    Map(KeyCode, LogicalAction),
    Unmap(KeyCode),
    Reset,
    List,
    Save,
    Load,
    Plug(ControllerSlot),
    Unplug(ControllerSlot),
    UnplugAll,
    Slot(ControllerSlot),
    Find,
    State,
}

impl FromStr for Command {
    type Err = RemapError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let invalid = || RemapError::InvalidCommand(line.to_string());

        if line.starts_with(MAP_PREFIX) {
            let (key, action) = parse_binding(line).ok_or_else(invalid)?;
            return Ok(Command::Map(key, action));
        }

        let mut words = line.split_whitespace();
        let verb = words.next().ok_or_else(invalid)?;
        let argument = words.next();
        if words.next().is_some() {
            return Err(invalid());
        }

        let command = match (verb.to_ascii_lowercase().as_str(), argument) {
            ("down", Some(key)) => Command::Key(KeyTransition::press(parse_code(key).ok_or_else(invalid)?)),
            ("up", Some(key)) => Command::Key(KeyTransition::release(parse_code(key).ok_or_else(invalid)?)),
            ("unmap", Some(key)) => Command::Unmap(key.parse().map_err(|_| invalid())?),
            ("plug", Some(slot)) => Command::Plug(parse_slot(slot).ok_or_else(invalid)??),
            ("unplug", Some(slot)) => Command::Unplug(parse_slot(slot).ok_or_else(invalid)??),
            ("slot", Some(slot)) => Command::Slot(parse_slot(slot).ok_or_else(invalid)??),
            ("reset", None) => Command::Reset,
            ("list", None) => Command::List,
            ("save", None) => Command::Save,
            ("load", None) => Command::Load,
            ("unplug-all", None) => Command::UnplugAll,
            ("find", None) => Command::Find,
            ("state", None) => Command::State,
            _ => return Err(invalid()),
        };
        Ok(command)
    }
}

/// Key name or raw code. Raw codes may be out of range; the engine drops those.
fn parse_code(word: &str) -> Option<i32> {
    word.parse::<KeyCode>()
        .map(|key| i32::from(key.code()))
        .ok()
        .or_else(|| word.parse::<i32>().ok())
}

/// `None` if not a number, `Some(Err)` if out of range.
fn parse_slot(word: &str) -> Option<Result<ControllerSlot>> {
    let number = word.parse::<i64>().ok()?;
    Some(ControllerSlot::new(number).map_err(RemapError::from))
}

/// Runs one command against the engine.
///
/// # Arguments
///
/// * `engine` - Engine to drive
/// * `command` - Parsed command
/// * `settings_path` - Settings file used by `save` and `load`
///
/// # Returns
///
/// Text to show the user, if the command produces any.
///
/// # Errors
///
/// Returns driver errors from plug/unplug and report calls, and I/O errors
/// from `save` and `load`.
pub fn execute<B: VirtualBus>(
    engine: &mut RemapEngine<B>,
    command: Command,
    settings_path: &Path,
) -> Result<Option<String>> {
    match command {
        Command::Key(transition) => {
            let handled = engine.handle_key(transition);
            let captured = engine.key_capture().take();
            handled?;
            Ok(captured.map(|key| format!("Captured key {} (code {})", key, key.code())))
        }
        Command::Map(key, action) => {
            engine.mappings().set_mapping(key, action);
            Ok(None)
        }
        Command::Unmap(key) => {
            if engine.mappings().remove_mapping(key) {
                Ok(None)
            } else {
                Ok(Some(format!("{} is not mapped", key)))
            }
        }
        Command::Reset => {
            engine.mappings().reset_all();
            Ok(None)
        }
        Command::List => Ok(Some(format_bindings(&engine.mappings().current_mappings()))),
        Command::Save => {
            engine.mappings().save_to(settings_path)?;
            Ok(None)
        }
        Command::Load => {
            engine.mappings().load_from(settings_path)?;
            Ok(None)
        }
        Command::Plug(slot) => {
            engine.plug_in(slot)?;
            Ok(None)
        }
        Command::Unplug(slot) => {
            engine.unplug(slot)?;
            Ok(None)
        }
        Command::UnplugAll => {
            engine.unplug_all()?;
            Ok(None)
        }
        Command::Slot(slot) => {
            engine.select_slot(slot);
            Ok(None)
        }
        Command::Find => {
            let capture = engine.key_capture();
            if capture.is_armed() {
                capture.disarm();
                Ok(Some("Find cancelled".to_string()))
            } else {
                capture.arm();
                Ok(Some("Press a key...".to_string()))
            }
        }
        Command::State => {
            let slot = engine.active_slot();
            Ok(Some(format_state(slot, engine.is_plugged(slot), engine.current_state())))
        }
    }
}

fn format_bindings(bindings: &[(KeyCode, LogicalAction)]) -> String {
    if bindings.is_empty() {
        return "No mappings".to_string();
    }
    bindings
        .iter()
        .map(|(key, action)| format!("{} {}, {}", MAP_PREFIX, key, action))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_state(slot: ControllerSlot, plugged: bool, state: &ControllerState) -> String {
    let mut buttons = String::new();
    for button in state.buttons.iter() {
        if !buttons.is_empty() {
            buttons.push('|');
        }
        let _ = write!(buttons, "{}", LogicalAction::DiscreteButton(button));
    }
    if buttons.is_empty() {
        buttons.push('-');
    }

    format!(
        "controller {} ({}): buttons={} lt={} rt={} ls=({}, {}) rs=({}, {})",
        slot,
        if plugged { "plugged in" } else { "not plugged in" },
        buttons,
        state.trigger(TriggerSide::Left),
        state.trigger(TriggerSide::Right),
        state.left_stick_x,
        state.left_stick_y,
        state.right_stick_x,
        state.right_stick_y,
    )
}
