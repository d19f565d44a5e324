//! # Mapping Module
//!
//! Keyboard key to controller action bindings.
//!
//! This module handles:
//! - Naming keys and controller actions
//! - The shared, lock-free key code lookup table
//! - The configuration surface used to edit bindings at runtime
//! - Loading and saving bindings to the settings file

pub mod action;
pub mod handle;
pub mod keys;
pub mod settings;
pub mod table;

pub use action::{Axis, AxisSign, Button, LogicalAction, TriggerSide};
pub use handle::MappingHandle;
pub use keys::KeyCode;
pub use table::MappingTable;
