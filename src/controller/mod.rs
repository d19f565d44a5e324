//! # Controller Module
//!
//! Virtual Xbox 360 controller state.
//!
//! This module handles:
//! - The button bitmask (press sets a bit, release clears it)
//! - Resolving two opposing direction keys into one stick axis
//! - The full controller snapshot handed to the report encoder
//! - Slot numbers identifying each virtual controller on the bus

pub mod axis;
pub mod buttons;
pub mod slot;
pub mod state;

pub use axis::{AxisHeldFlags, AxisResolver};
pub use buttons::ButtonMask;
pub use slot::ControllerSlot;
pub use state::ControllerState;
