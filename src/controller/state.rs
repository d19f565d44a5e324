//! # Controller State
//!
//! The complete payload of one virtual controller: buttons, two triggers and
//! two sticks.
//!
//! ## Value Ranges
//!
//! | Input | Type | Neutral | Range |
//! |-------|------|---------|-------|
//! | Buttons | bitmask | `0` | 15 bits used |
//! | Left / Right Trigger | `u8` | `0` | 0-255 |
//! | Stick X / Y | `i16` | `0` | -32768..=32767 (up and right positive) |

use super::buttons::ButtonMask;
use crate::mapping::action::{Axis, TriggerSide};

/// Trigger value when released.
pub const TRIGGER_RELEASED: u8 = 0;
/// Trigger value when pressed. Keys are digital, so a press is full travel.
pub const TRIGGER_PRESSED: u8 = u8::MAX;

/// Snapshot of one virtual controller.
///
/// # Examples
///
/// ```
/// use keypad_bridge::controller::state::ControllerState;
///
/// let state = ControllerState::default();
/// assert!(state.is_neutral());
/// assert_eq!(state.left_stick_x, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerState {
    /// Pressed discrete buttons
    pub buttons: ButtonMask,

    /// Left trigger. 0 = released, 255 = fully pressed.
    pub left_trigger: u8,
    /// Right trigger. 0 = released, 255 = fully pressed.
    pub right_trigger: u8,

    /// Left stick X. Negative = left.
    pub left_stick_x: i16,
    /// Left stick Y. Positive = up.
    pub left_stick_y: i16,
    /// Right stick X. Negative = left.
    pub right_stick_x: i16,
    /// Right stick Y. Positive = up.
    pub right_stick_y: i16,
}

impl ControllerState {
    /// Creates a neutral state: no buttons, triggers released, sticks centered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a stick axis.
    #[must_use]
    pub const fn axis(&self, axis: Axis) -> i16 {
        match axis {
            Axis::LeftStickX => self.left_stick_x,
            Axis::LeftStickY => self.left_stick_y,
            Axis::RightStickX => self.right_stick_x,
            Axis::RightStickY => self.right_stick_y,
        }
    }

    pub fn set_axis(&mut self, axis: Axis, value: i16) {
        match axis {
            Axis::LeftStickX => self.left_stick_x = value,
            Axis::LeftStickY => self.left_stick_y = value,
            Axis::RightStickX => self.right_stick_x = value,
            Axis::RightStickY => self.right_stick_y = value,
        }
    }

    /// Current value of a trigger.
    #[must_use]
    pub const fn trigger(&self, side: TriggerSide) -> u8 {
        match side {
            TriggerSide::Left => self.left_trigger,
            TriggerSide::Right => self.right_trigger,
        }
    }

    /// Pulls a trigger to full travel or releases it.
    pub fn set_trigger(&mut self, side: TriggerSide, pressed: bool) {
        let value = if pressed { TRIGGER_PRESSED } else { TRIGGER_RELEASED };
        match side {
            TriggerSide::Left => self.left_trigger = value,
            TriggerSide::Right => self.right_trigger = value,
        }
    }

    /// Checks if any button is currently pressed.
    #[must_use]
    pub const fn any_button_pressed(&self) -> bool {
        !self.buttons.is_empty()
    }

    /// Checks if either trigger is pulled.
    #[must_use]
    pub const fn any_trigger_pressed(&self) -> bool {
        self.trigger(TriggerSide::Left) != TRIGGER_RELEASED
            || self.trigger(TriggerSide::Right) != TRIGGER_RELEASED
    }

    /// Checks if any stick has moved from center.
    #[must_use]
    pub fn any_stick_moved(&self) -> bool {
        Axis::ALL.iter().any(|axis| self.axis(*axis) != 0)
    }

    /// Returns `true` if nothing is pressed and both sticks are centered.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        !self.any_button_pressed() && !self.any_trigger_pressed() && !self.any_stick_moved()
    }

    /// Resets to neutral.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
