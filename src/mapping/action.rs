//! # Logical Actions
//!
//! The controller-side effects a keyboard key can be bound to: one discrete
//! button, one signed direction of one stick axis, or one trigger.
//!
//! ## Persisted Names
//!
//! | Name | Action |
//! |------|--------|
//! | `ButtonA` .. `ButtonY` | Face buttons |
//! | `DpadLeft`, `DpadRight`, `DpadUp`, `DpadDown` | D-Pad |
//! | `BumperLeft`, `BumperRight` | Shoulder buttons |
//! | `ButtonXbox`, `ButtonStart`, `ButtonBack` | System buttons |
//! | `LeftStickClick`, `RightStickClick` | Stick clicks |
//! | `LeftStickLeft` .. `RightStickDown` | Stick directions |
//! | `TriggerLeft`, `TriggerRight` | Triggers (full travel) |
//! | `ButtonNone` | Unbound |

use std::fmt;
use std::str::FromStr;

/// Discrete controller buttons.
///
/// The order of [`Button::ALL`] is stable; it is the index used to pack an
/// action into a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    LeftBumper,
    RightBumper,
    /// The Xbox logo button
    Guide,
    Start,
    Back,
    /// Left stick click
    LeftThumb,
    /// Right stick click
    RightThumb,
}

impl Button {
    /// Number of discrete buttons
    pub const COUNT: usize = 15;

    /// Every button, in packing order
    pub const ALL: [Button; Self::COUNT] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::DpadUp,
        Button::DpadDown,
        Button::DpadLeft,
        Button::DpadRight,
        Button::LeftBumper,
        Button::RightBumper,
        Button::Guide,
        Button::Start,
        Button::Back,
        Button::LeftThumb,
        Button::RightThumb,
    ];

    /// Bit of this button in the input report's button word.
    ///
    /// # Examples
    ///
    /// ```
    /// use keypad_bridge::mapping::action::Button;
    ///
    /// assert_eq!(Button::A.mask(), 0x1000);
    /// assert_eq!(Button::DpadUp.mask(), 0x0001);
    /// ```
    #[must_use]
    pub const fn mask(self) -> u16 {
        match self {
            Button::DpadUp => 0x0001,
            Button::DpadDown => 0x0002,
            Button::DpadLeft => 0x0004,
            Button::DpadRight => 0x0008,
            Button::Start => 0x0010,
            Button::Back => 0x0020,
            Button::LeftThumb => 0x0040,
            Button::RightThumb => 0x0080,
            Button::LeftBumper => 0x0100,
            Button::RightBumper => 0x0200,
            Button::Guide => 0x0400,
            Button::A => 0x1000,
            Button::B => 0x2000,
            Button::X => 0x4000,
            Button::Y => 0x8000,
        }
    }

    const fn index(self) -> u8 {
        self as u8
    }

    const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }
}

/// The four analog stick axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
}

impl Axis {
    /// Number of stick axes
    pub const COUNT: usize = 4;

    /// Every axis, in packing order
    pub const ALL: [Axis; Self::COUNT] = [
        Axis::LeftStickX,
        Axis::LeftStickY,
        Axis::RightStickX,
        Axis::RightStickY,
    ];

    /// Position of this axis in [`Axis::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Direction along an axis. Up and right are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSign {
    Negative,
    Positive,
}

impl AxisSign {
    /// Position of this sign in a two-entry held-flag pair
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Left or right trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerSide {
    Left,
    Right,
}

/// What a key does when pressed.
///
/// A key maps to at most one action at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogicalAction {
    /// Key is not bound
    #[default]
    None,
    /// Sets a button while held
    DiscreteButton(Button),
    /// Pushes one stick axis to an extreme while held
    AxisDirection(Axis, AxisSign),
    /// Pulls a trigger to full travel while held
    Trigger(TriggerSide),
}

/// Persisted name for every action, `ButtonNone` first.
const ACTION_NAMES: [(&str, LogicalAction); 26] = [
    ("ButtonNone", LogicalAction::None),
    ("ButtonA", LogicalAction::DiscreteButton(Button::A)),
    ("ButtonB", LogicalAction::DiscreteButton(Button::B)),
    ("ButtonX", LogicalAction::DiscreteButton(Button::X)),
    ("ButtonY", LogicalAction::DiscreteButton(Button::Y)),
    ("DpadLeft", LogicalAction::DiscreteButton(Button::DpadLeft)),
    ("DpadRight", LogicalAction::DiscreteButton(Button::DpadRight)),
    ("DpadUp", LogicalAction::DiscreteButton(Button::DpadUp)),
    ("DpadDown", LogicalAction::DiscreteButton(Button::DpadDown)),
    ("BumperLeft", LogicalAction::DiscreteButton(Button::LeftBumper)),
    ("BumperRight", LogicalAction::DiscreteButton(Button::RightBumper)),
    ("ButtonXbox", LogicalAction::DiscreteButton(Button::Guide)),
    ("ButtonStart", LogicalAction::DiscreteButton(Button::Start)),
    ("ButtonBack", LogicalAction::DiscreteButton(Button::Back)),
    ("LeftStickClick", LogicalAction::DiscreteButton(Button::LeftThumb)),
    ("LeftStickLeft", LogicalAction::AxisDirection(Axis::LeftStickX, AxisSign::Negative)),
    ("LeftStickRight", LogicalAction::AxisDirection(Axis::LeftStickX, AxisSign::Positive)),
    ("LeftStickUp", LogicalAction::AxisDirection(Axis::LeftStickY, AxisSign::Positive)),
    ("LeftStickDown", LogicalAction::AxisDirection(Axis::LeftStickY, AxisSign::Negative)),
    ("RightStickClick", LogicalAction::DiscreteButton(Button::RightThumb)),
    ("RightStickLeft", LogicalAction::AxisDirection(Axis::RightStickX, AxisSign::Negative)),
    ("RightStickRight", LogicalAction::AxisDirection(Axis::RightStickX, AxisSign::Positive)),
    ("RightStickUp", LogicalAction::AxisDirection(Axis::RightStickY, AxisSign::Positive)),
    ("RightStickDown", LogicalAction::AxisDirection(Axis::RightStickY, AxisSign::Negative)),
    ("TriggerLeft", LogicalAction::Trigger(TriggerSide::Left)),
    ("TriggerRight", LogicalAction::Trigger(TriggerSide::Right)),
];

// Packed layout: 0 = None, 1..=15 buttons, 16..=23 axis directions, 24..=25 triggers.
const BUTTON_BASE: u8 = 1;
const AXIS_BASE: u8 = BUTTON_BASE + Button::COUNT as u8;
const TRIGGER_BASE: u8 = AXIS_BASE + (Axis::COUNT * 2) as u8;

impl LogicalAction {
    /// Returns `true` for an unbound key.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, LogicalAction::None)
    }

    /// Persisted name of this action (e.g. `"LeftStickUp"`).
    ///
    /// # Examples
    ///
    /// ```
    /// use keypad_bridge::mapping::action::{Axis, AxisSign, LogicalAction};
    ///
    /// let action = LogicalAction::AxisDirection(Axis::LeftStickY, AxisSign::Positive);
    /// assert_eq!(action.name(), "LeftStickUp");
    /// ```
    #[must_use]
    pub fn name(self) -> &'static str {
        ACTION_NAMES
            .iter()
            .find(|(_, action)| *action == self)
            .map_or("ButtonNone", |(name, _)| name)
    }

    /// Packs the action into one byte for lock-free table storage.
    pub(crate) const fn to_byte(self) -> u8 {
        match self {
            LogicalAction::None => 0,
            LogicalAction::DiscreteButton(button) => BUTTON_BASE + button.index(),
            LogicalAction::AxisDirection(axis, sign) => {
                AXIS_BASE + (axis.index() * 2 + sign.index()) as u8
            }
            LogicalAction::Trigger(TriggerSide::Left) => TRIGGER_BASE,
            LogicalAction::Trigger(TriggerSide::Right) => TRIGGER_BASE + 1,
        }
    }

    /// Inverse of [`LogicalAction::to_byte`]. Unknown bytes decode to `None`.
    pub(crate) const fn from_byte(byte: u8) -> Self {
        if byte >= BUTTON_BASE && byte < AXIS_BASE {
            match Button::from_index(byte - BUTTON_BASE) {
                Some(button) => LogicalAction::DiscreteButton(button),
                None => LogicalAction::None,
            }
        } else if byte >= AXIS_BASE && byte < TRIGGER_BASE {
            let offset = (byte - AXIS_BASE) as usize;
            let sign = if offset % 2 == 0 {
                AxisSign::Negative
            } else {
                AxisSign::Positive
            };
            LogicalAction::AxisDirection(Axis::ALL[offset / 2], sign)
        } else if byte == TRIGGER_BASE {
            LogicalAction::Trigger(TriggerSide::Left)
        } else if byte == TRIGGER_BASE + 1 {
            LogicalAction::Trigger(TriggerSide::Right)
        } else {
            LogicalAction::None
        }
    }
}

impl fmt::Display for LogicalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a name matches no action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown controller action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for LogicalAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ACTION_NAMES
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, action)| *action)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_masks_are_distinct() {
        let mut seen = 0u16;
        for button in Button::ALL {
            assert_eq!(button.mask().count_ones(), 1, "{:?} should own one bit", button);
            assert_eq!(seen & button.mask(), 0, "{:?} overlaps another button", button);
            seen |= button.mask();
        }
        // Bit 0x0800 is unused by the report layout
        assert_eq!(seen, 0xF7FF);
    }

    #[test]
    fn test_button_packing_order() {
        for (index, button) in Button::ALL.iter().enumerate() {
            assert_eq!(button.index() as usize, index);
            assert_eq!(Button::from_index(index as u8), Some(*button));
        }
        assert_eq!(Button::from_index(Button::COUNT as u8), None);
    }

    #[test]
    fn test_every_named_action_packs_to_unique_byte() {
        let mut seen = [false; 256];
        for (name, action) in ACTION_NAMES {
            let byte = action.to_byte();
            assert!(!seen[byte as usize], "{} collides with another action", name);
            seen[byte as usize] = true;
            assert_eq!(LogicalAction::from_byte(byte), action, "{} did not unpack", name);
        }
    }

    #[test]
    fn test_unknown_byte_unpacks_to_none() {
        assert_eq!(LogicalAction::from_byte(26), LogicalAction::None);
        assert_eq!(LogicalAction::from_byte(0xFF), LogicalAction::None);
    }

    #[test]
    fn test_stick_direction_names() {
        assert_eq!(
            "LeftStickLeft".parse::<LogicalAction>(),
            Ok(LogicalAction::AxisDirection(Axis::LeftStickX, AxisSign::Negative))
        );
        assert_eq!(
            "RightStickDown".parse::<LogicalAction>(),
            Ok(LogicalAction::AxisDirection(Axis::RightStickY, AxisSign::Negative))
        );
        assert_eq!(
            "RightStickUp".parse::<LogicalAction>(),
            Ok(LogicalAction::AxisDirection(Axis::RightStickY, AxisSign::Positive))
        );
    }

    #[test]
    fn test_system_button_names() {
        assert_eq!(
            "ButtonXbox".parse::<LogicalAction>(),
            Ok(LogicalAction::DiscreteButton(Button::Guide))
        );
        assert_eq!(LogicalAction::DiscreteButton(Button::LeftBumper).name(), "BumperLeft");
        assert_eq!(LogicalAction::Trigger(TriggerSide::Right).to_string(), "TriggerRight");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("buttona".parse::<LogicalAction>().is_err());
        assert_eq!(
            "Jump".parse::<LogicalAction>(),
            Err(UnknownAction("Jump".to_string()))
        );
    }

    #[test]
    fn test_none_name() {
        assert_eq!(LogicalAction::None.name(), "ButtonNone");
        assert_eq!("ButtonNone".parse::<LogicalAction>(), Ok(LogicalAction::None));
        assert!(LogicalAction::default().is_none());
    }
}
