//! # Button Aggregator
//!
//! Discrete buttons are kept as one bitmask using the report's bit layout.
//! Buttons never interact with each other.

use crate::mapping::action::Button;

/// Set of currently pressed buttons.
///
/// # Examples
///
/// ```
/// use keypad_bridge::controller::buttons::ButtonMask;
/// use keypad_bridge::mapping::action::Button;
///
/// let mut mask = ButtonMask::default();
/// mask.apply(Button::A, true);
/// assert!(mask.contains(Button::A));
/// assert_eq!(mask.bits(), 0x1000);
///
/// mask.apply(Button::A, false);
/// assert!(mask.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ButtonMask(u16);

impl ButtonMask {
    /// Builds a mask from raw report bits.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw report bits
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Sets the button's bit.
    pub fn press(&mut self, button: Button) {
        self.0 |= button.mask();
    }

    /// Clears the button's bit.
    pub fn release(&mut self, button: Button) {
        self.0 &= !button.mask();
    }

    /// Sets or clears the button's bit.
    pub fn apply(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.press(button);
        } else {
            self.release(button);
        }
    }

    #[must_use]
    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Pressed buttons, in [`Button::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |button| self.contains(*button))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_round_trip() {
        let before = ButtonMask::from_bits(Button::Start.mask() | Button::Y.mask());
        for button in Button::ALL.into_iter().filter(|b| !before.contains(*b)) {
            let mut mask = before;

            mask.apply(button, true);
            assert!(mask.contains(button));
            mask.apply(button, false);
            assert_eq!(mask, before, "{:?} press/release changed other bits", button);
        }
    }

    #[test]
    fn test_press_is_idempotent() {
        let mut mask = ButtonMask::default();
        mask.press(Button::LeftBumper);
        let once = mask;
        mask.press(Button::LeftBumper);
        assert_eq!(mask, once);
    }

    #[test]
    fn test_buttons_are_independent() {
        let mut mask = ButtonMask::default();
        mask.press(Button::A);
        mask.press(Button::B);
        mask.release(Button::A);
        assert!(mask.contains(Button::B));
        assert!(!mask.contains(Button::A));
    }

    #[test]
    fn test_release_unpressed_is_noop() {
        let mut mask = ButtonMask::default();
        mask.release(Button::Guide);
        assert!(mask.is_empty());
    }

    #[test]
    fn test_iter() {
        let mut mask = ButtonMask::default();
        mask.press(Button::RightThumb);
        mask.press(Button::A);
        let pressed: Vec<Button> = mask.iter().collect();
        assert_eq!(pressed, vec![Button::A, Button::RightThumb]);
    }
}
