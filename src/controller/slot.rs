//! Virtual controller slot numbers.

use std::fmt;

use crate::error::DriverError;

/// First slot number the bus exposes
pub const MIN_SLOT: u8 = 1;
/// Last slot number the bus exposes
pub const MAX_SLOT: u8 = 4;
/// Number of slots
pub const SLOT_COUNT: usize = MAX_SLOT as usize;

/// A 1-based virtual controller slot, validated to `1..=4`.
///
/// # Examples
///
/// ```
/// use keypad_bridge::controller::slot::ControllerSlot;
///
/// let slot = ControllerSlot::new(2)?;
/// assert_eq!(slot.number(), 2);
/// assert!(ControllerSlot::new(0).is_err());
/// # Ok::<(), keypad_bridge::error::DriverError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControllerSlot(u8);

impl ControllerSlot {
    /// Slot 1, the one plugged in by default
    pub const FIRST: ControllerSlot = ControllerSlot(MIN_SLOT);

    /// Validates a slot number.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InvalidSlot`] outside `1..=4`.
    pub fn new(number: i64) -> Result<Self, DriverError> {
        match u8::try_from(number) {
            Ok(n) if (MIN_SLOT..=MAX_SLOT).contains(&n) => Ok(Self(n)),
            _ => Err(DriverError::InvalidSlot(number)),
        }
    }

    /// The 1-based slot number passed to the bus
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// 0-based index into per-slot tables
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - MIN_SLOT) as usize
    }

    /// Every slot, in order.
    pub fn all() -> impl Iterator<Item = ControllerSlot> {
        (MIN_SLOT..=MAX_SLOT).map(ControllerSlot)
    }
}

impl Default for ControllerSlot {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for ControllerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
