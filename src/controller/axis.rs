//! # Axis Resolver
//!
//! Turns two opposing digital direction keys into one stick coordinate.
//!
//! | Negative held | Positive held | Value |
//! |---------------|---------------|-------|
//! | no | no | `0` |
//! | yes | no | `-32768` |
//! | no | yes | `+32767` |
//! | yes | yes | `0` |
//!
//! The value is recomputed from both flags on every change, so releasing one
//! of two opposing keys snaps straight to the other extreme.

use crate::mapping::action::{Axis, AxisSign};

/// Stick value when only the positive direction is held
pub const AXIS_POSITIVE: i16 = i16::MAX;
/// Stick value when only the negative direction is held
pub const AXIS_NEGATIVE: i16 = i16::MIN;
/// Stick value when neither or both directions are held
pub const AXIS_CENTER: i16 = 0;

/// Resolves one axis from its two held flags.
///
/// # Examples
///
/// ```
/// use keypad_bridge::controller::axis::resolve_axis;
///
/// assert_eq!(resolve_axis(true, false), -32768);
/// assert_eq!(resolve_axis(false, true), 32767);
/// assert_eq!(resolve_axis(true, true), 0);
/// ```
#[must_use]
pub const fn resolve_axis(negative_held: bool, positive_held: bool) -> i16 {
    match (negative_held, positive_held) {
        (true, false) => AXIS_NEGATIVE,
        (false, true) => AXIS_POSITIVE,
        _ => AXIS_CENTER,
    }
}

/// Held state of every axis direction (4 axes x 2 signs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisHeldFlags {
    held: [[bool; 2]; Axis::COUNT],
}

impl AxisHeldFlags {
    /// Whether the key bound to this direction is held
    #[must_use]
    pub const fn is_held(&self, axis: Axis, sign: AxisSign) -> bool {
        self.held[axis.index()][sign.index()]
    }

    fn set(&mut self, axis: Axis, sign: AxisSign, held: bool) {
        self.held[axis.index()][sign.index()] = held;
    }
}

/// Per-axis conflict resolution state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisResolver {
    flags: AxisHeldFlags,
}

impl AxisResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press or release of a direction and returns the new value of
    /// that axis.
    pub fn update(&mut self, axis: Axis, sign: AxisSign, pressed: bool) -> i16 {
        self.flags.set(axis, sign, pressed);
        self.resolve(axis)
    }

    /// Current value of an axis.
    #[must_use]
    pub const fn resolve(&self, axis: Axis) -> i16 {
        resolve_axis(
            self.flags.is_held(axis, AxisSign::Negative),
            self.flags.is_held(axis, AxisSign::Positive),
        )
    }
}
