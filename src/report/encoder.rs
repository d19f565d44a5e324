//! # Report Encoder
//!
//! Serializes a [`ControllerState`] into the bus input report.

use super::protocol::*;
use crate::controller::state::ControllerState;

/// Encode a controller state into a complete input report
///
/// The report is a fixed-size array, so encoding never allocates.
///
/// # Arguments
///
/// * `state` - Controller snapshot to serialize
///
/// # Returns
///
/// * `InputReport` - 20-byte report (type + size + buttons + triggers + sticks + padding)
///
/// # Examples
///
/// ```
/// use keypad_bridge::controller::state::ControllerState;
/// use keypad_bridge::report::encoder::encode_input_report;
///
/// let report = encode_input_report(&ControllerState::default());
/// assert_eq!(report.len(), 20);
/// assert_eq!(report[1], 0x14);
/// ```
#[must_use]
pub fn encode_input_report(state: &ControllerState) -> InputReport {
    let mut report = [0u8; INPUT_REPORT_SIZE];

    report[0] = INPUT_REPORT_TYPE;
    report[1] = INPUT_REPORT_LENGTH;
    put(&mut report, BUTTONS_OFFSET, state.buttons.bits().to_le_bytes());
    report[LEFT_TRIGGER_OFFSET] = state.left_trigger;
    report[RIGHT_TRIGGER_OFFSET] = state.right_trigger;
    put(&mut report, LEFT_STICK_X_OFFSET, state.left_stick_x.to_le_bytes());
    put(&mut report, LEFT_STICK_Y_OFFSET, state.left_stick_y.to_le_bytes());
    put(&mut report, RIGHT_STICK_X_OFFSET, state.right_stick_x.to_le_bytes());
    put(&mut report, RIGHT_STICK_Y_OFFSET, state.right_stick_y.to_le_bytes());

    report
}

fn put(report: &mut InputReport, offset: usize, bytes: [u8; 2]) {
    report[offset..offset + 2].copy_from_slice(&bytes);
}
