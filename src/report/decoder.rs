//! # Report Decoder
//!
//! Parses a bus input report back into a [`ControllerState`], used when
//! mirroring reports to the log.

use super::protocol::*;
use crate::controller::buttons::ButtonMask;
use crate::controller::state::ControllerState;
use crate::error::{RemapError, Result};

/// Decode an input report
///
/// # Arguments
///
/// * `report` - Raw report bytes (at least 20)
///
/// # Returns
///
/// * `Result<ControllerState>` - Decoded state
///
/// # Errors
///
/// Returns error if the report is too short or its type/size header is wrong
pub fn decode_input_report(report: &[u8]) -> Result<ControllerState> {
    if report.len() < INPUT_REPORT_SIZE {
        return Err(RemapError::Protocol(format!(
            "Input report too short: {} bytes",
            report.len()
        )));
    }

    if report[0] != INPUT_REPORT_TYPE || report[1] != INPUT_REPORT_LENGTH {
        return Err(RemapError::Protocol(format!(
            "Unexpected report header: {:#04x} {:#04x}",
            report[0], report[1]
        )));
    }

    let word = |offset: usize| [report[offset], report[offset + 1]];

    Ok(ControllerState {
        buttons: ButtonMask::from_bits(u16::from_le_bytes(word(BUTTONS_OFFSET))),
        left_trigger: report[LEFT_TRIGGER_OFFSET],
        right_trigger: report[RIGHT_TRIGGER_OFFSET],
        left_stick_x: i16::from_le_bytes(word(LEFT_STICK_X_OFFSET)),
        left_stick_y: i16::from_le_bytes(word(LEFT_STICK_Y_OFFSET)),
        right_stick_x: i16::from_le_bytes(word(RIGHT_STICK_X_OFFSET)),
        right_stick_y: i16::from_le_bytes(word(RIGHT_STICK_Y_OFFSET)),
    })
}
