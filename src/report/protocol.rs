//! # Bus Report Constants and Types
//!
//! Wire layout of the Xbox 360 input report accepted by the virtual bus.
//!
//! ```text
//! Byte  0     : message type (0x00 = input report)
//! Byte  1     : message size (0x14 = 20 bytes)
//! Bytes 2-3   : buttons, little-endian
//! Byte  4     : left trigger
//! Byte  5     : right trigger
//! Bytes 6-7   : left stick X, little-endian i16
//! Bytes 8-9   : left stick Y, little-endian i16
//! Bytes 10-11 : right stick X, little-endian i16
//! Bytes 12-13 : right stick Y, little-endian i16
//! Bytes 14-19 : reserved (zero)
//! ```

/// Input report message type
pub const INPUT_REPORT_TYPE: u8 = 0x00;

/// Input report size in bytes
pub const INPUT_REPORT_SIZE: usize = 20;

/// Value of the size byte
pub const INPUT_REPORT_LENGTH: u8 = INPUT_REPORT_SIZE as u8;

/// Size of the buffer the bus writes its output report (rumble, LED) into
pub const OUTPUT_REPORT_SIZE: usize = 8;

pub const BUTTONS_OFFSET: usize = 2;
pub const LEFT_TRIGGER_OFFSET: usize = 4;
pub const RIGHT_TRIGGER_OFFSET: usize = 5;
pub const LEFT_STICK_X_OFFSET: usize = 6;
pub const LEFT_STICK_Y_OFFSET: usize = 8;
pub const RIGHT_STICK_X_OFFSET: usize = 10;
pub const RIGHT_STICK_Y_OFFSET: usize = 12;

/// Encoded input report
pub type InputReport = [u8; INPUT_REPORT_SIZE];

/// Output report buffer
pub type OutputReport = [u8; OUTPUT_REPORT_SIZE];
