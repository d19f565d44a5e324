//! # Report Module
//!
//! Delivery of controller state to the virtual bus driver.
//!
//! This module handles:
//! - The Xbox 360 input report wire layout
//! - Encoding controller state into reports (fixed size, no allocation)
//! - Decoding reports for logging
//! - The bus trait and the sink adapter that surfaces driver failures

pub mod decoder;
pub mod encoder;
pub mod protocol;
pub mod sink;

pub use sink::{LoggingBus, ReportSink, VirtualBus};
