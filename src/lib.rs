//! # Keypad Bridge Library
//!
//! Drive a virtual Xbox 360 controller from the keyboard.
//!
//! This library provides the remapping engine that turns keyboard key
//! transitions into virtual gamepad reports for a virtual HID bus driver.

pub mod config;
pub mod console;
pub mod controller;
pub mod engine;
pub mod error;
pub mod mapping;
pub mod report;
