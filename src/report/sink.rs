//! Virtual bus abstraction and the report sink that feeds it.

use tracing::{debug, info, warn};

use super::decoder::decode_input_report;
use super::encoder::encode_input_report;
use super::protocol::{OutputReport, OUTPUT_REPORT_SIZE};
use crate::controller::slot::{ControllerSlot, SLOT_COUNT};
use crate::controller::state::ControllerState;
use crate::error::DriverError;

/// Synchronous calls into the virtual bus driver.
///
/// Every call returns `false` when the driver rejects it or is not running.
#[cfg_attr(test, mockall::automock)]
pub trait VirtualBus: Send {
    /// Plug in the controller in `slot`
    fn plug_in(&mut self, slot: u8) -> bool;

    /// Unplug the controller in `slot`
    fn unplug(&mut self, slot: u8) -> bool;

    /// Unplug every controller
    fn unplug_all(&mut self) -> bool;

    /// Submit an input report; the bus may write its output report into `output`
    fn report(&mut self, slot: u8, input: &[u8], output: &mut [u8]) -> bool;
}

/// Serializes controller state and pushes it to the bus.
///
/// The sink never holds controller state of its own. Callers keep their
/// state as the source of truth and treat a failed emission as best-effort.
#[derive(Debug)]
pub struct ReportSink<B> {
    bus: B,
    output: OutputReport,
}

impl<B: VirtualBus> ReportSink<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            output: [0u8; OUTPUT_REPORT_SIZE],
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Plug in a controller.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::PlugIn`] if the bus refuses.
    pub fn plug_in(&mut self, slot: ControllerSlot) -> Result<(), DriverError> {
        if self.bus.plug_in(slot.number()) {
            Ok(())
        } else {
            Err(DriverError::PlugIn { slot: slot.number() })
        }
    }

    /// Unplug a controller.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Unplug`] if the bus refuses.
    pub fn unplug(&mut self, slot: ControllerSlot) -> Result<(), DriverError> {
        if self.bus.unplug(slot.number()) {
            Ok(())
        } else {
            Err(DriverError::Unplug { slot: slot.number() })
        }
    }

    /// Unplug every controller.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::UnplugAll`] if the bus refuses.
    pub fn unplug_all(&mut self) -> Result<(), DriverError> {
        if self.bus.unplug_all() {
            Ok(())
        } else {
            Err(DriverError::UnplugAll)
        }
    }

    /// Send the full state of `slot` to the bus.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Report`] if the bus rejects the report.
    pub fn emit(&mut self, slot: ControllerSlot, state: &ControllerState) -> Result<(), DriverError> {
        let report = encode_input_report(state);
        if self.bus.report(slot.number(), &report, &mut self.output) {
            Ok(())
        } else {
            Err(DriverError::Report { slot: slot.number() })
        }
    }
}

/// Bus that mirrors every call to the log instead of a driver.
///
/// It keeps track of plugged slots so that it fails the same calls a real
/// bus would: plugging a slot twice, unplugging an empty slot, or reporting
/// to a slot that is not plugged in.
#[derive(Debug, Default)]
pub struct LoggingBus {
    plugged: [bool; SLOT_COUNT],
}

impl LoggingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a slot is currently plugged in
    pub fn is_plugged(&self, slot: u8) -> bool {
        Self::index(slot).map_or(false, |index| self.plugged[index])
    }

    fn index(slot: u8) -> Option<usize> {
        ControllerSlot::new(i64::from(slot)).ok().map(ControllerSlot::index)
    }
}

impl VirtualBus for LoggingBus {
    fn plug_in(&mut self, slot: u8) -> bool {
        match Self::index(slot) {
            Some(index) if !self.plugged[index] => {
                self.plugged[index] = true;
                info!("Bus: controller {} plugged in", slot);
                true
            }
            _ => false,
        }
    }

    fn unplug(&mut self, slot: u8) -> bool {
        match Self::index(slot) {
            Some(index) if self.plugged[index] => {
                self.plugged[index] = false;
                info!("Bus: controller {} unplugged", slot);
                true
            }
            _ => false,
        }
    }

    fn unplug_all(&mut self) -> bool {
        let any = self.plugged.iter().any(|&plugged| plugged);
        self.plugged = [false; SLOT_COUNT];
        if any {
            info!("Bus: all controllers unplugged");
        }
        any
    }

    fn report(&mut self, slot: u8, input: &[u8], output: &mut [u8]) -> bool {
        if !self.is_plugged(slot) {
            return false;
        }

        match decode_input_report(input) {
            Ok(state) => {
                debug!(
                    "Bus: controller {} buttons={:#06x} lt={} rt={} ls=({}, {}) rs=({}, {})",
                    slot,
                    state.buttons.bits(),
                    state.left_trigger,
                    state.right_trigger,
                    state.left_stick_x,
                    state.left_stick_y,
                    state.right_stick_x,
                    state.right_stick_y,
                );
                output.fill(0);
                true
            }
            Err(e) => {
                warn!("Bus: rejected report for controller {}: {}", slot, e);
                false
            }
        }
    }
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use crate::report::protocol::{InputReport, INPUT_REPORT_SIZE};
    use std::sync::{Arc, Mutex};

    /// Recording bus for engine tests
    #[derive(Clone, Default)]
    pub struct RecordingBus {
        pub reports: Arc<Mutex<Vec<(u8, InputReport)>>>,
        pub calls: Arc<Mutex<Vec<String>>>,
        pub fail_reports: Arc<Mutex<bool>>,
        pub fail_plug_calls: Arc<Mutex<bool>>,
    }

    impl RecordingBus {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn get_reports(&self) -> Vec<(u8, InputReport)> {
            self.reports.lock().unwrap().clone()
        }

        pub fn get_calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn report_count(&self) -> usize {
            self.reports.lock().unwrap().len()
        }

        pub fn set_fail_reports(&self, fail: bool) {
            *self.fail_reports.lock().unwrap() = fail;
        }

        pub fn set_fail_plug_calls(&self, fail: bool) {
            *self.fail_plug_calls.lock().unwrap() = fail;
        }

        fn plug_call(&self, call: String) -> bool {
            self.calls.lock().unwrap().push(call);
            !*self.fail_plug_calls.lock().unwrap()
        }
    }

    impl VirtualBus for RecordingBus {
        fn plug_in(&mut self, slot: u8) -> bool {
            self.plug_call(format!("plug_in {}", slot))
        }

        fn unplug(&mut self, slot: u8) -> bool {
            self.plug_call(format!("unplug {}", slot))
        }

        fn unplug_all(&mut self) -> bool {
            self.plug_call("unplug_all".to_string())
        }

        fn report(&mut self, slot: u8, input: &[u8], _output: &mut [u8]) -> bool {
            if *self.fail_reports.lock().unwrap() {
                return false;
            }
            let mut report = [0u8; INPUT_REPORT_SIZE];
            report.copy_from_slice(&input[..INPUT_REPORT_SIZE]);
            self.reports.lock().unwrap().push((slot, report));
            true
        }
    }
}
