//! # Remap Engine
//!
//! Turns key transitions from the keyboard hook into virtual controller
//! reports.
//!
//! Per transition the engine:
//! 1. Drops key codes outside 0-255
//! 2. Feeds key presses to the [`KeyCapture`]
//! 3. Looks the key up in the mapping table
//! 4. Updates the active slot's state (button bit, trigger or resolved axis)
//! 5. Emits the complete state of that slot through the [`ReportSink`]
//!
//! Every step is O(1) with no allocation and no lock, since it runs inside
//! the hook callback. Transitions are handled strictly in delivery order.

pub mod capture;
pub mod event;
pub mod session;

use std::sync::Arc;

use tracing::{info, trace, warn};

use crate::controller::axis::AxisResolver;
use crate::controller::slot::ControllerSlot;
use crate::controller::state::ControllerState;
use crate::error::DriverError;
use crate::mapping::handle::MappingHandle;
use crate::report::sink::{ReportSink, VirtualBus};

pub use capture::KeyCapture;
pub use event::KeyTransition;
pub use session::{SessionTable, SlotSession};

/// Outcome of one key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Out-of-range code or unmapped key; nothing changed, nothing sent
    Ignored,
    /// State changed and the full report was accepted by the bus
    Reported,
}

/// Keyboard to virtual gamepad remapping engine.
///
/// The engine is owned by the thread that receives hook callbacks. The UI
/// side shares only the [`MappingHandle`] and the [`KeyCapture`], both of
/// which are safe to mutate while the engine reads them.
///
/// # Examples
///
/// ```
/// use keypad_bridge::controller::slot::ControllerSlot;
/// use keypad_bridge::engine::{KeyTransition, RemapEngine};
/// use keypad_bridge::mapping::{Button, KeyCode, LogicalAction, MappingHandle};
/// use keypad_bridge::report::LoggingBus;
///
/// let mappings = MappingHandle::new();
/// mappings.set_mapping(KeyCode::new(65), LogicalAction::DiscreteButton(Button::A));
///
/// let mut engine = RemapEngine::new(mappings, LoggingBus::new());
/// engine.plug_in(ControllerSlot::FIRST)?;
/// engine.handle_key(KeyTransition::press(65))?;
/// assert!(engine.current_state().buttons.contains(Button::A));
/// # Ok::<(), keypad_bridge::error::DriverError>(())
/// ```
#[derive(Debug)]
pub struct RemapEngine<B> {
    mappings: MappingHandle,
    sink: ReportSink<B>,
    sessions: SessionTable,
    axes: AxisResolver,
    active: ControllerSlot,
    capture: Arc<KeyCapture>,
}

impl<B: VirtualBus> RemapEngine<B> {
    /// Creates an engine reporting to slot 1 of `bus`.
    ///
    /// # Arguments
    ///
    /// * `mappings` - Mapping table handle shared with the UI
    /// * `bus` - Virtual bus driver
    pub fn new(mappings: MappingHandle, bus: B) -> Self {
        Self {
            mappings,
            sink: ReportSink::new(bus),
            sessions: SessionTable::new(),
            axes: AxisResolver::new(),
            active: ControllerSlot::FIRST,
            capture: Arc::new(KeyCapture::new()),
        }
    }

    pub fn mappings(&self) -> &MappingHandle {
        &self.mappings
    }

    /// Key capture shared with the UI
    pub fn key_capture(&self) -> Arc<KeyCapture> {
        Arc::clone(&self.capture)
    }

    pub fn sink(&self) -> &ReportSink<B> {
        &self.sink
    }

    pub fn active_slot(&self) -> ControllerSlot {
        self.active
    }

    /// Route subsequent key transitions to `slot`.
    pub fn select_slot(&mut self, slot: ControllerSlot) {
        if slot != self.active {
            info!("Active controller is now {}", slot);
            self.active = slot;
        }
    }

    /// State of the active slot
    pub fn current_state(&self) -> &ControllerState {
        self.state(self.active)
    }

    pub fn state(&self, slot: ControllerSlot) -> &ControllerState {
        self.sessions.get(slot).state()
    }

    /// Whether `slot` has been plugged in through this engine
    pub fn is_plugged(&self, slot: ControllerSlot) -> bool {
        self.sessions.get(slot).is_plugged()
    }

    /// Handles one key transition from the hook.
    ///
    /// The active slot's state is updated before the report is sent, so a
    /// rejected report still leaves the state correct; the next transition
    /// re-sends it in full.
    ///
    /// # Arguments
    ///
    /// * `transition` - Raw key code and press/release flag
    ///
    /// # Returns
    ///
    /// * `Ok(Dispatch::Ignored)` - Code out of range or key not mapped
    /// * `Ok(Dispatch::Reported)` - State updated and report delivered
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Report`] if the bus rejects the report.
    pub fn handle_key(&mut self, transition: KeyTransition) -> Result<Dispatch, DriverError> {
        let Some(key) = transition.key() else {
            trace!("Dropping out-of-range key code {}", transition.code);
            return Ok(Dispatch::Ignored);
        };

        if transition.pressed && self.capture.observe(key) {
            info!("Captured key {}", key);
        }

        let action = self.mappings.table().get(key);
        let slot = self.active;
        let session = self.sessions.get_mut(slot);
        if !session.apply(&mut self.axes, action, transition.pressed) {
            return Ok(Dispatch::Ignored);
        }
        let state = *session.state();

        trace!(
            "{} {} -> {} on controller {}",
            key,
            if transition.pressed { "down" } else { "up" },
            action,
            slot
        );

        match self.sink.emit(slot, &state) {
            Ok(()) => Ok(Dispatch::Reported),
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }

    /// Plug in the controller in `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::PlugIn`] if the bus refuses.
    pub fn plug_in(&mut self, slot: ControllerSlot) -> Result<(), DriverError> {
        match self.sink.plug_in(slot) {
            Ok(()) => {
                self.sessions.mark_plugged(slot);
                info!("Successfully plugged in controller {}", slot);
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }

    /// Unplug the controller in `slot` and reset its state to neutral.
    ///
    /// State is kept if the bus refuses. Held keys are not forgotten: a key
    /// held across the unplug still counts for axis resolution.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Unplug`] if the bus refuses.
    pub fn unplug(&mut self, slot: ControllerSlot) -> Result<(), DriverError> {
        match self.sink.unplug(slot) {
            Ok(()) => {
                self.sessions.reset(slot);
                info!("Successfully unplugged controller {}", slot);
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }

    /// Unplug every controller and reset every slot to neutral.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::UnplugAll`] if the bus refuses.
    pub fn unplug_all(&mut self) -> Result<(), DriverError> {
        match self.sink.unplug_all() {
            Ok(()) => {
                self.sessions.reset_all();
                info!("Successfully unplugged all controllers");
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }
}
