//! Per-slot controller sessions.
//!
//! Each bus slot owns its own controller state. Axis held flags are not part
//! of a session: they follow the physical keys and are shared by every slot.

use crate::controller::axis::AxisResolver;
use crate::controller::slot::{ControllerSlot, SLOT_COUNT};
use crate::controller::state::ControllerState;
use crate::mapping::action::LogicalAction;

/// State of one virtual controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotSession {
    state: ControllerState,
    plugged: bool,
}

impl SlotSession {
    /// Current controller snapshot
    #[must_use]
    pub const fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Whether the bus accepted a plug-in for this slot
    #[must_use]
    pub const fn is_plugged(&self) -> bool {
        self.plugged
    }

    /// Applies one key transition bound to `action`.
    ///
    /// Axis directions go through `axes`, which holds the physical key state.
    /// Returns `false` for [`LogicalAction::None`], which changes nothing and
    /// must not be reported.
    pub fn apply(&mut self, axes: &mut AxisResolver, action: LogicalAction, pressed: bool) -> bool {
        match action {
            LogicalAction::None => return false,
            LogicalAction::DiscreteButton(button) => self.state.buttons.apply(button, pressed),
            LogicalAction::Trigger(side) => self.state.set_trigger(side, pressed),
            LogicalAction::AxisDirection(axis, sign) => {
                let value = axes.update(axis, sign, pressed);
                self.state.set_axis(axis, value);
            }
        }
        true
    }

    /// Back to neutral and unplugged.
    pub fn reset(&mut self) {
        self.state.reset();
        self.plugged = false;
    }
}

/// Sessions for every bus slot.
#[derive(Debug, Clone, Default)]
pub struct SessionTable {
    slots: [SlotSession; SLOT_COUNT],
}

impl SessionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, slot: ControllerSlot) -> &SlotSession {
        &self.slots[slot.index()]
    }

    pub fn get_mut(&mut self, slot: ControllerSlot) -> &mut SlotSession {
        &mut self.slots[slot.index()]
    }

    pub fn mark_plugged(&mut self, slot: ControllerSlot) {
        self.slots[slot.index()].plugged = true;
    }

    pub fn reset(&mut self, slot: ControllerSlot) {
        self.slots[slot.index()].reset();
    }

    pub fn reset_all(&mut self) {
        for session in &mut self.slots {
            session.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::action::{Axis, AxisSign, Button, TriggerSide};

    fn slot(number: i64) -> ControllerSlot {
        ControllerSlot::new(number).unwrap()
    }

    #[test]
    fn test_apply_none_is_noop() {
        let mut axes = AxisResolver::new();
        let mut session = SlotSession::default();
        assert!(!session.apply(&mut axes, LogicalAction::None, true));
        assert_eq!(session, SlotSession::default());
    }

    #[test]
    fn test_apply_button_trigger_axis() {
        let mut axes = AxisResolver::new();
        let mut session = SlotSession::default();

        assert!(session.apply(&mut axes, LogicalAction::DiscreteButton(Button::X), true));
        assert!(session.apply(&mut axes, LogicalAction::Trigger(TriggerSide::Left), true));
        assert!(session.apply(
            &mut axes,
            LogicalAction::AxisDirection(Axis::RightStickX, AxisSign::Positive),
            true
        ));

        let state = session.state();
        assert!(state.buttons.contains(Button::X));
        assert_eq!(state.left_trigger, 255);
        assert_eq!(state.right_stick_x, i16::MAX);
    }

    #[test]
    fn test_slots_are_isolated() {
        let mut axes = AxisResolver::new();
        let mut sessions = SessionTable::new();
        sessions
            .get_mut(slot(1))
            .apply(&mut axes, LogicalAction::DiscreteButton(Button::A), true);

        assert!(sessions.get(slot(1)).state().any_button_pressed());
        assert!(sessions.get(slot(2)).state().is_neutral());
    }

    #[test]
    fn test_reset_keeps_held_keys() {
        let mut axes = AxisResolver::new();
        let mut sessions = SessionTable::new();
        let left = LogicalAction::AxisDirection(Axis::LeftStickX, AxisSign::Negative);
        let right = LogicalAction::AxisDirection(Axis::LeftStickX, AxisSign::Positive);

        sessions.get_mut(slot(1)).apply(&mut axes, left, true);
        sessions.mark_plugged(slot(1));
        sessions.reset(slot(1));
        assert!(!sessions.get(slot(1)).is_plugged());
        assert!(sessions.get(slot(1)).state().is_neutral());

        // Left is still physically held, so adding right centers the axis
        sessions.get_mut(slot(1)).apply(&mut axes, right, true);
        assert_eq!(sessions.get(slot(1)).state().left_stick_x, 0);
    }

    #[test]
    fn test_reset_all() {
        let mut axes = AxisResolver::new();
        let mut sessions = SessionTable::new();
        for s in ControllerSlot::all() {
            sessions.mark_plugged(s);
            sessions
                .get_mut(s)
                .apply(&mut axes, LogicalAction::Trigger(TriggerSide::Right), true);
        }

        sessions.reset_all();
        for s in ControllerSlot::all() {
            assert_eq!(*sessions.get(s), SlotSession::default());
        }
    }
}
