//! # Mapping Table
//!
//! Fixed 256-slot table from key code to [`LogicalAction`].
//!
//! Each slot is a single `AtomicU8` holding the packed action, so the hook
//! thread can look up keys while the UI thread rewrites bindings without any
//! lock. A lookup observes either the old or the new binding of a key, never
//! a torn value.

use std::sync::atomic::{AtomicU8, Ordering};

use super::action::LogicalAction;
use super::keys::KeyCode;

/// Key code to action lookup table.
///
/// # Examples
///
/// ```
/// use keypad_bridge::mapping::action::{Button, LogicalAction};
/// use keypad_bridge::mapping::keys::KeyCode;
/// use keypad_bridge::mapping::table::MappingTable;
///
/// let table = MappingTable::new();
/// table.set(KeyCode::new(65), LogicalAction::DiscreteButton(Button::A));
/// assert_eq!(table.lookup(65), LogicalAction::DiscreteButton(Button::A));
/// assert_eq!(table.lookup(1000), LogicalAction::None);
/// ```
#[derive(Debug)]
pub struct MappingTable {
    slots: [AtomicU8; KeyCode::COUNT],
}

impl Default for MappingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MappingTable {
    /// Creates a table with every key unbound.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| AtomicU8::new(LogicalAction::None.to_byte())),
        }
    }

    /// Binds `key` to `action`, replacing any previous binding.
    ///
    /// Returns the binding that was replaced.
    pub fn set(&self, key: KeyCode, action: LogicalAction) -> LogicalAction {
        let previous = self.slots[key.index()].swap(action.to_byte(), Ordering::AcqRel);
        LogicalAction::from_byte(previous)
    }

    /// Unbinds `key`. Returns the binding that was removed.
    pub fn remove(&self, key: KeyCode) -> LogicalAction {
        self.set(key, LogicalAction::None)
    }

    /// Unbinds every key.
    pub fn clear(&self) {
        for slot in &self.slots {
            slot.store(LogicalAction::None.to_byte(), Ordering::Release);
        }
    }

    /// Looks up a raw hook code. Out-of-range and unbound codes yield `None`.
    #[must_use]
    pub fn lookup(&self, code: i32) -> LogicalAction {
        match KeyCode::from_raw(code) {
            Some(key) => self.get(key),
            None => LogicalAction::None,
        }
    }

    /// Looks up an in-range key.
    #[must_use]
    pub fn get(&self, key: KeyCode) -> LogicalAction {
        LogicalAction::from_byte(self.slots[key.index()].load(Ordering::Acquire))
    }

    /// Every bound key with its action, in ascending key-code order.
    #[must_use]
    pub fn entries(&self) -> Vec<(KeyCode, LogicalAction)> {
        (0..=u8::MAX)
            .map(KeyCode::new)
            .filter_map(|key| {
                let action = self.get(key);
                (!action.is_none()).then_some((key, action))
            })
            .collect()
    }

    /// Number of bound keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.load(Ordering::Acquire) != LogicalAction::None.to_byte())
            .count()
    }

    /// Returns `true` if no key is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
