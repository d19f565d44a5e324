//! UI-facing handle to the shared mapping table.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::action::LogicalAction;
use super::keys::KeyCode;
use super::settings;
use super::table::MappingTable;
use crate::error::Result;

/// Cloneable handle used by the configuration side to edit bindings while the
/// engine keeps reading them.
///
/// Remapping a key that is currently held does not undo what the old binding
/// already did; the next transition of that key follows the new binding.
#[derive(Debug, Clone, Default)]
pub struct MappingHandle {
    table: Arc<MappingTable>,
}

impl MappingHandle {
    /// Creates a handle to a new, empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared table, for the engine's lookups.
    #[must_use]
    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Binds `key` to `action`, replacing any existing binding.
    ///
    /// Binding to [`LogicalAction::None`] is the same as [`Self::remove_mapping`].
    pub fn set_mapping(&self, key: KeyCode, action: LogicalAction) {
        let previous = self.table.set(key, action);
        if action.is_none() {
            info!("Removed mapping of {}", key);
        } else if previous.is_none() {
            info!("Mapped {} to {}", key, action);
        } else {
            info!("Changed mapping of {} to {}", key, action);
        }
    }

    /// Unbinds `key`. Returns `true` if it was bound.
    pub fn remove_mapping(&self, key: KeyCode) -> bool {
        let removed = !self.table.remove(key).is_none();
        if removed {
            info!("Removed mapping of {}", key);
        }
        removed
    }

    /// Unbinds every key.
    pub fn reset_all(&self) {
        self.table.clear();
        info!("Reset mappings");
    }

    /// Every binding, in ascending key-code order.
    #[must_use]
    pub fn current_mappings(&self) -> Vec<(KeyCode, LogicalAction)> {
        self.table.entries()
    }

    /// Replaces all bindings with the valid entries of a settings file.
    ///
    /// Returns the number of bindings loaded. The table is left untouched if
    /// the file cannot be read.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn load_from<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let entries = settings::read_mappings(&path)?;

        self.table.clear();
        for (key, action) in &entries {
            self.table.set(*key, *action);
        }

        let loaded = self.table.len();
        info!("Loaded {} mappings from {}", loaded, path.as_ref().display());
        Ok(loaded)
    }

    /// Writes all bindings to a settings file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let entries = self.current_mappings();
        settings::write_mappings(&path, &entries)?;
        info!("Saved {} mappings to {}", entries.len(), path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::action::{Axis, AxisSign, Button, TriggerSide};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_clones_share_table() {
        let ui = MappingHandle::new();
        let engine_side = ui.clone();

        ui.set_mapping(KeyCode::new(65), LogicalAction::DiscreteButton(Button::A));
        assert_eq!(engine_side.table().lookup(65), LogicalAction::DiscreteButton(Button::A));
    }

    #[test]
    fn test_set_none_removes() {
        let handle = MappingHandle::new();
        handle.set_mapping(KeyCode::new(65), LogicalAction::DiscreteButton(Button::A));
        handle.set_mapping(KeyCode::new(65), LogicalAction::None);
        assert!(handle.current_mappings().is_empty());
    }

    #[test]
    fn test_remove_mapping_reports_whether_bound() {
        let handle = MappingHandle::new();
        handle.set_mapping(KeyCode::new(32), LogicalAction::Trigger(TriggerSide::Left));

        assert!(handle.remove_mapping(KeyCode::new(32)));
        assert!(!handle.remove_mapping(KeyCode::new(32)));
    }

    #[test]
    fn test_reset_all() {
        let handle = MappingHandle::new();
        handle.set_mapping(KeyCode::new(1), LogicalAction::DiscreteButton(Button::X));
        handle.set_mapping(KeyCode::new(2), LogicalAction::DiscreteButton(Button::Y));
        handle.reset_all();
        assert!(handle.current_mappings().is_empty());
    }

    #[test]
    fn test_current_mappings_order() {
        let handle = MappingHandle::new();
        handle.set_mapping(KeyCode::new(39), LogicalAction::AxisDirection(Axis::LeftStickX, AxisSign::Positive));
        handle.set_mapping(KeyCode::new(37), LogicalAction::AxisDirection(Axis::LeftStickX, AxisSign::Negative));

        let mappings = handle.current_mappings();
        assert_eq!(mappings[0].0.code(), 37);
        assert_eq!(mappings[1].0.code(), 39);
    }

    #[test]
    fn test_load_replaces_existing_mappings() {
        let handle = MappingHandle::new();
        handle.set_mapping(KeyCode::new(90), LogicalAction::DiscreteButton(Button::Guide));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Map: A, ButtonA").unwrap();
        writeln!(file, "Map: B, Unknown").unwrap();
        writeln!(file, "Map: Left, LeftStickLeft").unwrap();
        file.flush().unwrap();

        let loaded = handle.load_from(file.path()).unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(handle.table().lookup(90), LogicalAction::None);
        assert_eq!(handle.table().lookup(65), LogicalAction::DiscreteButton(Button::A));
    }

    #[test]
    fn test_load_duplicate_keys_last_wins() {
        let handle = MappingHandle::new();

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Map: A, ButtonA").unwrap();
        writeln!(file, "Map: A, ButtonB").unwrap();
        file.flush().unwrap();

        assert_eq!(handle.load_from(file.path()).unwrap(), 1);
        assert_eq!(handle.table().lookup(65), LogicalAction::DiscreteButton(Button::B));
    }

    #[test]
    fn test_load_missing_file_keeps_table() {
        let handle = MappingHandle::new();
        handle.set_mapping(KeyCode::new(65), LogicalAction::DiscreteButton(Button::A));

        let dir = tempfile::tempdir().unwrap();
        assert!(handle.load_from(dir.path().join("missing.txt")).is_err());
        assert_eq!(handle.current_mappings().len(), 1);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.txt");

        let handle = MappingHandle::new();
        handle.set_mapping(KeyCode::new(65), LogicalAction::DiscreteButton(Button::A));
        handle.set_mapping(KeyCode::new(0x20), LogicalAction::Trigger(TriggerSide::Right));
        handle.save_to(&path).unwrap();

        let restored = MappingHandle::new();
        assert_eq!(restored.load_from(&path).unwrap(), 2);
        assert_eq!(restored.current_mappings(), handle.current_mappings());
    }
}
