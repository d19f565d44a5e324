//! Key transitions delivered by the keyboard hook.

use crate::mapping::keys::KeyCode;

/// One press or release of one physical key, as delivered by the hook.
///
/// `code` is the raw hook value; codes outside 0-255 are not keyboard keys
/// the engine can map and are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    pub code: i32,
    pub pressed: bool,
}

impl KeyTransition {
    #[must_use]
    pub const fn new(code: i32, pressed: bool) -> Self {
        Self { code, pressed }
    }

    /// A key-down transition
    #[must_use]
    pub const fn press(code: i32) -> Self {
        Self::new(code, true)
    }

    /// A key-up transition
    #[must_use]
    pub const fn release(code: i32) -> Self {
        Self::new(code, false)
    }

    /// The key, if the code is in range.
    #[must_use]
    pub fn key(&self) -> Option<KeyCode> {
        KeyCode::from_raw(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(KeyTransition::press(65), KeyTransition { code: 65, pressed: true });
        assert_eq!(KeyTransition::release(65), KeyTransition { code: 65, pressed: false });
    }

    #[test]
    fn test_key_normalization() {
        assert_eq!(KeyTransition::press(37).key(), Some(KeyCode::new(37)));
        assert_eq!(KeyTransition::press(256).key(), None);
        assert_eq!(KeyTransition::release(-5).key(), None);
    }
}
