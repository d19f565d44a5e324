//! "Find key by press": record the next key the user presses.
//!
//! The UI arms the capture, the engine feeds it every key press from the hook
//! path, and the UI later takes the captured code. Only atomics are touched,
//! so observing a press never blocks the hook.

use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use crate::mapping::keys::KeyCode;

const NOTHING_CAPTURED: u16 = u16::MAX;

/// One-shot key capture shared between the UI and the engine.
#[derive(Debug)]
pub struct KeyCapture {
    armed: AtomicBool,
    captured: AtomicU16,
}

impl Default for KeyCapture {
    fn default() -> Self {
        Self {
            armed: AtomicBool::new(false),
            captured: AtomicU16::new(NOTHING_CAPTURED),
        }
    }
}

impl KeyCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start waiting for a key press. Discards any earlier capture.
    pub fn arm(&self) {
        self.captured.store(NOTHING_CAPTURED, Ordering::Release);
        self.armed.store(true, Ordering::Release);
    }

    /// Stop waiting without capturing anything.
    pub fn disarm(&self) {
        self.armed.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Record `key` if armed. Disarms after the first key.
    ///
    /// Returns `true` if the key was captured.
    pub fn observe(&self, key: KeyCode) -> bool {
        if self.armed.swap(false, Ordering::AcqRel) {
            self.captured.store(u16::from(key.code()), Ordering::Release);
            true
        } else {
            false
        }
    }

    /// Take the captured key, if any.
    pub fn take(&self) -> Option<KeyCode> {
        let code = self.captured.swap(NOTHING_CAPTURED, Ordering::AcqRel);
        u8::try_from(code).ok().map(KeyCode::new)
    }
}
