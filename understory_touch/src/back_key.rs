// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Back key state shared between the event thread and the render loop.

use core::sync::atomic::{AtomicBool, Ordering};

/// Platform key code of the back key.
pub const BACK_KEY_CODE: u32 = 4;

/// Key transition reported by the platform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Key pressed.
    Down,
    /// Key released.
    Up,
}

/// Tracks whether the back key is held.
///
/// [`on_key`](Self::on_key) is called from the event thread; the render loop
/// polls [`is_pressed`](Self::is_pressed). Both only take `&self`.
///
/// ```
/// use understory_touch::back_key::{BackKey, KeyAction, BACK_KEY_CODE};
///
/// let back = BackKey::new(true);
/// assert!(back.on_key(BACK_KEY_CODE, KeyAction::Down));
/// assert!(back.is_pressed());
/// // Other keys are never consumed.
/// assert!(!back.on_key(62, KeyAction::Down));
/// back.on_key(BACK_KEY_CODE, KeyAction::Up);
/// assert!(!back.is_pressed());
/// ```
#[derive(Debug, Default)]
pub struct BackKey {
    pressed: AtomicBool,
    catch_back_key: AtomicBool,
}

impl BackKey {
    /// Create a tracker; `catch_back_key` decides whether back key
    /// notifications are reported as consumed.
    pub const fn new(catch_back_key: bool) -> Self {
        Self {
            pressed: AtomicBool::new(false),
            catch_back_key: AtomicBool::new(catch_back_key),
        }
    }

    /// Handle a key notification.
    ///
    /// Returns whether the notification was consumed, which is only ever the
    /// case for the back key while catching is enabled.
    pub fn on_key(&self, code: u32, action: KeyAction) -> bool {
        if code != BACK_KEY_CODE {
            return false;
        }
        self.pressed
            .store(action == KeyAction::Down, Ordering::Release);
        self.catch_back_key.load(Ordering::Relaxed)
    }

    /// Whether the back key is currently held.
    pub fn is_pressed(&self) -> bool {
        self.pressed.load(Ordering::Acquire)
    }

    /// Change whether back key notifications are consumed.
    pub fn set_catch_back_key(&self, catch_back_key: bool) {
        self.catch_back_key.store(catch_back_key, Ordering::Relaxed);
    }
}
