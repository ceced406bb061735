// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw motion notifications as delivered by the platform.
//!
//! The action word uses the Android packing: the low byte is the action code
//! and, for [`ACTION_POINTER_DOWN`] / [`ACTION_POINTER_UP`], bits 8..16 carry
//! the index of the pointer that changed. Coordinates are raw platform pixels
//! with the origin at the top-left of the view.
//!
//! ```
//! use kurbo::Point;
//! use understory_touch::motion::{MotionAction, MotionEvent, RawPointer};
//!
//! let ev = MotionEvent::pointer_down(
//!     1,
//!     [
//!         RawPointer::new(0, Point::new(5.0, 5.0)),
//!         RawPointer::new(1, Point::new(40.0, 8.0)),
//!     ],
//! );
//! assert_eq!(ev.action(), MotionAction::PointerDown(1));
//! assert_eq!(ev.pointer(1).id, 1);
//! ```

use kurbo::Point;
use smallvec::SmallVec;

/// Mask selecting the action code.
pub const ACTION_MASK: u32 = 0xff;
/// Mask selecting the pointer index of a pointer down/up action.
pub const ACTION_POINTER_INDEX_MASK: u32 = 0xff00;
/// Shift applied after [`ACTION_POINTER_INDEX_MASK`].
pub const ACTION_POINTER_INDEX_SHIFT: u32 = 8;

/// The first pointer went down.
pub const ACTION_DOWN: u32 = 0;
/// The last pointer went up.
pub const ACTION_UP: u32 = 1;
/// One or more pointers moved.
pub const ACTION_MOVE: u32 = 2;
/// The gesture was aborted.
pub const ACTION_CANCEL: u32 = 3;
/// An additional pointer went down.
pub const ACTION_POINTER_DOWN: u32 = 5;
/// A non-final pointer went up.
pub const ACTION_POINTER_UP: u32 = 6;

/// One pointer reported by a motion notification.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RawPointer {
    /// Pointer identifier, stable while the pointer is held.
    pub id: usize,
    /// Raw platform position.
    pub position: Point,
}

impl RawPointer {
    /// Create a raw pointer sample.
    pub const fn new(id: usize, position: Point) -> Self {
        Self { id, position }
    }
}

/// Decoded action of a [`MotionEvent`].
///
/// Variants that concern a single pointer carry its index into
/// [`MotionEvent::pointers`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MotionAction {
    /// First pointer down.
    Down(usize),
    /// Additional pointer down.
    PointerDown(usize),
    /// Last pointer up.
    Up(usize),
    /// Non-final pointer up.
    PointerUp(usize),
    /// Gesture aborted.
    Cancel(usize),
    /// Every reported pointer may have moved.
    Move,
}

impl MotionAction {
    /// Decode a packed action word.
    ///
    /// Returns `None` for action codes this crate does not handle.
    pub const fn decode(action: u32) -> Option<Self> {
        let index = ((action & ACTION_POINTER_INDEX_MASK) >> ACTION_POINTER_INDEX_SHIFT) as usize;
        match action & ACTION_MASK {
            ACTION_DOWN => Some(Self::Down(index)),
            ACTION_UP => Some(Self::Up(index)),
            ACTION_MOVE => Some(Self::Move),
            ACTION_CANCEL => Some(Self::Cancel(index)),
            ACTION_POINTER_DOWN => Some(Self::PointerDown(index)),
            ACTION_POINTER_UP => Some(Self::PointerUp(index)),
            _ => None,
        }
    }

    /// Encode back into a packed action word.
    pub const fn encode(self) -> u32 {
        let (code, index) = match self {
            Self::Down(i) => (ACTION_DOWN, i),
            Self::Up(i) => (ACTION_UP, i),
            Self::Move => (ACTION_MOVE, 0),
            Self::Cancel(i) => (ACTION_CANCEL, i),
            Self::PointerDown(i) => (ACTION_POINTER_DOWN, i),
            Self::PointerUp(i) => (ACTION_POINTER_UP, i),
        };
        #[expect(
            clippy::cast_possible_truncation,
            reason = "pointer indices are packed into a single byte"
        )]
        let index = index as u32;
        code | ((index << ACTION_POINTER_INDEX_SHIFT) & ACTION_POINTER_INDEX_MASK)
    }
}

/// A raw multi-pointer notification.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    action: u32,
    pointers: SmallVec<[RawPointer; 4]>,
}

impl MotionEvent {
    /// Wrap a packed action word and the pointers it reports.
    pub fn new(action: u32, pointers: impl IntoIterator<Item = RawPointer>) -> Self {
        Self {
            action,
            pointers: pointers.into_iter().collect(),
        }
    }

    /// The first pointer went down.
    pub fn down(id: usize, position: Point) -> Self {
        Self::new(ACTION_DOWN, [RawPointer::new(id, position)])
    }

    /// The pointer at `index` went down while others are held.
    pub fn pointer_down(index: usize, pointers: impl IntoIterator<Item = RawPointer>) -> Self {
        Self::new(MotionAction::PointerDown(index).encode(), pointers)
    }

    /// The last pointer went up.
    pub fn up(id: usize, position: Point) -> Self {
        Self::new(ACTION_UP, [RawPointer::new(id, position)])
    }

    /// The pointer at `index` went up while others stay held.
    pub fn pointer_up(index: usize, pointers: impl IntoIterator<Item = RawPointer>) -> Self {
        Self::new(MotionAction::PointerUp(index).encode(), pointers)
    }

    /// The gesture was aborted; `id` is the reported pointer.
    pub fn cancel(id: usize, position: Point) -> Self {
        Self::new(ACTION_CANCEL, [RawPointer::new(id, position)])
    }

    /// Every pointer in `pointers` has a new position.
    pub fn moved(pointers: impl IntoIterator<Item = RawPointer>) -> Self {
        Self::new(ACTION_MOVE, pointers)
    }

    /// Decode the action.
    ///
    /// # Panics
    ///
    /// Panics on action codes other than down, up, move, cancel, pointer down
    /// and pointer up. A touch listener is only registered for those, so any
    /// other code means the platform broke its contract.
    pub fn action(&self) -> MotionAction {
        match MotionAction::decode(self.action) {
            Some(action) => action,
            None => panic!(
                "unhandled motion action code {:#x} (action word {:#x})",
                self.action & ACTION_MASK,
                self.action
            ),
        }
    }

    /// All pointers reported by this notification.
    pub fn pointers(&self) -> &[RawPointer] {
        &self.pointers
    }

    /// The pointer at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid pointer index for this notification.
    pub fn pointer(&self, index: usize) -> RawPointer {
        match self.pointers.get(index) {
            Some(p) => *p,
            None => panic!(
                "pointer index {index} out of bounds for motion event with {} pointers",
                self.pointers.len()
            ),
        }
    }
}
