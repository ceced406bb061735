// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pointer state for the current frame window.

use alloc::vec;
use alloc::vec::Vec;

bitflags::bitflags! {
    /// State of one pointer slot.
    ///
    /// `DOWN` and `UP` only live for one frame. `DRAGGED` survives frame
    /// boundaries and means the pointer is currently held.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerFlags: u8 {
        /// Pressed during this frame.
        const DOWN    = 0b0000_0001;
        /// Released or cancelled during this frame.
        const UP      = 0b0000_0010;
        /// Held, and should report a drag position.
        const DRAGGED = 0b0000_0100;
    }
}

/// Fixed-size table of [`PointerFlags`], indexed by pointer id.
#[derive(Clone, Debug)]
pub(crate) struct PointerSlots {
    flags: Vec<PointerFlags>,
}

impl PointerSlots {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            flags: vec![PointerFlags::empty(); len],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.flags.len()
    }

    pub(crate) fn get(&self, pointer: usize) -> Option<PointerFlags> {
        self.flags.get(pointer).copied()
    }

    /// A press does not override a release already seen this frame.
    pub(crate) fn press(&mut self, pointer: usize) {
        let slot = &mut self.flags[pointer];
        if !slot.contains(PointerFlags::UP) {
            slot.insert(PointerFlags::DOWN);
        }
        slot.insert(PointerFlags::DRAGGED);
    }

    pub(crate) fn release(&mut self, pointer: usize) {
        let slot = &mut self.flags[pointer];
        slot.remove(PointerFlags::DOWN | PointerFlags::DRAGGED);
        slot.insert(PointerFlags::UP);
    }

    /// A pointer pressed this frame keeps its down priority.
    pub(crate) fn drag(&mut self, pointer: usize) {
        let slot = &mut self.flags[pointer];
        if !slot.contains(PointerFlags::DOWN) {
            slot.insert(PointerFlags::DRAGGED);
        }
    }

    pub(crate) fn end_frame(&mut self) {
        for slot in &mut self.flags {
            slot.remove(PointerFlags::DOWN | PointerFlags::UP);
        }
    }
}
