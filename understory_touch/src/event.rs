// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coalesced touch event handed to consumers.

use kurbo::Point;

/// What happened to a pointer during a frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TouchKind {
    /// A pooled event that has not been filled in yet.
    #[default]
    NotTracked,
    /// The pointer went down this frame.
    Down,
    /// The pointer was released or cancelled this frame.
    Up,
    /// The pointer is held down.
    Dragged,
}

/// One touch occurrence in consumer coordinates.
///
/// Events are recycled through a pool and overwritten in place with
/// [`TouchEvent::set`]. Clone an event if you need to keep it past the next
/// frame update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchEvent {
    pointer: usize,
    position: Point,
    kind: TouchKind,
}

impl TouchEvent {
    /// Create an event.
    pub const fn new(pointer: usize, position: Point, kind: TouchKind) -> Self {
        Self {
            pointer,
            position,
            kind,
        }
    }

    /// Overwrite every field.
    pub fn set(&mut self, pointer: usize, position: Point, kind: TouchKind) {
        self.pointer = pointer;
        self.position = position;
        self.kind = kind;
    }

    /// Pointer identifier.
    pub const fn pointer(&self) -> usize {
        self.pointer
    }

    /// Position in consumer coordinates.
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Horizontal position in consumer coordinates.
    pub const fn x(&self) -> f64 {
        self.position.x
    }

    /// Vertical position in consumer coordinates.
    pub const fn y(&self) -> f64 {
        self.position.y
    }

    /// Kind of occurrence.
    pub const fn kind(&self) -> TouchKind {
        self.kind
    }

    pub(crate) fn is(&self, pointer: usize, kind: TouchKind) -> bool {
        self.pointer == pointer && self.kind == kind
    }
}
