// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch capture and per-frame coalescing.
//!
//! [`TouchFrame`] holds both halves of the pipeline:
//!
//! - **Capture** ([`TouchFrame::on_motion`]): every raw notification becomes
//!   one pooled [`TouchEvent`] per affected pointer, appended to a buffer, and
//!   the pointer's [`PointerFlags`] are updated.
//! - **Coalescing** ([`TouchFrame::update`]): once per frame, each tracked
//!   pointer contributes at most one event, picked from the buffer (or carried
//!   over from the previous frame) by a fixed precedence. Everything not picked
//!   goes back to the pool.
//!
//! ## Precedence
//!
//! For each pointer `p`:
//!
//! 1. `DOWN` set: the first buffered `Down` for `p`.
//! 2. Else `UP` set: the first buffered `Up` for `p`.
//! 3. Else `DRAGGED` set, the first of:
//!    1. the last buffered `Dragged` for `p`,
//!    2. the previous frame's `Dragged` for `p`, reused as is,
//!    3. the previous frame's `Down` for `p`, re-issued as `Dragged`,
//!    4. the previous frame's `Up` for `p`, re-issued as `Dragged`.
//! 4. Otherwise nothing.
//!
//! Rule 3.4 covers a release followed by a press within one frame: the release
//! wins that frame, and the held pointer then resumes from the release position.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Size};
//! use understory_touch::{MotionEvent, RawPointer, TouchConfig, TouchFrame, TouchKind};
//!
//! let extent = Size::new(100.0, 100.0);
//! let mut frame = TouchFrame::new(TouchConfig::new(2), extent).unwrap();
//!
//! // Raw y is measured from the top; consumer y from the bottom.
//! frame.on_motion(&MotionEvent::down(0, Point::new(10.0, 90.0)));
//! frame.on_motion(&MotionEvent::moved([RawPointer::new(0, Point::new(11.0, 89.0))]));
//! frame.update(extent);
//!
//! let events = frame.touch_events();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].kind(), TouchKind::Down);
//! assert_eq!(events[0].position(), Point::new(10.0, 10.0));
//!
//! // Nothing new arrives: the held pointer is reported as dragged in place.
//! frame.update(extent);
//! assert_eq!(frame.touch_events()[0].kind(), TouchKind::Dragged);
//! assert_eq!(frame.touch_events()[0].position(), Point::new(10.0, 10.0));
//! ```

use alloc::vec::Vec;
use core::mem;

use kurbo::{Point, Size};
use understory_pool::Pool;

use crate::config::{ConfigError, TouchConfig};
use crate::event::{TouchEvent, TouchKind};
use crate::motion::{MotionAction, MotionEvent};
use crate::slots::{PointerFlags, PointerSlots};
use crate::transform::ViewTransform;

/// Single-threaded touch capture and coalescing state.
///
/// Feed raw notifications with [`on_motion`](Self::on_motion), call
/// [`update`](Self::update) once per frame, then read
/// [`touch_events`](Self::touch_events). Events read from one frame are
/// recycled by the next `update`.
#[derive(Debug)]
pub struct TouchFrame {
    config: TouchConfig,
    transform: ViewTransform,
    pool: Pool<TouchEvent>,
    slots: PointerSlots,
    /// Events captured since the last update.
    buffered: Vec<TouchEvent>,
    /// Events published by the last update.
    filtered: Vec<TouchEvent>,
    /// Scratch list for the update in progress.
    selected: Vec<TouchEvent>,
}

impl TouchFrame {
    /// Create an empty frame state for a view of the given platform extent.
    pub fn new(config: TouchConfig, extent: Size) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!(
            "touch capture: {} pointer slots, scale {}, pool {}",
            config.max_touch_positions,
            config.scale_factor,
            config.max_pool_size
        );
        let mut pool = Pool::with_default(config.max_pool_size);
        pool.warm(config.max_pool_size);
        Ok(Self {
            transform: ViewTransform::new(config.scale_factor, extent),
            pool,
            slots: PointerSlots::new(config.max_touch_positions),
            buffered: Vec::with_capacity(config.max_pool_size),
            filtered: Vec::with_capacity(config.max_touch_positions),
            selected: Vec::with_capacity(config.max_touch_positions),
            config,
        })
    }

    /// The configuration this state was built with.
    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// The current coordinate transform.
    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    /// Capture one raw notification.
    ///
    /// Always returns `true` (the notification is consumed). Pointers whose id
    /// is at or above [`TouchConfig::max_touch_positions`] are skipped without
    /// touching any state.
    ///
    /// # Panics
    ///
    /// Panics if the notification carries an action code other than down, up,
    /// move, cancel, pointer down or pointer up.
    pub fn on_motion(&mut self, event: &MotionEvent) -> bool {
        match event.action() {
            MotionAction::Down(index) | MotionAction::PointerDown(index) => {
                let raw = event.pointer(index);
                if self.is_tracked(raw.id) {
                    self.push(raw.id, raw.position, TouchKind::Down);
                    self.slots.press(raw.id);
                }
            }
            MotionAction::Up(index)
            | MotionAction::PointerUp(index)
            | MotionAction::Cancel(index) => {
                let raw = event.pointer(index);
                if self.is_tracked(raw.id) {
                    self.push(raw.id, raw.position, TouchKind::Up);
                    self.slots.release(raw.id);
                }
            }
            MotionAction::Move => {
                for raw in event.pointers() {
                    if self.is_tracked(raw.id) {
                        self.push(raw.id, raw.position, TouchKind::Dragged);
                        self.slots.drag(raw.id);
                    }
                }
            }
        }
        true
    }

    /// Coalesce everything captured since the last call into at most one event
    /// per pointer.
    ///
    /// `extent` is the view's current platform size; it applies to
    /// notifications captured after this call.
    pub fn update(&mut self, extent: Size) {
        self.transform.set_extent(extent);
        let captured = self.buffered.len();

        for pointer in 0..self.slots.len() {
            let Some(flags) = self.slots.get(pointer) else {
                continue;
            };
            let chosen = if flags.contains(PointerFlags::DOWN) {
                let ev = take_first(&mut self.buffered, pointer, TouchKind::Down);
                debug_assert!(ev.is_some(), "pointer {pointer} is down without a buffered down");
                ev
            } else if flags.contains(PointerFlags::UP) {
                let ev = take_first(&mut self.buffered, pointer, TouchKind::Up);
                debug_assert!(ev.is_some(), "pointer {pointer} is up without a buffered up");
                ev
            } else if flags.contains(PointerFlags::DRAGGED) {
                self.resolve_drag(pointer)
            } else {
                None
            };
            if let Some(ev) = chosen {
                self.selected.push(ev);
            }
        }

        self.slots.end_frame();
        self.pool.release_all(self.filtered.drain(..));
        self.pool.release_all(self.buffered.drain(..));
        mem::swap(&mut self.filtered, &mut self.selected);

        log::trace!(
            "coalesced {captured} captured events into {} for this frame",
            self.filtered.len()
        );
    }

    /// Events published by the last [`update`](Self::update).
    ///
    /// At most one event per pointer, in pointer order. Calling this again
    /// without an `update` in between returns the same events.
    pub fn touch_events(&self) -> &[TouchEvent] {
        &self.filtered
    }

    #[cfg(feature = "std")]
    pub(crate) fn touch_events_mut(&mut self) -> &mut [TouchEvent] {
        &mut self.filtered
    }

    /// Current flags for `pointer`, or `None` if it is not tracked.
    pub fn pointer_state(&self, pointer: usize) -> Option<PointerFlags> {
        self.slots.get(pointer)
    }

    /// Number of events captured since the last update.
    pub fn buffered_len(&self) -> usize {
        self.buffered.len()
    }

    /// Number of idle events in the pool.
    pub fn pooled(&self) -> usize {
        self.pool.free_len()
    }

    fn is_tracked(&self, pointer: usize) -> bool {
        if pointer < self.slots.len() {
            true
        } else {
            log::trace!(
                "ignoring pointer {pointer}, only {} are tracked",
                self.slots.len()
            );
            false
        }
    }

    fn push(&mut self, pointer: usize, raw: Point, kind: TouchKind) {
        let position = self.transform.to_view(raw);
        let ev = self.checkout(pointer, position, kind);
        self.buffered.push(ev);
    }

    fn checkout(&mut self, pointer: usize, position: Point, kind: TouchKind) -> TouchEvent {
        let mut ev = self.pool.acquire();
        ev.set(pointer, position, kind);
        ev
    }

    fn resolve_drag(&mut self, pointer: usize) -> Option<TouchEvent> {
        if let Some(i) = self
            .buffered
            .iter()
            .rposition(|ev| ev.is(pointer, TouchKind::Dragged))
        {
            return Some(self.buffered.remove(i));
        }

        // The pointer is held but did not move.
        if let Some(i) = self
            .filtered
            .iter()
            .rposition(|ev| ev.is(pointer, TouchKind::Dragged))
        {
            return Some(self.filtered.remove(i));
        }

        if let Some(position) = self.previous_position(pointer, TouchKind::Down) {
            return Some(self.checkout(pointer, position, TouchKind::Dragged));
        }

        if let Some(position) = self.previous_position(pointer, TouchKind::Up) {
            log::warn!("pointer {pointer} resumed dragging from its last release");
            return Some(self.checkout(pointer, position, TouchKind::Dragged));
        }

        None
    }

    fn previous_position(&self, pointer: usize, kind: TouchKind) -> Option<Point> {
        self.filtered
            .iter()
            .find(|ev| ev.is(pointer, kind))
            .map(TouchEvent::position)
    }
}

fn take_first(events: &mut Vec<TouchEvent>, pointer: usize, kind: TouchKind) -> Option<TouchEvent> {
    let i = events.iter().position(|ev| ev.is(pointer, kind))?;
    Some(events.remove(i))
}
