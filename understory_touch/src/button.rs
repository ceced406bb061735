// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangular touch buttons driven by coalesced touch events.
//!
//! A button is *touched* when any event of the frame lies inside its bounds,
//! which is what rendering should reflect. It is *activated* according to its
//! [`Activation`] mode, which is what game logic should react to.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_touch::{Activation, TouchButton, TouchEvent, TouchKind};
//!
//! let mut jump = TouchButton::new(Rect::new(0.0, 0.0, 50.0, 50.0), Activation::OnRelease);
//!
//! jump.update(&[TouchEvent::new(0, Point::new(25.0, 25.0), TouchKind::Down)]);
//! assert!(jump.is_touched());
//! assert!(!jump.is_activated());
//!
//! jump.update(&[TouchEvent::new(0, Point::new(25.0, 25.0), TouchKind::Up)]);
//! assert!(jump.is_activated());
//! ```

use kurbo::{Point, Rect, Size};

use crate::event::{TouchEvent, TouchKind};

/// When a [`TouchButton`] counts as activated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Activation {
    /// A pointer went down inside the button this frame.
    OnTouch,
    /// Any pointer is inside the button this frame.
    WhileTouched,
    /// A pointer was released inside the button this frame.
    OnRelease,
}

/// A rectangular hit region with touched/activated state.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchButton {
    bounds: Rect,
    activation: Activation,
    touched: bool,
    activated: bool,
}

impl TouchButton {
    /// Create a button covering `bounds`.
    pub fn new(bounds: Rect, activation: Activation) -> Self {
        Self {
            bounds: bounds.abs(),
            activation,
            touched: false,
            activated: false,
        }
    }

    /// Create a button of `size` centered on `center`.
    pub fn centered(center: Point, size: Size, activation: Activation) -> Self {
        Self::new(Rect::from_center_size(center, size), activation)
    }

    /// Recompute touched/activated state from this frame's events.
    pub fn update(&mut self, events: &[TouchEvent]) {
        let mut touched = false;
        let mut activated = false;
        for ev in events.iter().filter(|ev| self.contains(ev.position())) {
            touched = true;
            activated |= match self.activation {
                Activation::OnTouch => ev.kind() == TouchKind::Down,
                Activation::WhileTouched => true,
                Activation::OnRelease => ev.kind() == TouchKind::Up,
            };
        }
        self.touched = touched;
        self.activated = activated;
    }

    /// Whether `point` lies in the button; all edges are inclusive.
    pub fn contains(&self, point: Point) -> bool {
        let r = self.bounds;
        point.x >= r.x0 && point.x <= r.x1 && point.y >= r.y0 && point.y <= r.y1
    }

    /// Whether any event touched the button in the last update.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Whether the button was activated in the last update.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// The activation mode.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// The hit region.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Move or resize the hit region.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds.abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(x: f64, y: f64, kind: TouchKind) -> TouchEvent {
        TouchEvent::new(0, Point::new(x, y), kind)
    }

    #[test]
    fn on_touch_needs_down_inside() {
        let mut b = TouchButton::new(Rect::new(10.0, 10.0, 20.0, 20.0), Activation::OnTouch);
        b.update(&[ev(15.0, 15.0, TouchKind::Dragged)]);
        assert!(b.is_touched());
        assert!(!b.is_activated());

        b.update(&[ev(15.0, 15.0, TouchKind::Down)]);
        assert!(b.is_activated());

        b.update(&[ev(50.0, 15.0, TouchKind::Down)]);
        assert!(!b.is_touched());
        assert!(!b.is_activated());
    }

    #[test]
    fn while_touched_follows_any_event() {
        let mut b = TouchButton::centered(
            Point::new(0.0, 0.0),
            Size::new(4.0, 4.0),
            Activation::WhileTouched,
        );
        b.update(&[ev(1.0, -1.0, TouchKind::Dragged)]);
        assert!(b.is_activated());
        b.update(&[]);
        assert!(!b.is_touched());
        assert!(!b.is_activated());
    }

    #[test]
    fn on_release_with_several_pointers() {
        let mut b = TouchButton::new(Rect::new(0.0, 0.0, 10.0, 10.0), Activation::OnRelease);
        b.update(&[
            TouchEvent::new(0, Point::new(5.0, 5.0), TouchKind::Dragged),
            TouchEvent::new(1, Point::new(50.0, 50.0), TouchKind::Up),
        ]);
        assert!(b.is_touched());
        assert!(!b.is_activated());

        b.update(&[
            TouchEvent::new(0, Point::new(5.0, 5.0), TouchKind::Dragged),
            TouchEvent::new(1, Point::new(9.0, 9.0), TouchKind::Up),
        ]);
        assert!(b.is_activated());
    }

    #[test]
    fn edges_are_inclusive() {
        let b = TouchButton::new(Rect::new(0.0, 0.0, 10.0, 10.0), Activation::WhileTouched);
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(b.contains(Point::new(10.0, 10.0)));
        assert!(!b.contains(Point::new(10.001, 5.0)));
    }

    #[test]
    fn bounds_are_normalized() {
        let mut b = TouchButton::new(Rect::new(10.0, 10.0, 0.0, 0.0), Activation::OnTouch);
        assert_eq!(b.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
        b.set_bounds(Rect::new(5.0, 0.0, 1.0, 2.0));
        assert_eq!(b.bounds(), Rect::new(1.0, 0.0, 5.0, 2.0));
        assert_eq!(b.activation(), Activation::OnTouch);
    }
}
