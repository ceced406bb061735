// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scaffolding for the Understory Touch demos: a stand-in platform view
//! and a few scripted gestures.

use kurbo::{Point, Size};
use parking_lot::Mutex;
use understory_touch::{MotionEvent, RawPointer, TouchListener, TouchSurface, ViewExtent};

/// A fake platform view: it has a resizable extent and forwards dispatched
/// notifications to whichever listener registered last.
#[derive(Debug, Default)]
pub struct DemoSurface {
    extent: Mutex<Size>,
    listener: Mutex<Option<TouchListener>>,
}

impl DemoSurface {
    /// A surface of the given size in platform pixels.
    pub fn new(extent: Size) -> Self {
        Self {
            extent: Mutex::new(extent),
            listener: Mutex::new(None),
        }
    }

    /// Simulate a rotation or window resize.
    pub fn resize(&self, extent: Size) {
        *self.extent.lock() = extent;
    }

    /// Deliver a notification the way the platform's event thread would.
    ///
    /// Returns `false` if nobody is listening.
    pub fn dispatch(&self, event: &MotionEvent) -> bool {
        let listener = self.listener.lock().clone();
        match listener {
            Some(listener) => listener.on_touch(event),
            None => false,
        }
    }
}

impl ViewExtent for DemoSurface {
    fn extent(&self) -> Size {
        *self.extent.lock()
    }
}

impl TouchSurface for DemoSurface {
    fn set_touch_listener(&self, listener: TouchListener) {
        *self.listener.lock() = Some(listener);
    }
}

/// A press at `from`, `steps` moves towards `to`, and a release at `to`.
pub fn swipe(id: usize, from: Point, to: Point, steps: u32) -> Vec<MotionEvent> {
    let mut events = Vec::with_capacity(steps as usize + 2);
    events.push(MotionEvent::down(id, from));
    for i in 1..=steps {
        let t = f64::from(i) / f64::from(steps);
        events.push(MotionEvent::moved([RawPointer::new(id, from.lerp(to, t))]));
    }
    events.push(MotionEvent::up(id, to));
    events
}

/// Two pointers pressed together, spread apart, then released one by one.
pub fn pinch_out(center: Point, distance: f64, steps: u32) -> Vec<MotionEvent> {
    let at = |d: f64| {
        [
            RawPointer::new(0, Point::new(center.x - d, center.y)),
            RawPointer::new(1, Point::new(center.x + d, center.y)),
        ]
    };
    let mut events = Vec::with_capacity(steps as usize + 4);
    events.push(MotionEvent::down(0, at(0.0)[0].position));
    events.push(MotionEvent::pointer_down(1, at(0.0)));
    for i in 1..=steps {
        let d = distance * f64::from(i) / f64::from(steps);
        events.push(MotionEvent::moved(at(d)));
    }
    events.push(MotionEvent::pointer_up(0, at(distance)));
    events.push(MotionEvent::up(1, at(distance)[1].position));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use understory_touch::{SharedTouchInput, TouchConfig, TouchKind};

    #[test]
    fn swipe_in_one_frame_surfaces_as_release() {
        let surface = Arc::new(DemoSurface::new(Size::new(100.0, 100.0)));
        let input = SharedTouchInput::attach(Arc::clone(&surface), TouchConfig::new(1)).unwrap();
        for ev in swipe(0, Point::new(0.0, 100.0), Point::new(50.0, 50.0), 10) {
            assert!(surface.dispatch(&ev));
        }
        input.update();
        let events = input.touch_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), TouchKind::Up);
        assert_eq!(events[0].position(), Point::new(50.0, 50.0));
    }

    #[test]
    fn pinch_reports_both_pointers() {
        let surface = Arc::new(DemoSurface::new(Size::new(200.0, 200.0)));
        let input = SharedTouchInput::attach(Arc::clone(&surface), TouchConfig::new(2)).unwrap();
        let script = pinch_out(Point::new(100.0, 100.0), 50.0, 5);
        let (press, rest) = script.split_at(2);
        for ev in press {
            surface.dispatch(ev);
        }
        input.update();
        assert_eq!(input.touch_events().len(), 2);

        let (moves, release) = rest.split_at(rest.len() - 2);
        for ev in moves {
            surface.dispatch(ev);
        }
        input.update();
        let xs: Vec<f64> = input.touch_events().iter().map(|ev| ev.x()).collect();
        assert_eq!(xs, [50.0, 150.0]);

        for ev in release {
            surface.dispatch(ev);
        }
        input.update();
        assert!(
            input
                .touch_events()
                .iter()
                .all(|ev| ev.kind() == TouchKind::Up)
        );
        input.update();
        assert!(input.touch_events().is_empty());
    }

    #[test]
    fn dispatch_without_listener_is_unhandled() {
        let surface = DemoSurface::default();
        assert!(!surface.dispatch(&MotionEvent::down(0, Point::ORIGIN)));
        surface.resize(Size::new(5.0, 5.0));
        assert_eq!(surface.extent(), Size::new(5.0, 5.0));
    }
}
