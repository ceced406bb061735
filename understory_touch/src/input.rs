// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The consumer-facing touch input contract and a single-threaded binding.

use alloc::sync::Arc;
use core::ops::Deref;

use kurbo::Size;

use crate::config::{ConfigError, TouchConfig};
use crate::event::TouchEvent;
use crate::frame::TouchFrame;
use crate::motion::MotionEvent;

/// Something with a current size in platform pixels, usually the view that
/// delivers touches.
///
/// Read once per frame update, so implementations can report live resizes.
pub trait ViewExtent {
    /// Current width and height.
    fn extent(&self) -> Size;
}

impl ViewExtent for Size {
    fn extent(&self) -> Size {
        *self
    }
}

impl<V: ViewExtent + ?Sized> ViewExtent for &V {
    fn extent(&self) -> Size {
        (**self).extent()
    }
}

impl<V: ViewExtent + ?Sized> ViewExtent for Arc<V> {
    fn extent(&self) -> Size {
        (**self).extent()
    }
}

/// Per-frame access to coalesced touch events.
///
/// Call [`update`](Self::update) first in every frame, then read
/// [`touch_events`](Self::touch_events). Returned events are only valid until
/// the next `update`; clone any you need to keep.
pub trait TouchInput {
    /// Handle to the current frame's events.
    type Events<'a>: Deref<Target = [TouchEvent]>
    where
        Self: 'a;

    /// Coalesce the notifications received since the previous update.
    fn update(&mut self);

    /// The current frame's events, at most one per pointer.
    fn touch_events(&self) -> Self::Events<'_>;
}

/// A [`TouchFrame`] bound to a view, for loops that pump platform events on
/// the same thread that renders.
///
/// ```
/// use kurbo::{Point, Size};
/// use understory_touch::{MotionEvent, TouchConfig, TouchInput, TouchKind, ViewTouchInput};
///
/// let mut input = ViewTouchInput::new(Size::new(320.0, 480.0), TouchConfig::new(1)).unwrap();
/// input.on_motion(&MotionEvent::down(0, Point::new(20.0, 480.0)));
/// input.update();
/// assert_eq!(input.touch_events()[0].kind(), TouchKind::Down);
/// assert_eq!(input.touch_events()[0].position(), Point::new(20.0, 0.0));
/// ```
#[derive(Debug)]
pub struct ViewTouchInput<V> {
    frame: TouchFrame,
    view: V,
}

impl<V: ViewExtent> ViewTouchInput<V> {
    /// Bind a new frame state to `view`.
    pub fn new(view: V, config: TouchConfig) -> Result<Self, ConfigError> {
        let frame = TouchFrame::new(config, view.extent())?;
        Ok(Self { frame, view })
    }

    /// Capture one raw notification; see [`TouchFrame::on_motion`].
    pub fn on_motion(&mut self, event: &MotionEvent) -> bool {
        self.frame.on_motion(event)
    }

    /// The bound view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The underlying frame state.
    pub fn frame(&self) -> &TouchFrame {
        &self.frame
    }
}

impl<V: ViewExtent> TouchInput for ViewTouchInput<V> {
    type Events<'a>
        = &'a [TouchEvent]
    where
        Self: 'a;

    fn update(&mut self) {
        let extent = self.view.extent();
        self.frame.update(extent);
    }

    fn touch_events(&self) -> Self::Events<'_> {
        self.frame.touch_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TouchKind;
    use core::cell::Cell;
    use kurbo::Point;

    struct ResizableView {
        size: Cell<Size>,
    }

    impl ViewExtent for ResizableView {
        fn extent(&self) -> Size {
            self.size.get()
        }
    }

    #[test]
    fn update_reads_extent_each_frame() {
        let view = ResizableView {
            size: Cell::new(Size::new(100.0, 100.0)),
        };
        let mut input = ViewTouchInput::new(&view, TouchConfig::new(1)).unwrap();

        view.size.set(Size::new(10.0, 10.0));
        input.update();
        input.on_motion(&MotionEvent::down(0, Point::new(50.0, 5.0)));
        input.update();
        let events = input.touch_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].position(), Point::new(10.0, 5.0));
        assert_eq!(input.frame().transform().extent(), Size::new(10.0, 10.0));
    }

    #[test]
    fn arc_view_reports_inner_extent() {
        let view = Arc::new(Size::new(3.0, 4.0));
        assert_eq!(view.extent(), Size::new(3.0, 4.0));
        let input = ViewTouchInput::new(view, TouchConfig::new(1)).unwrap();
        assert_eq!(input.view().extent(), Size::new(3.0, 4.0));
    }

    #[test]
    fn generic_consumer_sees_coalesced_events() {
        fn kinds<I: TouchInput>(input: &mut I) -> alloc::vec::Vec<TouchKind> {
            input.update();
            input.touch_events().iter().map(TouchEvent::kind).collect()
        }

        let mut input = ViewTouchInput::new(Size::new(50.0, 50.0), TouchConfig::new(2)).unwrap();
        input.on_motion(&MotionEvent::down(1, Point::new(1.0, 1.0)));
        assert_eq!(kinds(&mut input), [TouchKind::Down]);
        assert_eq!(kinds(&mut input), [TouchKind::Dragged]);
        input.on_motion(&MotionEvent::up(1, Point::new(1.0, 1.0)));
        assert_eq!(kinds(&mut input), [TouchKind::Up]);
        assert!(kinds(&mut input).is_empty());
    }
}
