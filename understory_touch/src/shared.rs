// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-thread touch input: capture on the UI thread, coalesce on the render
//! thread.
//!
//! [`SharedTouchInput`] owns the consumer side. It hands out [`TouchListener`]
//! handles for the platform's event thread; both sides share one
//! [`TouchFrame`] behind a single mutex. Every listener callback and every
//! [`SharedTouchInput::update`] holds that mutex for its whole duration, and
//! both are short, allocation-free once the pool is warm.
//!
//! ```
//! use std::thread;
//! use kurbo::{Point, Size};
//! use understory_touch::{MotionEvent, SharedTouchInput, TouchConfig, TouchKind};
//!
//! let input = SharedTouchInput::new(Size::new(100.0, 100.0), TouchConfig::new(2)).unwrap();
//! let listener = input.listener();
//!
//! thread::spawn(move || {
//!     listener.on_touch(&MotionEvent::down(0, Point::new(30.0, 60.0)));
//! })
//! .join()
//! .unwrap();
//!
//! input.update();
//! let events = input.touch_events();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].kind(), TouchKind::Down);
//! assert_eq!(events[0].position(), Point::new(30.0, 40.0));
//! ```

use alloc::sync::Arc;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use crate::config::{ConfigError, TouchConfig};
use crate::event::TouchEvent;
use crate::frame::TouchFrame;
use crate::input::{TouchInput, ViewExtent};
use crate::motion::MotionEvent;

/// A view that can deliver raw touches to one listener.
pub trait TouchSurface: ViewExtent {
    /// Make `listener` the only raw touch listener, replacing any previous one.
    fn set_touch_listener(&self, listener: TouchListener);
}

impl<S: TouchSurface + ?Sized> TouchSurface for &S {
    fn set_touch_listener(&self, listener: TouchListener) {
        (**self).set_touch_listener(listener);
    }
}

impl<S: TouchSurface + ?Sized> TouchSurface for Arc<S> {
    fn set_touch_listener(&self, listener: TouchListener) {
        (**self).set_touch_listener(listener);
    }
}

/// Producer handle: feed raw notifications from the platform's event thread.
#[derive(Clone, Debug)]
pub struct TouchListener {
    frame: Arc<Mutex<TouchFrame>>,
}

impl TouchListener {
    /// Capture one raw notification; see [`TouchFrame::on_motion`].
    ///
    /// Returns `true`: every notification is consumed.
    pub fn on_touch(&self, event: &MotionEvent) -> bool {
        self.frame.lock().on_motion(event)
    }
}

/// Consumer handle: coalesce and read touches once per frame.
#[derive(Debug)]
pub struct SharedTouchInput<V> {
    frame: Arc<Mutex<TouchFrame>>,
    view: V,
}

impl<V: ViewExtent> SharedTouchInput<V> {
    /// Create the shared state for `view` without registering a listener.
    ///
    /// Use [`listener`](Self::listener) to obtain the producer handle.
    pub fn new(view: V, config: TouchConfig) -> Result<Self, ConfigError> {
        let frame = TouchFrame::new(config, view.extent())?;
        Ok(Self {
            frame: Arc::new(Mutex::new(frame)),
            view,
        })
    }

    /// A new producer handle sharing this input's state.
    pub fn listener(&self) -> TouchListener {
        TouchListener {
            frame: Arc::clone(&self.frame),
        }
    }

    /// Coalesce the notifications received since the previous update.
    ///
    /// Reads the view extent fresh, so call this exactly once per frame
    /// before [`touch_events`](Self::touch_events).
    pub fn update(&self) {
        let extent = self.view.extent();
        self.frame.lock().update(extent);
    }

    /// The current frame's events, at most one per pointer.
    ///
    /// The returned guard keeps the shared state locked, which blocks the
    /// producer; drop it before the frame ends. The events are recycled by the
    /// next [`update`](Self::update).
    pub fn touch_events(&self) -> MappedMutexGuard<'_, [TouchEvent]> {
        MutexGuard::map(self.frame.lock(), TouchFrame::touch_events_mut)
    }

    /// Run `f` with exclusive access to the shared frame state.
    pub fn with_frame<R>(&self, f: impl FnOnce(&TouchFrame) -> R) -> R {
        f(&self.frame.lock())
    }

    /// The bound view.
    pub fn view(&self) -> &V {
        &self.view
    }
}

impl<V: TouchSurface> SharedTouchInput<V> {
    /// Create the shared state and register as `view`'s touch listener.
    pub fn attach(view: V, config: TouchConfig) -> Result<Self, ConfigError> {
        let input = Self::new(view, config)?;
        input.view.set_touch_listener(input.listener());
        Ok(input)
    }
}

impl<V: ViewExtent> TouchInput for SharedTouchInput<V> {
    type Events<'a>
        = MappedMutexGuard<'a, [TouchEvent]>
    where
        Self: 'a;

    fn update(&mut self) {
        Self::update(self);
    }

    fn touch_events(&self) -> Self::Events<'_> {
        Self::touch_events(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TouchKind;
    use crate::motion::RawPointer;
    use kurbo::{Point, Size};
    use std::sync::Barrier;
    use std::thread;
    use std::vec::Vec;

    const EXTENT: Size = Size::new(200.0, 200.0);

    #[derive(Default)]
    struct FakeSurface {
        listener: Mutex<Option<TouchListener>>,
    }

    impl FakeSurface {
        fn dispatch(&self, event: &MotionEvent) -> bool {
            match &*self.listener.lock() {
                Some(listener) => listener.on_touch(event),
                None => false,
            }
        }
    }

    impl ViewExtent for FakeSurface {
        fn extent(&self) -> Size {
            EXTENT
        }
    }

    impl TouchSurface for FakeSurface {
        fn set_touch_listener(&self, listener: TouchListener) {
            *self.listener.lock() = Some(listener);
        }
    }

    #[test]
    fn attach_registers_listener() {
        let surface = Arc::new(FakeSurface::default());
        assert!(!surface.dispatch(&MotionEvent::down(0, Point::ORIGIN)));

        let input = SharedTouchInput::attach(Arc::clone(&surface), TouchConfig::new(1)).unwrap();
        assert!(surface.dispatch(&MotionEvent::down(0, Point::new(10.0, 190.0))));
        input.update();
        let events = input.touch_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].position(), Point::new(10.0, 10.0));
    }

    #[test]
    fn attach_replaces_previous_listener() {
        let surface = FakeSurface::default();
        let first = SharedTouchInput::attach(&surface, TouchConfig::new(1)).unwrap();
        let second = SharedTouchInput::attach(&surface, TouchConfig::new(1)).unwrap();

        surface.dispatch(&MotionEvent::down(0, Point::ORIGIN));
        first.update();
        second.update();
        assert!(first.touch_events().is_empty());
        assert_eq!(second.touch_events().len(), 1);
    }

    #[test]
    fn concurrent_producer_keeps_one_event_per_pointer() {
        const POINTERS: usize = 4;
        const FRAMES: usize = 200;

        let input = SharedTouchInput::new(EXTENT, TouchConfig::new(POINTERS)).unwrap();
        let listener = input.listener();
        let start = Arc::new(Barrier::new(2));

        let producer = {
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                for id in 0..POINTERS {
                    listener.on_touch(&MotionEvent::down(id, Point::new(1.0, 1.0)));
                }
                for step in 0..2_000_u32 {
                    let x = f64::from(step % 200);
                    let pointers: Vec<_> = (0..POINTERS)
                        .map(|id| RawPointer::new(id, Point::new(x, 100.0)))
                        .collect();
                    listener.on_touch(&MotionEvent::moved(pointers));
                }
                for id in 0..POINTERS {
                    listener.on_touch(&MotionEvent::up(id, Point::new(5.0, 5.0)));
                }
            })
        };

        start.wait();
        for _ in 0..FRAMES {
            input.update();
            let events = input.touch_events();
            let mut seen = [false; POINTERS];
            for ev in events.iter() {
                assert_ne!(ev.kind(), TouchKind::NotTracked);
                let pointer = ev.pointer();
                assert!(!seen[pointer], "pointer {pointer} reported twice");
                seen[pointer] = true;
            }
        }
        producer.join().unwrap();

        // Drain: the releases surface as Up, then nothing.
        input.update();
        input.update();
        assert!(input.touch_events().is_empty());
        input.with_frame(|frame| {
            assert!(frame.pooled() <= frame.config().max_pool_size);
            assert_eq!(frame.buffered_len(), 0);
        });
    }

    #[test]
    fn generic_update_through_trait() {
        fn frame_kinds<I: TouchInput>(input: &mut I) -> Vec<TouchKind> {
            input.update();
            input.touch_events().iter().map(TouchEvent::kind).collect()
        }

        let mut input = SharedTouchInput::new(EXTENT, TouchConfig::new(1)).unwrap();
        input
            .listener()
            .on_touch(&MotionEvent::down(0, Point::ORIGIN));
        assert_eq!(frame_kinds(&mut input), [TouchKind::Down]);
        assert_eq!(frame_kinds(&mut input), [TouchKind::Dragged]);
    }
}
