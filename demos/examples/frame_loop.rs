// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capture on one thread, coalesce once per frame on another.
//!
//! A producer thread plays scripted gestures into a fake surface much faster
//! than the render loop runs; the render loop prints the single event it sees
//! per pointer per frame and drives a couple of touch buttons.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p understory_demos --example frame_loop`

use std::thread;
use std::time::Duration;

use kurbo::{Point, Rect, Size};
use understory_demos::{DemoSurface, pinch_out, swipe};
use understory_touch::{
    Activation, MotionEvent, SharedTouchInput, TouchButton, TouchConfig, TouchKind,
};

const FRAME: Duration = Duration::from_millis(16);

fn main() {
    env_logger::init();

    let surface = std::sync::Arc::new(DemoSurface::new(Size::new(480.0, 320.0)));
    // Consumer space is half the platform resolution.
    let config = TouchConfig::new(4).with_scale_factor(0.5);
    let input = match SharedTouchInput::attach(surface.clone(), config) {
        Ok(input) => input,
        Err(err) => {
            log::error!("invalid touch configuration: {err}");
            return;
        }
    };

    let mut fire = TouchButton::new(Rect::new(0.0, 0.0, 60.0, 60.0), Activation::OnTouch);
    let mut menu = TouchButton::new(Rect::new(180.0, 100.0, 240.0, 160.0), Activation::OnRelease);

    let producer = {
        let surface = surface.clone();
        thread::spawn(move || {
            // Press and hold the fire button for a few frames.
            let fire_at = Point::new(40.0, 280.0);
            surface.dispatch(&MotionEvent::down(0, fire_at));
            thread::sleep(FRAME * 3);
            surface.dispatch(&MotionEvent::up(0, fire_at));
            thread::sleep(FRAME * 2);

            // A tap shorter than one frame only surfaces as a release.
            surface.dispatch(&MotionEvent::down(1, fire_at));
            surface.dispatch(&MotionEvent::up(1, fire_at));
            thread::sleep(FRAME * 2);

            // A fast swipe ending on the menu button.
            for ev in swipe(0, Point::new(100.0, 300.0), Point::new(420.0, 40.0), 40) {
                surface.dispatch(&ev);
                thread::sleep(Duration::from_millis(2));
            }
            thread::sleep(FRAME * 2);

            // Rotate the device, then pinch.
            surface.resize(Size::new(320.0, 480.0));
            thread::sleep(FRAME);
            for ev in pinch_out(Point::new(160.0, 240.0), 100.0, 30) {
                surface.dispatch(&ev);
                thread::sleep(Duration::from_millis(3));
            }
        })
    };

    for frame_no in 0..40 {
        input.update();
        {
            let events = input.touch_events();
            for ev in events.iter() {
                log::info!(
                    "frame {frame_no:>2}: pointer {} {:?} at ({:.1}, {:.1})",
                    ev.pointer(),
                    ev.kind(),
                    ev.x(),
                    ev.y()
                );
            }
            fire.update(&events);
            menu.update(&events);
            if events.iter().any(|ev| ev.kind() == TouchKind::Up) {
                log::debug!("frame {frame_no:>2}: a pointer was released");
            }
        }
        if fire.is_activated() {
            log::info!("frame {frame_no:>2}: fire!");
        }
        if menu.is_activated() {
            log::info!("frame {frame_no:>2}: menu opened");
        }
        thread::sleep(FRAME);
    }

    if producer.join().is_err() {
        log::error!("producer thread panicked");
    }
    input.with_frame(|frame| {
        log::info!("{} events idle in the pool", frame.pooled());
    });
}
