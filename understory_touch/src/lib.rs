// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Touch: multi-touch capture with per-frame coalescing.
//!
//! ## Overview
//!
//! Platforms deliver touch notifications at their own pace, often many per
//! pointer between two rendered frames. Game loops want the opposite: once per
//! frame, one event per active pointer. This crate sits in between.
//!
//! - The **producer** side ([`TouchFrame::on_motion`], or
//!   [`TouchListener::on_touch`] across threads) turns raw
//!   [`MotionEvent`]s into [`TouchEvent`]s in consumer coordinates and buffers
//!   them, updating per-pointer [`PointerFlags`].
//! - The **consumer** side ([`TouchInput::update`]) runs once per frame and
//!   selects a single event per pointer: a press beats a drag, a release beats
//!   both, and a held pointer that did not move keeps reporting its last
//!   position as a drag. See the [`frame`](TouchFrame) docs for the full
//!   precedence.
//!
//! Events are recycled through a bounded [`understory_pool::Pool`], so a steady
//! stream of touches does not allocate once the pool is warm. The flip side is
//! that events returned by [`TouchInput::touch_events`] are only valid until
//! the next update; clone the ones you need to keep.
//!
//! ## Coordinates
//!
//! Raw positions are platform pixels with y growing downward. Consumer
//! positions have y growing upward from the bottom of the view, are multiplied
//! by [`TouchConfig::scale_factor`], and are clamped to the view so touches that
//! start or drift outside it report the nearest edge. See [`transform::ViewTransform`].
//!
//! ## Pointers
//!
//! Pointer ids at or above [`TouchConfig::max_touch_positions`] are ignored.
//!
//! ## Threads
//!
//! With the `std` feature, [`SharedTouchInput`] puts the state behind one
//! mutex: hand its [`TouchListener`] to the UI thread and call
//! [`SharedTouchInput::update`] from the render thread. [`ViewTouchInput`]
//! covers loops that pump platform events on the rendering thread.
//!
//! ## Helpers
//!
//! - [`TouchButton`]: rectangular regions activated on touch, on release, or
//!   while touched.
//! - [`back_key::BackKey`]: back key state polled from the render loop.
//!
//! ## Features
//!
//! - `std` (default): enables `std` for `kurbo` and the thread-shared
//!   [`SharedTouchInput`].
//! - `libm`: `no_std` float support for `kurbo`.
//!
//! Without `std`, this crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod back_key;
mod button;
mod config;
mod event;
mod frame;
mod input;
pub mod motion;
#[cfg(feature = "std")]
mod shared;
mod slots;
pub mod transform;

pub use button::{Activation, TouchButton};
pub use config::{ConfigError, TouchConfig};
pub use event::{TouchEvent, TouchKind};
pub use frame::TouchFrame;
pub use input::{TouchInput, ViewExtent, ViewTouchInput};
pub use motion::{MotionAction, MotionEvent, RawPointer};
#[cfg(feature = "std")]
pub use shared::{SharedTouchInput, TouchListener, TouchSurface};
pub use slots::PointerFlags;
