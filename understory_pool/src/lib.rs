// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Pool: a bounded object pool.
//!
//! A [`Pool`] keeps a free-list of previously used instances so hot loops can
//! recycle them instead of allocating fresh ones. When the free-list is empty,
//! [`Pool::acquire`] falls back to a [`Factory`] to build a new instance.
//!
//! The free-list is capped at [`Pool::max_size`]. Releasing into a full pool
//! drops the instance instead of growing the list, so a burst of releases can
//! never make the pool retain more than its cap. Callers must not assume a
//! released instance will be handed back later.
//!
//! ```
//! use understory_pool::Pool;
//!
//! let mut pool: Pool<Vec<u8>> = Pool::with_default(2);
//!
//! let mut buf = pool.acquire();
//! buf.extend_from_slice(b"abc");
//! buf.clear();
//! assert!(pool.release(buf));
//! assert_eq!(pool.free_len(), 1);
//!
//! // The pool is capped: the third release is dropped.
//! assert!(pool.release(Vec::new()));
//! assert!(!pool.release(Vec::new()));
//! assert_eq!(pool.free_len(), 2);
//! ```
//!
//! The pool is not synchronized. Share it by placing it behind whatever lock
//! already guards the state it serves.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

/// Builds new instances for a [`Pool`] when its free-list is empty.
///
/// Any `FnMut() -> T` closure or function pointer is a factory.
pub trait Factory<T> {
    /// Create a fresh instance.
    fn create(&mut self) -> T;
}

impl<T, F: FnMut() -> T> Factory<T> for F {
    fn create(&mut self) -> T {
        self()
    }
}

/// A bounded free-list of recyclable `T` instances.
pub struct Pool<T, F = fn() -> T> {
    free: Vec<T>,
    factory: F,
    max_size: usize,
}

impl<T, F: Factory<T>> Pool<T, F> {
    /// Create an empty pool that retains at most `max_size` free instances.
    ///
    /// The free-list is allocated up front so releases never reallocate.
    pub fn new(factory: F, max_size: usize) -> Self {
        Self {
            free: Vec::with_capacity(max_size),
            factory,
            max_size,
        }
    }

    /// Take an instance out of the pool.
    ///
    /// Returns the most recently released instance if there is one, otherwise
    /// builds a new one with the factory. Never fails for capacity reasons.
    pub fn acquire(&mut self) -> T {
        match self.free.pop() {
            Some(item) => item,
            None => self.factory.create(),
        }
    }

    /// Return an instance to the pool.
    ///
    /// Returns `true` if the instance was retained, `false` if the pool was
    /// already full and the instance was dropped.
    pub fn release(&mut self, item: T) -> bool {
        if self.free.len() < self.max_size {
            self.free.push(item);
            true
        } else {
            log::debug!(
                "pool at capacity ({}), dropping released instance",
                self.max_size
            );
            false
        }
    }

    /// Release every instance yielded by `items`.
    ///
    /// Returns how many were retained.
    pub fn release_all(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let mut kept = 0;
        for item in items {
            if self.release(item) {
                kept += 1;
            }
        }
        kept
    }

    /// Pre-fill the free-list with up to `count` factory-built instances.
    ///
    /// Never exceeds [`Pool::max_size`].
    pub fn warm(&mut self, count: usize) {
        let target = count.min(self.max_size);
        while self.free.len() < target {
            let item = self.factory.create();
            self.free.push(item);
        }
    }
}

impl<T, F> Pool<T, F> {
    /// Number of instances currently waiting on the free-list.
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Maximum number of instances the free-list retains.
    pub const fn max_size(&self) -> usize {
        self.max_size
    }
}

impl<T: Default> Pool<T> {
    /// Create a pool whose factory is `T::default`.
    pub fn with_default(max_size: usize) -> Self {
        Self::new(T::default as fn() -> T, max_size)
    }
}

impl<T, F> fmt::Debug for Pool<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("free_len", &self.free.len())
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}
