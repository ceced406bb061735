// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for touch capture.

/// Rejected [`TouchConfig`] values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// At least one pointer slot is required.
    #[error("max_touch_positions must be at least 1")]
    ZeroTouchPositions,
    /// The event pool must be able to retain at least one event.
    #[error("max_pool_size must be at least 1")]
    ZeroPoolSize,
    /// The scale factor must be finite and positive.
    #[error("scale factor must be finite and positive, got {0}")]
    InvalidScaleFactor(f64),
}

/// Sizing and coordinate settings for a touch input.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchConfig {
    /// Number of pointer slots; pointers with an id at or above this are ignored.
    pub max_touch_positions: usize,
    /// Multiplier from platform pixels to consumer coordinates.
    pub scale_factor: f64,
    /// Maximum number of idle events the pool retains.
    pub max_pool_size: usize,
}

impl TouchConfig {
    /// Default pool capacity.
    pub const DEFAULT_POOL_SIZE: usize = 40;

    /// Track `max_touch_positions` pointers with a scale factor of 1.
    pub const fn new(max_touch_positions: usize) -> Self {
        Self {
            max_touch_positions,
            scale_factor: 1.0,
            max_pool_size: Self::DEFAULT_POOL_SIZE,
        }
    }

    /// Set the scale factor (`consumer = platform * scale_factor`).
    #[must_use]
    pub const fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the pool capacity.
    #[must_use]
    pub const fn with_max_pool_size(mut self, max_pool_size: usize) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_touch_positions == 0 {
            return Err(ConfigError::ZeroTouchPositions);
        }
        if self.max_pool_size == 0 {
            return Err(ConfigError::ZeroPoolSize);
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(ConfigError::InvalidScaleFactor(self.scale_factor));
        }
        Ok(())
    }
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self::new(10)
    }
}
