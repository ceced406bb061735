// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping from platform pixels to consumer coordinates.

use kurbo::{Point, Size};

/// Converts raw platform positions into the consumer's coordinate space.
///
/// The platform reports y growing downward from the top of the view; the
/// consumer space has y growing upward from the bottom. Both axes are then
/// multiplied by the scale factor and clamped independently to
/// `[0, extent * scale_factor]`, so touches outside the view snap to its edge.
///
/// ```
/// use kurbo::{Point, Size};
/// use understory_touch::transform::ViewTransform;
///
/// let t = ViewTransform::new(2.0, Size::new(100.0, 50.0));
/// assert_eq!(t.to_view(Point::new(10.0, 40.0)), Point::new(20.0, 20.0));
/// // Off the right edge and above the top.
/// assert_eq!(t.to_view(Point::new(130.0, -5.0)), Point::new(200.0, 100.0));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewTransform {
    scale_factor: f64,
    extent: Size,
}

impl ViewTransform {
    /// Create a transform for a view of the given platform extent.
    pub const fn new(scale_factor: f64, extent: Size) -> Self {
        Self {
            scale_factor,
            extent,
        }
    }

    /// Replace the view extent.
    pub fn set_extent(&mut self, extent: Size) {
        self.extent = extent;
    }

    /// The view extent in platform pixels.
    pub const fn extent(&self) -> Size {
        self.extent
    }

    /// The scale factor.
    pub const fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Upper bound of each axis in consumer coordinates.
    pub fn bounds(&self) -> Size {
        self.extent * self.scale_factor
    }

    /// Map a raw platform position to consumer coordinates.
    ///
    /// The result always lies within [`bounds`](Self::bounds); a NaN
    /// coordinate maps to `0.0`.
    pub fn to_view(&self, raw: Point) -> Point {
        let bounds = self.bounds();
        let x = raw.x * self.scale_factor;
        let y = (self.extent.height - raw.y) * self.scale_factor;
        Point::new(clamp_axis(x, bounds.width), clamp_axis(y, bounds.height))
    }
}

fn clamp_axis(value: f64, max: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else if value > max {
        max
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_y_and_scales() {
        let t = ViewTransform::new(0.5, Size::new(200.0, 100.0));
        assert_eq!(t.to_view(Point::new(0.0, 100.0)), Point::new(0.0, 0.0));
        assert_eq!(t.to_view(Point::new(200.0, 0.0)), Point::new(100.0, 50.0));
        assert_eq!(t.to_view(Point::new(40.0, 60.0)), Point::new(20.0, 20.0));
    }

    #[test]
    fn clamps_each_axis_independently() {
        let t = ViewTransform::new(1.0, Size::new(100.0, 100.0));
        // x too small, y in range
        assert_eq!(t.to_view(Point::new(-10.0, 30.0)), Point::new(0.0, 70.0));
        // x in range, y below the view
        assert_eq!(t.to_view(Point::new(30.0, 150.0)), Point::new(30.0, 0.0));
        // both out
        assert_eq!(
            t.to_view(Point::new(500.0, -500.0)),
            Point::new(100.0, 100.0)
        );
    }

    #[test]
    fn non_finite_coordinates_stay_in_bounds() {
        let t = ViewTransform::new(1.0, Size::new(100.0, 100.0));
        let nan = f64::NAN;
        assert_eq!(t.to_view(Point::new(nan, 10.0)), Point::new(0.0, 90.0));
        assert_eq!(t.to_view(Point::new(20.0, nan)), Point::new(20.0, 0.0));
        assert_eq!(
            t.to_view(Point::new(f64::INFINITY, f64::INFINITY)),
            Point::new(100.0, 0.0)
        );
        assert_eq!(
            t.to_view(Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY)),
            Point::new(0.0, 100.0)
        );
    }

    #[test]
    fn zero_extent_snaps_to_origin() {
        let t = ViewTransform::new(1.0, Size::ZERO);
        assert_eq!(t.to_view(Point::new(12.0, 34.0)), Point::ORIGIN);
    }

    #[test]
    fn set_extent_changes_bounds() {
        let mut t = ViewTransform::new(3.0, Size::new(10.0, 10.0));
        assert_eq!(t.bounds(), Size::new(30.0, 30.0));
        t.set_extent(Size::new(20.0, 5.0));
        assert_eq!(t.extent(), Size::new(20.0, 5.0));
        assert_eq!(t.bounds(), Size::new(60.0, 15.0));
        assert_eq!(t.scale_factor(), 3.0);
    }
}
