use super::Point2d;
use crate::util::Interval;
use cgmath::prelude::*;

/// A parametric curve in 2D space.
pub trait ParametricCurve2d {
    /// Samples the parametric curve.
    fn sample(&self, t: f64) -> Point2d;

    /// Returns the minimum and maximum t-values that define the bounds of the curve.
    fn bounds(&self) -> Interval<f64>;
}

impl<T: ParametricCurve2d + ?Sized> ParametricCurve2d for &T {
    fn sample(&self, t: f64) -> Point2d {
        (**self).sample(t)
    }

    fn bounds(&self) -> Interval<f64> {
        (**self).bounds()
    }
}

/// A straight line between two points.
#[derive(Copy, Clone, Debug)]
pub struct LineSegment2d {
    start: Point2d,
    end: Point2d,
}

impl LineSegment2d {
    pub const fn from_ends(start: Point2d, end: Point2d) -> Self {
        Self { start, end }
    }
}

impl ParametricCurve2d for LineSegment2d {
    fn sample(&self, t: f64) -> Point2d {
        Point2d::from_vec(self.start.to_vec().lerp(self.end.to_vec(), t))
    }

    fn bounds(&self) -> Interval<f64> {
        Interval::new(0.0, 1.0)
    }
}
