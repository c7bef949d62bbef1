use super::curve::ParametricCurve2d;
use super::Point2d;
use crate::util::Interval;
use cgmath::prelude::*;

/// A quadratic bezier curve
#[derive(Copy, Clone, Debug)]
pub struct QuadraticBezier2d {
    points: [Point2d; 3],
}

impl QuadraticBezier2d {
    pub const fn new(points: &[Point2d; 3]) -> Self {
        Self { points: *points }
    }
}

impl ParametricCurve2d for QuadraticBezier2d {
    fn sample(&self, t: f64) -> Point2d {
        let t1 = 1.0 - t;
        Point2d::from_vec(
            t1 * t1 * self.points[0].to_vec()
                + 2.0 * t1 * t * self.points[1].to_vec()
                + t * t * self.points[2].to_vec(),
        )
    }

    fn bounds(&self) -> Interval<f64> {
        Interval { min: 0.0, max: 1.0 }
    }
}

/// A cubic bezier curve
#[derive(Copy, Clone, Debug)]
pub struct CubicBezier2d {
    points: [Point2d; 4],
}

impl CubicBezier2d {
    pub const fn new(points: &[Point2d; 4]) -> Self {
        Self { points: *points }
    }
}

impl ParametricCurve2d for CubicBezier2d {
    fn sample(&self, t: f64) -> Point2d {
        let t1 = 1.0 - t;
        Point2d::from_vec(
            t1 * t1 * t1 * self.points[0].to_vec()
                + 3.0 * t1 * t1 * t * self.points[1].to_vec()
                + 3.0 * t1 * t * t * self.points[2].to_vec()
                + t * t * t * self.points[3].to_vec(),
        )
    }

    fn bounds(&self) -> Interval<f64> {
        Interval { min: 0.0, max: 1.0 }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn endpoints_are_interpolated() {
        let quad = QuadraticBezier2d::new(&[
            Point2d::new(0.0, 0.0),
            Point2d::new(50.0, 50.0),
            Point2d::new(100.0, 0.0),
        ]);
        assert_approx_eq!(quad.sample(1.0).x, 100.0);
        assert_approx_eq!(quad.sample(0.5).y, 25.0);

        let cubic = CubicBezier2d::new(&[
            Point2d::new(0.0, 0.0),
            Point2d::new(0.0, 10.0),
            Point2d::new(10.0, 10.0),
            Point2d::new(10.0, 0.0),
        ]);
        assert_approx_eq!(cubic.sample(0.0).x, 0.0);
        assert_approx_eq!(cubic.sample(1.0).x, 10.0);
        assert_approx_eq!(cubic.sample(0.5).x, 5.0);
        assert_approx_eq!(cubic.sample(0.5).y, 7.5);
    }
}
