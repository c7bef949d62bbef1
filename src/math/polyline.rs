use super::curve::ParametricCurve2d;
use super::Point2d;
use crate::error::{Result, SimError};
use crate::util::Interval;
use cgmath::prelude::*;

/// The number of straight pieces a curve is divided into.
pub const CURVE_RESOLUTION: usize = 50;

/// An arc-length parameterised chain of straight lines.
#[derive(Clone, Debug)]
pub struct Polyline {
    points: Vec<Point2d>,
    /// Distance along the polyline to each point, starting at zero.
    dists: Vec<f64>,
    length: f64,
}

impl Polyline {
    /// Creates a polyline through the given points.
    pub fn new(points: &[Point2d]) -> Result<Self> {
        let mut dists = Vec::with_capacity(points.len());
        let mut length = 0.0;
        for (idx, point) in points.iter().enumerate() {
            if idx > 0 {
                length += points[idx - 1].distance(*point);
            }
            dists.push(length);
        }

        if points.len() < 2 || !length.is_finite() || length <= 0.0 {
            return Err(SimError::DegenerateGeometry);
        }

        Ok(Self {
            points: points.to_vec(),
            dists,
            length,
        })
    }

    /// Approximates a parametric curve with [CURVE_RESOLUTION] straight pieces.
    pub fn from_curve(curve: &impl ParametricCurve2d) -> Result<Self> {
        let bounds = curve.bounds();
        let points = (0..=CURVE_RESOLUTION)
            .map(|i| curve.sample(bounds.lerp(i as f64 / CURVE_RESOLUTION as f64)))
            .collect::<Vec<_>>();
        Self::new(&points)
    }

    /// The length of the polyline in m.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The world coordinates of the point `dist` metres along the polyline.
    /// Distances outside the polyline are clamped to its ends.
    pub fn point_at(&self, dist: f64) -> Point2d {
        let dist = Interval::new(0.0, self.length).clamp(dist);
        let idx = self.dists.partition_point(|d| *d < dist);
        if idx == 0 {
            return self.points[0];
        }

        let (p0, p1) = (self.points[idx - 1], self.points[idx]);
        let span = self.dists[idx] - self.dists[idx - 1];
        if span <= 0.0 {
            return p1;
        }
        p0 + (p1 - p0) * ((dist - self.dists[idx - 1]) / span)
    }
}
