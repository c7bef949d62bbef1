//! Geometry of the road network.
//!
//! The simulation itself only consumes the length of each segment; the
//! curves here exist to compute that length and to map a distance along a
//! segment back to world coordinates.

use cgmath::{Point2, Vector2};
pub use bezier::{CubicBezier2d, QuadraticBezier2d};
pub use curve::{LineSegment2d, ParametricCurve2d};
pub use polyline::{Polyline, CURVE_RESOLUTION};

mod bezier;
mod curve;
mod polyline;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;
