//! Errors raised while building a simulation.

use thiserror::Error;

/// An invalid network, vehicle or generator configuration.
///
/// All of these are detected when the offending object is added to the
/// simulation; stepping the simulation never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("parameter `{name}` has invalid value {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("vehicle path is empty")]
    EmptyPath,

    #[error("segment index {index} is out of range (network has {count} segments)")]
    UnknownSegment { index: usize, count: usize },

    #[error("traffic light position {position} lies outside segment of length {length}")]
    LightOutOfRange { position: f64, length: f64 },

    #[error("segment {0} already has a traffic light")]
    SegmentHasLight(usize),

    #[error("segment geometry has zero length")]
    DegenerateGeometry,

    #[error("generator has no vehicle templates")]
    NoVehicleTemplates,

    #[error("generator template weights are invalid")]
    InvalidWeights,
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Checks that `value` is finite and strictly positive.
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

/// Checks that `value` is finite and not negative.
pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_non_finite() {
        assert!(positive("a_max", f64::NAN).is_err());
        assert!(positive("a_max", f64::INFINITY).is_err());
        assert!(non_negative("s0", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn zero_is_only_non_negative() {
        assert_eq!(
            positive("b_max", 0.0),
            Err(SimError::InvalidParameter {
                name: "b_max",
                value: 0.0
            })
        );
        assert_eq!(non_negative("s0", 0.0), Ok(0.0));
    }
}
