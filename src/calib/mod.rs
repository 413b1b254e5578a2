//! Calibration layer: the shared hard-iron/soft-iron parameter type and the
//! two estimators that produce it.
//!
//! * [`ellipsoid`] – least-squares ellipsoid fit, the reference method.
//! * [`minmax`] – per-axis extrema fit, the cruder legacy comparison.
//!
//! Both are pure functions over a sample sequence; applying the result is
//! `(raw + offset) * scale` per axis and never touches the input.

pub mod ellipsoid;
pub mod minmax;

use thiserror::Error;

use crate::data::model::Sample;

/// Standard gravity, used to express accelerometer output in m/s².
pub const STANDARD_GRAVITY: f64 = 9.80665;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why an estimator could not produce calibration parameters.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("not enough samples to fit ({0} given)")]
    TooFewSamples(usize),

    /// The least-squares solver itself failed.
    #[error("least-squares solve failed: {0}")]
    Solver(&'static str),

    /// The samples do not constrain a proper ellipsoid (e.g. all points
    /// coplanar, or an axis with zero spread).
    #[error("degenerate sample geometry: {0}")]
    Degenerate(&'static str),
}

// ---------------------------------------------------------------------------
// Calibration – per-axis offset and scale
// ---------------------------------------------------------------------------

/// Hard-iron offset and soft-iron scale per axis, applied as
/// `(raw + offset) * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub offset: [f64; 3],
    pub scale: [f64; 3],
}

impl Calibration {
    /// Zero offsets, unit scales.
    pub fn identity() -> Self {
        Calibration {
            offset: [0.0; 3],
            scale: [1.0; 3],
        }
    }

    /// Correct one sample.
    pub fn apply(&self, s: Sample) -> Sample {
        Sample::new(
            (s.x + self.offset[0]) * self.scale[0],
            (s.y + self.offset[1]) * self.scale[1],
            (s.z + self.offset[2]) * self.scale[2],
        )
    }

    /// Correct a whole sequence, leaving the input untouched.
    pub fn apply_all(&self, samples: &[Sample]) -> Vec<Sample> {
        samples.iter().map(|&s| self.apply(s)).collect()
    }

    /// The offset part alone (unit scales), for the intermediate
    /// offset-only radius sequences.
    pub fn offset_only(&self) -> Calibration {
        Calibration {
            offset: self.offset,
            scale: [1.0; 3],
        }
    }

    /// Multiply every scale factor, e.g. by [`STANDARD_GRAVITY`].
    pub fn with_scale_factor(mut self, factor: f64) -> Self {
        for s in &mut self.scale {
            *s *= factor;
        }
        self
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn apply_offsets_then_scales() {
        let cal = Calibration {
            offset: [1.0, -2.0, 0.5],
            scale: [2.0, 0.5, 1.0],
        };
        let out = cal.apply(Sample::new(3.0, 6.0, -0.5));
        assert_relative_eq!(out.x, 8.0);
        assert_relative_eq!(out.y, 2.0);
        assert_relative_eq!(out.z, 0.0);
    }

    #[test]
    fn identity_is_a_no_op() {
        let s = Sample::new(1.25, -3.5, 0.75);
        assert_eq!(Calibration::identity().apply(s), s);
    }

    #[test]
    fn offset_only_drops_scales() {
        let cal = Calibration {
            offset: [1.0, 2.0, 3.0],
            scale: [9.0, 9.0, 9.0],
        };
        let out = cal.offset_only().apply(Sample::new(0.0, 0.0, 0.0));
        assert_eq!(out, Sample::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn with_scale_factor_multiplies_each_axis() {
        let cal = Calibration {
            offset: [0.0; 3],
            scale: [1.0, 2.0, 4.0],
        }
        .with_scale_factor(STANDARD_GRAVITY);
        assert_relative_eq!(cal.scale[0], 9.80665);
        assert_relative_eq!(cal.scale[1], 2.0 * 9.80665);
        assert_relative_eq!(cal.scale[2], 4.0 * 9.80665);
    }
}
