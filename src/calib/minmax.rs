use super::{Calibration, FitError};
use crate::data::model::Sample;

// ---------------------------------------------------------------------------
// Per-axis extrema
// ---------------------------------------------------------------------------

/// Observed minimum and maximum of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Min/max of each axis over a sequence; `None` for an empty sequence.
pub fn axis_ranges(samples: &[Sample]) -> Option<[AxisRange; 3]> {
    if samples.is_empty() {
        return None;
    }

    let mut ranges = [AxisRange {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    }; 3];
    for s in samples {
        for (range, v) in ranges.iter_mut().zip([s.x, s.y, s.z]) {
            range.min = range.min.min(v);
            range.max = range.max.max(v);
        }
    }
    Some(ranges)
}

// ---------------------------------------------------------------------------
// Min/max estimator
// ---------------------------------------------------------------------------

/// Extrema-based estimator: centre each axis between its extremes, then
/// equalise the three post-offset half-ranges to their common average.
///
/// Assumes the true locus of points is a sphere; kept as the legacy
/// comparison for [`ellipsoid::fit`](super::ellipsoid::fit).
pub fn fit(samples: &[Sample]) -> Result<Calibration, FitError> {
    let ranges = axis_ranges(samples).ok_or(FitError::TooFewSamples(0))?;

    let mut offset = [0.0; 3];
    let mut half_range = [0.0; 3];
    for axis in 0..3 {
        let AxisRange { min, max } = ranges[axis];
        offset[axis] = -((min + max) / 2.0);
        half_range[axis] =
            ((max + offset[axis]).abs() + (min + offset[axis]).abs()) / 2.0;
    }

    let target_radius = (half_range[0] + half_range[1] + half_range[2]) / 3.0;

    let mut scale = [0.0; 3];
    for axis in 0..3 {
        if half_range[axis] == 0.0 {
            return Err(FitError::Degenerate("axis has zero spread"));
        }
        scale[axis] = target_radius / half_range[axis];
    }

    Ok(Calibration { offset, scale })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_axis_points_give_identity() {
        let samples = [
            Sample::new(1.0, 0.0, 0.0),
            Sample::new(-1.0, 0.0, 0.0),
            Sample::new(0.0, 1.0, 0.0),
            Sample::new(0.0, -1.0, 0.0),
            Sample::new(0.0, 0.0, 1.0),
            Sample::new(0.0, 0.0, -1.0),
        ];
        let cal = fit(&samples).unwrap();
        for axis in 0..3 {
            assert_relative_eq!(cal.offset[axis], 0.0);
            assert_relative_eq!(cal.scale[axis], 1.0);
        }
    }

    #[test]
    fn offsets_center_the_extremes_at_origin() {
        let samples = [
            Sample::new(1.0, 12.0, -30.0),
            Sample::new(5.0, 18.0, -10.0),
            Sample::new(3.0, 15.0, -20.0),
        ];
        let cal = fit(&samples).unwrap();
        let ranges = axis_ranges(&samples).unwrap();
        for axis in 0..3 {
            let centered_min = ranges[axis].min + cal.offset[axis];
            let centered_max = ranges[axis].max + cal.offset[axis];
            assert_relative_eq!(centered_min + centered_max, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn scales_equalise_half_ranges() {
        // Half-ranges 2, 4, 8 → common target radius 14/3.
        let samples = [
            Sample::new(2.0, 0.0, 0.0),
            Sample::new(-2.0, 0.0, 0.0),
            Sample::new(0.0, 4.0, 0.0),
            Sample::new(0.0, -4.0, 0.0),
            Sample::new(0.0, 0.0, 8.0),
            Sample::new(0.0, 0.0, -8.0),
        ];
        let cal = fit(&samples).unwrap();
        let target = 14.0 / 3.0;
        assert_relative_eq!(cal.scale[0], target / 2.0);
        assert_relative_eq!(cal.scale[1], target / 4.0);
        assert_relative_eq!(cal.scale[2], target / 8.0);
    }

    #[test]
    fn shifted_sphere_recovers_offset_and_unit_scale() {
        // A unit sphere centred at (10, -5, 2), extremes only.
        let samples = [
            Sample::new(11.0, -5.0, 2.0),
            Sample::new(9.0, -5.0, 2.0),
            Sample::new(10.0, -4.0, 2.0),
            Sample::new(10.0, -6.0, 2.0),
            Sample::new(10.0, -5.0, 3.0),
            Sample::new(10.0, -5.0, 1.0),
        ];
        let cal = fit(&samples).unwrap();
        assert_relative_eq!(cal.offset[0], -10.0);
        assert_relative_eq!(cal.offset[1], 5.0);
        assert_relative_eq!(cal.offset[2], -2.0);
        for axis in 0..3 {
            assert_relative_eq!(cal.scale[axis], 1.0);
        }
    }

    #[test]
    fn zero_axis_spread_is_degenerate() {
        let samples = [
            Sample::new(1.0, 2.0, 5.0),
            Sample::new(-1.0, 3.0, 5.0),
            Sample::new(0.5, 2.5, 5.0),
        ];
        assert!(matches!(fit(&samples), Err(FitError::Degenerate(_))));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(fit(&[]), Err(FitError::TooFewSamples(0))));
        assert!(axis_ranges(&[]).is_none());
    }
}
