//! Per-dataset pipeline: fit both estimators, apply them, derive the radius
//! sequences and their statistics.

use std::path::Path;

use anyhow::{Context, Result};

use crate::calib::minmax::AxisRange;
use crate::calib::{self, ellipsoid, minmax, Calibration, FitError};
use crate::data::loader;
use crate::data::model::{Dataset, Sample};
use crate::stats::{self, Outlier, RadiusSeries};

/// Radius window (in standard deviations) outside which a raw sample is
/// reported as an outlier.
pub const OUTLIER_STD_DEVS: f64 = 2.0;

// ---------------------------------------------------------------------------
// Sensor kind
// ---------------------------------------------------------------------------

/// How the fitted scale factors are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    /// Magnetometer: scales normalise the field locus to unit radius.
    Magnetometer,
    /// Accelerometer: the ellipsoid-fit scales are additionally multiplied
    /// by standard gravity so calibrated output is in m/s².
    Accelerometer,
}

impl SensorKind {
    /// Key prefix used in calibration files.
    pub fn cal_prefix(self) -> &'static str {
        match self {
            SensorKind::Magnetometer => "magn",
            SensorKind::Accelerometer => "accel",
        }
    }
}

// ---------------------------------------------------------------------------
// DatasetAnalysis – everything derived from one dataset
// ---------------------------------------------------------------------------

/// Both calibrations, the transformed point clouds, and the five radius
/// sequences derived from one dataset. The raw samples stay untouched so
/// raw and calibrated views can be compared side by side.
#[derive(Debug, Clone)]
pub struct DatasetAnalysis {
    pub dataset: Dataset,
    pub axis_ranges: [AxisRange; 3],

    pub ellipsoid: Calibration,
    pub min_max: Calibration,

    pub ellipsoid_points: Vec<Sample>,
    pub min_max_points: Vec<Sample>,

    pub raw_radius: RadiusSeries,
    pub ellipsoid_offset_radius: RadiusSeries,
    pub ellipsoid_radius: RadiusSeries,
    pub min_max_offset_radius: RadiusSeries,
    pub min_max_radius: RadiusSeries,

    /// Raw samples outside mean ± [`OUTLIER_STD_DEVS`]·stddev of the raw
    /// radius.
    pub outliers: Vec<Outlier>,
}

/// Run the full pipeline over one dataset.
pub fn analyze(dataset: Dataset, kind: SensorKind) -> Result<DatasetAnalysis, FitError> {
    let samples = &dataset.samples;

    let axis_ranges =
        minmax::axis_ranges(samples).ok_or(FitError::TooFewSamples(0))?;

    let mut ellipsoid_cal = ellipsoid::fit(samples)?;
    if kind == SensorKind::Accelerometer {
        ellipsoid_cal = ellipsoid_cal.with_scale_factor(calib::STANDARD_GRAVITY);
    }
    let min_max_cal = minmax::fit(samples)?;

    let ellipsoid_points = ellipsoid_cal.apply_all(samples);
    let min_max_points = min_max_cal.apply_all(samples);

    let raw_radius = RadiusSeries::from_samples(samples);
    let ellipsoid_offset_radius =
        RadiusSeries::from_samples(&ellipsoid_cal.offset_only().apply_all(samples));
    let ellipsoid_radius = RadiusSeries::from_samples(&ellipsoid_points);
    let min_max_offset_radius =
        RadiusSeries::from_samples(&min_max_cal.offset_only().apply_all(samples));
    let min_max_radius = RadiusSeries::from_samples(&min_max_points);

    let outliers = stats::outliers(samples, &raw_radius, OUTLIER_STD_DEVS);

    Ok(DatasetAnalysis {
        dataset,
        axis_ranges,
        ellipsoid: ellipsoid_cal,
        min_max: min_max_cal,
        ellipsoid_points,
        min_max_points,
        raw_radius,
        ellipsoid_offset_radius,
        ellipsoid_radius,
        min_max_offset_radius,
        min_max_radius,
        outliers,
    })
}

/// Load one dump file and run the pipeline on it.
pub fn load_and_analyze(path: &Path, kind: SensorKind) -> Result<DatasetAnalysis> {
    let dataset = loader::load_file(path)?;
    let analysis = analyze(dataset, kind)
        .with_context(|| format!("calibrating {}", path.display()))?;
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    /// A distorted spherical response: unit directions scaled and shifted.
    fn distorted_cloud(center: [f64; 3], radii: [f64; 3]) -> Dataset {
        let mut samples = Vec::new();
        for i in 1..10 {
            let theta = PI * i as f64 / 10.0;
            for j in 0..20 {
                let phi = 2.0 * PI * j as f64 / 20.0;
                samples.push(Sample::new(
                    center[0] + radii[0] * theta.sin() * phi.cos(),
                    center[1] + radii[1] * theta.sin() * phi.sin(),
                    center[2] + radii[2] * theta.cos(),
                ));
            }
        }
        Dataset {
            name: "Synthetic".to_string(),
            samples,
        }
    }

    #[test]
    fn pipeline_produces_parallel_sequences() {
        let dataset = distorted_cloud([5.0, -3.0, 2.0], [30.0, 25.0, 40.0]);
        let n = dataset.len();
        let a = analyze(dataset, SensorKind::Magnetometer).unwrap();

        assert_eq!(a.ellipsoid_points.len(), n);
        assert_eq!(a.min_max_points.len(), n);
        for series in [
            &a.raw_radius,
            &a.ellipsoid_offset_radius,
            &a.ellipsoid_radius,
            &a.min_max_offset_radius,
            &a.min_max_radius,
        ] {
            assert_eq!(series.values.len(), n);
        }
    }

    #[test]
    fn ellipsoid_calibration_normalises_the_cloud() {
        let dataset = distorted_cloud([5.0, -3.0, 2.0], [30.0, 25.0, 40.0]);
        let a = analyze(dataset, SensorKind::Magnetometer).unwrap();

        assert_relative_eq!(a.ellipsoid_radius.mean, 1.0, epsilon = 1e-6);
        assert_relative_eq!(a.ellipsoid_radius.std_dev, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn accelerometer_mode_scales_to_gravity() {
        let dataset = distorted_cloud([0.2, -0.1, 0.3], [1.0, 1.1, 0.9]);
        let a = analyze(dataset, SensorKind::Accelerometer).unwrap();

        // Calibrated radius sits at g instead of 1.
        assert_relative_eq!(a.ellipsoid_radius.mean, calib::STANDARD_GRAVITY, epsilon = 1e-5);
        // The min/max estimator is left in sensor units.
        assert!(a.min_max_radius.mean < 2.0);
    }

    #[test]
    fn raw_samples_are_not_mutated() {
        let dataset = distorted_cloud([5.0, -3.0, 2.0], [30.0, 25.0, 40.0]);
        let original = dataset.samples.clone();
        let a = analyze(dataset, SensorKind::Magnetometer).unwrap();
        assert_eq!(a.dataset.samples, original);
    }
}
