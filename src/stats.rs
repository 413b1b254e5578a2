//! Radius sequences and their summary statistics.

use crate::data::model::Sample;

/// Euclidean radii of a sample sequence, in order.
pub fn radii(samples: &[Sample]) -> Vec<f64> {
    samples.iter().map(Sample::radius).collect()
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (normalised by `n`).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

// ---------------------------------------------------------------------------
// RadiusSeries – one derived radius sequence with its statistics
// ---------------------------------------------------------------------------

/// A radius sequence plus its population mean and standard deviation.
#[derive(Debug, Clone)]
pub struct RadiusSeries {
    pub values: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
}

impl RadiusSeries {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let values = radii(samples);
        let mean = mean(&values);
        let std_dev = std_dev(&values);
        RadiusSeries {
            values,
            mean,
            std_dev,
        }
    }
}

// ---------------------------------------------------------------------------
// Outlier detection
// ---------------------------------------------------------------------------

/// A raw sample whose radius falls outside the mean ± k·stddev window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outlier {
    /// 1-based sample position within the dataset.
    pub index: usize,
    pub sample: Sample,
    pub radius: f64,
}

/// Samples at or beyond `num_std_dev` standard deviations from the mean
/// radius. Boundary values are included.
pub fn outliers(
    samples: &[Sample],
    series: &RadiusSeries,
    num_std_dev: f64,
) -> Vec<Outlier> {
    let lower = series.mean - series.std_dev * num_std_dev;
    let upper = series.mean + series.std_dev * num_std_dev;

    samples
        .iter()
        .zip(&series.values)
        .enumerate()
        .filter(|&(_, (_, &radius))| radius <= lower || radius >= upper)
        .map(|(i, (&sample, &radius))| Outlier {
            index: i + 1,
            sample,
            radius,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_and_std_dev_match_population_formulas() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values), 5.0);
        assert_relative_eq!(std_dev(&values), 2.0);
    }

    #[test]
    fn constant_sequence_has_zero_std_dev() {
        let values = [3.5; 20];
        assert_relative_eq!(mean(&values), 3.5);
        assert_relative_eq!(std_dev(&values), 0.0);
    }

    #[test]
    fn empty_sequence_yields_zeros() {
        assert_relative_eq!(mean(&[]), 0.0);
        assert_relative_eq!(std_dev(&[]), 0.0);
    }

    #[test]
    fn radius_series_over_constant_radius_samples() {
        let samples: Vec<Sample> = (0..8)
            .map(|i| {
                let phi = 2.0 * std::f64::consts::PI * i as f64 / 8.0;
                Sample::new(2.0 * phi.cos(), 2.0 * phi.sin(), 0.0)
            })
            .collect();
        let series = RadiusSeries::from_samples(&samples);
        assert_relative_eq!(series.mean, 2.0, epsilon = 1e-12);
        assert_relative_eq!(series.std_dev, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn flags_samples_outside_two_std_devs() {
        // 20 samples near radius 1, one far outlier at the end.
        let mut samples: Vec<Sample> = (0..20)
            .map(|i| {
                let phi = 2.0 * std::f64::consts::PI * i as f64 / 20.0;
                let r = if i % 2 == 0 { 0.99 } else { 1.01 };
                Sample::new(r * phi.cos(), r * phi.sin(), 0.0)
            })
            .collect();
        samples.push(Sample::new(100.0, 0.0, 0.0));

        let series = RadiusSeries::from_samples(&samples);
        let found = outliers(&samples, &series, 2.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].index, 21);
        assert_relative_eq!(found[0].radius, 100.0);
        assert_eq!(found[0].sample, Sample::new(100.0, 0.0, 0.0));
    }
}
