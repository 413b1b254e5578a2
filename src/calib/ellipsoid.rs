use nalgebra::{DMatrix, DVector};

use super::{Calibration, FitError};
use crate::data::model::Sample;

/// Singular values below this are treated as zero by the SVD solve.
const SVD_EPS: f64 = 1e-10;

/// Coefficient magnitude below which the quadric cannot be normalised.
const COEFF_EPS: f64 = 1e-12;

/// Least-squares ellipsoid fit.
///
/// Fits the axis-aligned quadric
///
/// ```text
/// x² = a·x + b·y + c·z − d·y² − e·z² + f
/// ```
///
/// by ordinary least squares (design matrix columns `x, y, z, −y², −z², 1`,
/// target `x²`) and converts the coefficients into per-axis hard-iron
/// offsets and soft-iron scales:
///
/// ```text
/// offset = (−a/2, −b/(2d), −c/(2e))
/// A = f + (a/2)² + d·(b/2d)² + e·(c/2e)²,  B = A/d,  C = A/e
/// scale  = (1/√A, 1/√B, 1/√C)
/// ```
///
/// Rank-deficient sample geometry is reported as an error instead of
/// letting NaN/Inf leak into the parameters.
pub fn fit(samples: &[Sample]) -> Result<Calibration, FitError> {
    let n = samples.len();
    if n < 6 {
        return Err(FitError::TooFewSamples(n));
    }

    let mut design = DMatrix::<f64>::zeros(n, 6);
    let mut target = DVector::<f64>::zeros(n);
    for (i, s) in samples.iter().enumerate() {
        design[(i, 0)] = s.x;
        design[(i, 1)] = s.y;
        design[(i, 2)] = s.z;
        design[(i, 3)] = -s.y * s.y;
        design[(i, 4)] = -s.z * s.z;
        design[(i, 5)] = 1.0;
        target[i] = s.x * s.x;
    }

    let coeffs = design
        .svd(true, true)
        .solve(&target, SVD_EPS)
        .map_err(FitError::Solver)?;
    let (a, b, c, d, e, f) = (
        coeffs[0], coeffs[1], coeffs[2], coeffs[3], coeffs[4], coeffs[5],
    );

    if d.abs() < COEFF_EPS || e.abs() < COEFF_EPS {
        return Err(FitError::Degenerate("quadric has a vanishing y² or z² term"));
    }

    let off_x = a / 2.0;
    let off_y = b / (2.0 * d);
    let off_z = c / (2.0 * e);

    // Squared semi-axes of the centred ellipsoid.
    let sq_x = f + off_x * off_x + d * off_y * off_y + e * off_z * off_z;
    let sq_y = sq_x / d;
    let sq_z = sq_x / e;
    if sq_x <= 0.0 || sq_y <= 0.0 || sq_z <= 0.0 {
        return Err(FitError::Degenerate("fitted quadric is not an ellipsoid"));
    }

    Ok(Calibration {
        offset: [-off_x, -off_y, -off_z],
        scale: [1.0 / sq_x.sqrt(), 1.0 / sq_y.sqrt(), 1.0 / sq_z.sqrt()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    /// Noise-free points on an axis-aligned ellipsoid, on a theta/phi grid.
    fn ellipsoid_cloud(center: [f64; 3], radii: [f64; 3]) -> Vec<Sample> {
        let mut points = Vec::new();
        let n_theta = 12;
        let n_phi = 24;
        for i in 1..n_theta {
            let theta = PI * i as f64 / n_theta as f64;
            for j in 0..n_phi {
                let phi = 2.0 * PI * j as f64 / n_phi as f64;
                points.push(Sample::new(
                    center[0] + radii[0] * theta.sin() * phi.cos(),
                    center[1] + radii[1] * theta.sin() * phi.sin(),
                    center[2] + radii[2] * theta.cos(),
                ));
            }
        }
        points.push(Sample::new(center[0], center[1], center[2] + radii[2]));
        points.push(Sample::new(center[0], center[1], center[2] - radii[2]));
        points
    }

    #[test]
    fn recovers_known_center_and_semi_axes() {
        let center = [3.0, -2.0, 1.5];
        let radii = [2.0, 3.0, 1.25];
        let cal = fit(&ellipsoid_cloud(center, radii)).unwrap();

        for axis in 0..3 {
            assert_relative_eq!(cal.offset[axis], -center[axis], epsilon = 1e-6);
            assert_relative_eq!(cal.scale[axis], 1.0 / radii[axis], epsilon = 1e-6);
        }
    }

    #[test]
    fn calibrated_cloud_lands_on_unit_sphere() {
        let cloud = ellipsoid_cloud([12.5, -4.2, 7.9], [52.0, 44.0, 61.0]);
        let cal = fit(&cloud).unwrap();
        for s in cal.apply_all(&cloud) {
            assert_relative_eq!(s.radius(), 1.0, epsilon = 1e-6);
        }
    }

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
            assert_relative_eq!(cal.offset[axis], 0.0, epsilon = 1e-9);
            assert_relative_eq!(cal.scale[axis], 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn coplanar_points_are_degenerate() {
        // All z = 0: the z and z² columns vanish and the system cannot
        // constrain the third axis.
        let mut samples = Vec::new();
        for j in 0..32 {
            let phi = 2.0 * PI * j as f64 / 32.0;
            samples.push(Sample::new(2.0 * phi.cos(), 3.0 * phi.sin(), 0.0));
        }
        assert!(matches!(
            fit(&samples),
            Err(FitError::Degenerate(_) | FitError::Solver(_))
        ));
    }

    #[test]
    fn too_few_samples_is_an_error() {
        let samples = [Sample::new(1.0, 0.0, 0.0); 5];
        assert!(matches!(fit(&samples), Err(FitError::TooFewSamples(5))));
    }
}
