//! WGS84 inverse geodesic problem.
//!
//! Computes the forward azimuth and ellipsoidal distance between two
//! geographic points using Vincenty's inverse formulae. Accurate to
//! sub-millimetre on the WGS84 ellipsoid for non-antipodal pairs, which
//! covers every pair of adjacent grid cells by a wide margin.

use tracing::warn;

use crate::error::Result;
use crate::geo::GeoPoint;

/// WGS84 semi-major axis in metres.
const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis in metres.
const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// Convergence threshold for the lambda iteration (radians).
const CONVERGENCE: f64 = 1e-12;
/// Iteration cap for nearly antipodal pairs.
const MAX_ITERATIONS: usize = 100;

/// Solution of the inverse geodesic problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Forward {
    /// Forward azimuth at the origin, degrees clockwise from true north
    /// in [0, 360).
    pub azimuth_deg: f64,
    /// Geodesic distance in metres.
    pub distance_m: f64,
}

/// Forward azimuth and distance from `from` to `to`.
///
/// Fails fast with `InvalidCoordinate` on NaN or out-of-range inputs.
/// Coincident points yield azimuth 0 and distance 0.
pub fn forward(from: GeoPoint, to: GeoPoint) -> Result<Forward> {
    from.validate()?;
    to.validate()?;
    Ok(inverse(from, to))
}

/// Forward azimuth and distance from one origin to many destinations.
///
/// Validates the origin once and each destination before solving, so a
/// single malformed destination rejects the whole batch.
pub fn forward_batch(from: GeoPoint, to: &[GeoPoint]) -> Result<Vec<Forward>> {
    from.validate()?;
    for point in to {
        point.validate()?;
    }
    Ok(to.iter().map(|&point| inverse(from, point)).collect())
}

/// Vincenty's inverse formulae on the WGS84 ellipsoid.
fn inverse(from: GeoPoint, to: GeoPoint) -> Forward {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let l = (to.lon - from.lon).to_radians();

    // Reduced latitudes
    let u1 = ((1.0 - WGS84_F) * lat1.tan()).atan();
    let u2 = ((1.0 - WGS84_F) * lat2.tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut iterations = 0;

    let (sin_lambda, cos_lambda, sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m) = loop {
        let sin_lambda = lambda.sin();
        let cos_lambda = lambda.cos();

        let cross = cos_u2 * sin_lambda;
        let along = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        let sin_sigma = (cross * cross + along * along).sqrt();
        if sin_sigma == 0.0 {
            // Coincident points
            return Forward {
                azimuth_deg: 0.0,
                distance_m: 0.0,
            };
        }

        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // cos_sq_alpha == 0 means both points sit on the equator
        let cos_2sigma_m = if cos_sq_alpha.abs() > f64::EPSILON {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };

        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        iterations += 1;
        if (lambda - previous).abs() < CONVERGENCE || iterations >= MAX_ITERATIONS {
            if iterations >= MAX_ITERATIONS {
                warn!(
                    "geodesic iteration did not converge (nearly antipodal points {} and {})",
                    from, to
                );
            }
            break (
                sin_lambda,
                cos_lambda,
                sin_sigma,
                cos_sigma,
                sigma,
                cos_sq_alpha,
                cos_2sigma_m,
            );
        }
    };

    let u_sq = cos_sq_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
    let coef_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let coef_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

    let delta_sigma = coef_b
        * sin_sigma
        * (cos_2sigma_m
            + coef_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                    - coef_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

    let distance_m = WGS84_B * coef_a * (sigma - delta_sigma);
    let azimuth = (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);

    Forward {
        azimuth_deg: azimuth.to_degrees().rem_euclid(360.0),
        distance_m,
    }
}
