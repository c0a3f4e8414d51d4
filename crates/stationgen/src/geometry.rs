//! Geometry primitives shared by every layout generator.
//!
//! - `tile_diagonal`: the universal length unit for dimensionless factors.
//! - `angle_to_radians`: degree/radian normalization.
//! - `center_on_origin`, `round_coords`: final pipeline stages.
//! - `apply_center_exponential_scaling`: radial exponential rescale.

use nalgebra::Vector2;

use crate::layout::AngleMode;

/// Diagonal of a `width × height` tile footprint.
#[inline]
pub fn tile_diagonal(width: f64, height: f64) -> f64 {
    width.hypot(height)
}

/// Angle in radians; degrees are converted, radians pass through.
#[inline]
pub fn angle_to_radians(angle: f64, mode: AngleMode) -> f64 {
    match mode {
        AngleMode::Degree => angle.to_radians(),
        AngleMode::Radian => angle,
    }
}

/// Round to `precision` decimal places (half away from zero).
#[inline]
pub fn round_to(v: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    let r = (v * scale).round() / scale;
    // normalize -0.0
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// Round both components of every point.
pub fn round_coords(points: &[Vector2<f64>], precision: u32) -> Vec<Vector2<f64>> {
    points
        .iter()
        .map(|p| Vector2::new(round_to(p.x, precision), round_to(p.y, precision)))
        .collect()
}

/// Translate so the centroid of `points` is the origin. Empty input is returned as is.
pub fn center_on_origin(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    if points.is_empty() {
        return Vec::new();
    }
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p);
    let centroid = sum / points.len() as f64;
    if !(centroid.x.is_finite() && centroid.y.is_finite()) {
        return points.to_vec();
    }
    points.iter().map(|p| p - centroid).collect()
}

/// Rescale every point along its own direction by `factor^(d / d_ref)`.
///
/// `d` is the distance to the origin and `d_ref` the mean of all distances above
/// `origin_eps`. Points within `origin_eps` of the origin are left in place and do
/// not contribute to `d_ref`. Identity when `points` is empty, `factor <= 0` or
/// `factor == 1`.
pub fn apply_center_exponential_scaling(
    points: &[Vector2<f64>],
    factor: f64,
    origin_eps: f64,
) -> Vec<Vector2<f64>> {
    if points.is_empty() || !(factor > 0.0) || factor == 1.0 {
        return points.to_vec();
    }
    let distances: Vec<f64> = points.iter().map(|p| p.norm()).collect();
    let (sum, count) = distances
        .iter()
        .filter(|d| **d > origin_eps)
        .fold((0.0, 0usize), |(s, n), d| (s + d, n + 1));
    if count == 0 {
        return points.to_vec();
    }
    let mut d_ref = sum / count as f64;
    if d_ref < origin_eps {
        d_ref = 1.0;
    }
    points
        .iter()
        .zip(distances)
        .map(|(p, d)| {
            if d < origin_eps {
                *p
            } else {
                p * factor.powf(d / d_ref)
            }
        })
        .collect()
}
