//! The nine pattern families.
//!
//! Each module owns a typed `*Params` struct (serde defaults match the
//! historical keyword defaults) and its base-pattern math.

mod grid;
mod hex;
mod interlocking;
mod manual;
mod phyllotaxis;
mod random;
mod rhombus;
mod ring;
mod spiral;

pub use grid::GridParams;
pub use hex::HexParams;
pub use interlocking::InterlockingParams;
pub use manual::ManualCircularParams;
pub use phyllotaxis::PhyllotaxisParams;
pub use random::{RadiusSampling, RandomParams};
pub use rhombus::RhombusParams;
pub use ring::RingParams;
pub use spiral::SpiralParams;

#[cfg(test)]
pub(crate) mod testutil {
    use nalgebra::Vector2;

    /// Sorted, distinct radii (to `tol`) of `points`.
    pub fn distinct_radii(points: &[Vector2<f64>], tol: f64) -> Vec<f64> {
        let mut radii: Vec<f64> = points.iter().map(|p| p.norm()).collect();
        radii.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        radii.dedup_by(|a, b| (*a - *b).abs() < tol);
        radii
    }
}
