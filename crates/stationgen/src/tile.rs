//! Antenna positions inside a single tile.
//!
//! A tile carries `centers_x × centers_y` sub-group centers on a regular grid;
//! each sub-group is a diamond of four antennas at N, E, S and W offsets.
//! The default reproduces the 64-element BINGO tile.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::geometry::center_on_origin;
use crate::layout::LayoutError;

/// Antennas per diamond sub-group.
pub const ANTENNAS_PER_SUBGROUP: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileAntennaCfg {
    /// Sub-group center spacing along x (m).
    pub center_spacing_x_m: f64,
    /// Sub-group center spacing along y (m).
    pub center_spacing_y_m: f64,
    pub centers_x: usize,
    pub centers_y: usize,
    /// Distance of each antenna from its sub-group center (m).
    pub diamond_offset_m: f64,
}

impl Default for TileAntennaCfg {
    fn default() -> Self {
        Self {
            center_spacing_x_m: 0.176_069_588_5,
            center_spacing_y_m: 0.167_584_307_1,
            centers_x: 2,
            centers_y: 8,
            diamond_offset_m: 0.05,
        }
    }
}

impl TileAntennaCfg {
    pub fn antenna_count(&self) -> usize {
        self.centers_x * self.centers_y * ANTENNAS_PER_SUBGROUP
    }

    fn validate(&self) -> Result<(), LayoutError> {
        let ok = self.centers_x > 0
            && self.centers_y > 0
            && self.diamond_offset_m.is_finite()
            && self.diamond_offset_m > 0.0
            && self.center_spacing_x_m.is_finite()
            && self.center_spacing_y_m.is_finite();
        if ok {
            Ok(())
        } else {
            Err(LayoutError::invalid(
                "tile",
                "sub-group counts and diamond offset must be > 0, spacings finite",
            ))
        }
    }
}

/// Antenna offsets relative to the tile center, x-major then y, N/E/S/W per
/// sub-group. The result is re-centered on its centroid.
pub fn antenna_layout(cfg: &TileAntennaCfg) -> Result<Vec<Vector2<f64>>, LayoutError> {
    cfg.validate()?;
    let d = cfg.diamond_offset_m;
    let diamond = [
        Vector2::new(0.0, d),
        Vector2::new(d, 0.0),
        Vector2::new(0.0, -d),
        Vector2::new(-d, 0.0),
    ];
    let mid_x = (cfg.centers_x - 1) as f64 / 2.0;
    let mid_y = (cfg.centers_y - 1) as f64 / 2.0;
    let mut out = Vec::with_capacity(cfg.antenna_count());
    for i in 0..cfg.centers_x {
        let cx = (i as f64 - mid_x) * cfg.center_spacing_x_m;
        for j in 0..cfg.centers_y {
            let cy = (j as f64 - mid_y) * cfg.center_spacing_y_m;
            let c = Vector2::new(cx, cy);
            out.extend(diamond.iter().map(|o| c + o));
        }
    }
    tracing::debug!(antennas = out.len(), "tile antenna layout");
    Ok(center_on_origin(&out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tile_has_64_centered_antennas() {
        let pts = antenna_layout(&TileAntennaCfg::default()).unwrap();
        assert_eq!(pts.len(), 64);
        let c = pts.iter().sum::<Vector2<f64>>() / pts.len() as f64;
        assert!(c.norm() < 1e-12);
    }

    #[test]
    fn first_diamond_is_north_east_south_west() {
        let cfg = TileAntennaCfg::default();
        let pts = antenna_layout(&cfg).unwrap();
        let c = Vector2::new(-0.5 * cfg.center_spacing_x_m, -3.5 * cfg.center_spacing_y_m);
        let expect = [
            c + Vector2::new(0.0, 0.05),
            c + Vector2::new(0.05, 0.0),
            c + Vector2::new(0.0, -0.05),
            c + Vector2::new(-0.05, 0.0),
        ];
        for (p, e) in pts.iter().zip(expect.iter()) {
            assert!((p - e).norm() < 1e-12);
        }
    }

    #[test]
    fn extent_matches_grid() {
        let cfg = TileAntennaCfg::default();
        let pts = antenna_layout(&cfg).unwrap();
        let max_x = pts.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        let max_y = pts.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        assert!((max_x - (0.5 * cfg.center_spacing_x_m + 0.05)).abs() < 1e-12);
        assert!((max_y - (3.5 * cfg.center_spacing_y_m + 0.05)).abs() < 1e-12);
    }

    #[test]
    fn invalid_cfg_is_rejected() {
        for cfg in [
            TileAntennaCfg {
                centers_x: 0,
                ..TileAntennaCfg::default()
            },
            TileAntennaCfg {
                diamond_offset_m: 0.0,
                ..TileAntennaCfg::default()
            },
        ] {
            assert!(matches!(
                antenna_layout(&cfg),
                Err(LayoutError::InvalidParams { .. })
            ));
        }
    }
}
