use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::layout::{
    lattice_scale, require_count, require_positive, require_total, BaseLayout, Jitter,
    LatticeLayout, Layout, LayoutCfg, LayoutError, LayoutGenerator, SpacingMode, Stages, TileDims,
};

/// Golden angle `π(3 − √5)` in radians.
pub const GOLDEN_ANGLE: f64 = PI * (3.0 - 2.236_067_977_499_79);

/// Sunflower (Vogel) pattern.
///
/// Point `i` sits at radius `scale · √(i + center_offset)` and angle
/// `i · GOLDEN_ANGLE`, with `scale = scale_factor · diagonal` and
/// `center_offset = center_offset_factor · diagonal`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhyllotaxisParams {
    pub num_tiles: usize,
    pub spacing_mode: SpacingMode,
    pub scale_factor: f64,
    pub center_offset_factor: f64,
    pub center_exp_scale_factor: f64,
    pub jitter: Jitter,
    pub center_layout: bool,
}

impl Default for PhyllotaxisParams {
    fn default() -> Self {
        Self {
            num_tiles: 36,
            spacing_mode: SpacingMode::Linear,
            scale_factor: 0.5,
            center_offset_factor: 0.1,
            center_exp_scale_factor: 1.1,
            jitter: Jitter::default(),
            center_layout: true,
        }
    }
}

impl PhyllotaxisParams {
    pub fn new(num_tiles: usize) -> Self {
        Self {
            num_tiles,
            ..Self::default()
        }
    }
}

impl LayoutGenerator for PhyllotaxisParams {
    const SHAPE: &'static str = "phyllotaxis";

    fn validate(&self) -> Result<(), LayoutError> {
        require_count(Self::SHAPE, "num_tiles", self.num_tiles)?;
        require_total(Self::SHAPE, Some(self.num_tiles))?;
        require_positive(Self::SHAPE, "scale_factor", self.scale_factor)?;
        if !(self.center_offset_factor.is_finite() && self.center_offset_factor >= 0.0) {
            return Err(LayoutError::invalid(
                Self::SHAPE,
                "center_offset_factor must be finite and >= 0",
            ));
        }
        lattice_scale(Self::SHAPE, self.spacing_mode, self.center_exp_scale_factor)?;
        Ok(())
    }

    fn generate<R: Rng + ?Sized>(
        &self,
        tile: &TileDims,
        cfg: &LayoutCfg,
        rng: &mut R,
    ) -> Result<Layout, LayoutError> {
        self.generate_lattice(tile, cfg, rng)
    }
}

impl LatticeLayout for PhyllotaxisParams {
    fn base_layout(&self, tile: &TileDims, _cfg: &LayoutCfg) -> BaseLayout {
        let diag = tile.diagonal();
        let scale = self.scale_factor * diag;
        let offset = self.center_offset_factor * diag;
        let points = (0..self.num_tiles)
            .map(|i| {
                let r = scale * (i as f64 + offset).sqrt();
                let theta = i as f64 * GOLDEN_ANGLE;
                Vector2::new(r * theta.cos(), r * theta.sin())
            })
            .collect();
        BaseLayout {
            center: None,
            points,
        }
    }

    fn stages(&self) -> Stages {
        Stages {
            center_exp_scale: lattice_scale(
                Self::SHAPE,
                self.spacing_mode,
                self.center_exp_scale_factor,
            )
            .ok()
            .flatten(),
            jitter: self.jitter,
            center_layout: self.center_layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn golden_angle_value() {
        assert!((GOLDEN_ANGLE - PI * (3.0 - 5f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn radii_grow_with_square_root_of_index() {
        let tile = TileDims::new(3.0, 4.0);
        let params = PhyllotaxisParams {
            center_offset_factor: 0.0,
            scale_factor: 1.0,
            ..PhyllotaxisParams::new(10)
        };
        let base = params.base_layout(&tile, &LayoutCfg::default());
        assert_eq!(base.points[0], Vector2::new(0.0, 0.0));
        for (i, p) in base.points.iter().enumerate() {
            assert!((p.norm() - 5.0 * (i as f64).sqrt()).abs() < 1e-9);
        }
    }

    #[test]
    fn generates_requested_count() {
        let mut rng = StdRng::seed_from_u64(0);
        let out = PhyllotaxisParams::new(50)
            .generate(&TileDims::BINGO, &LayoutCfg::default(), &mut rng)
            .unwrap();
        assert_eq!(out.len(), 50);
        assert!(out.centroid().unwrap().norm() < 1e-6);
    }

    #[test]
    fn negative_offset_rejected() {
        let params = PhyllotaxisParams {
            center_offset_factor: -0.5,
            ..PhyllotaxisParams::default()
        };
        assert!(params.validate().is_err());
    }
}
