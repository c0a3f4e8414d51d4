use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::layout::{
    lattice_scale, require_positive, BaseLayout, Jitter, LatticeLayout, Layout, LayoutCfg,
    LayoutError, LayoutGenerator, SpacingMode, Stages, TileDims,
};

/// Hand-authored "circular arrangement": six clusters of six tiles, in units of
/// (tile width, tile height). Order and values are fixed.
const CLUSTERS: [[(f64, f64); 6]; 6] = [
    [(-5.5, 0.0), (-4.5, -0.5), (-4.5, 0.5), (-3.5, -1.0), (-3.5, 0.0), (-3.5, 1.0)],
    [(0.5, 0.5), (0.5, 1.5), (1.5, 0.5), (1.5, 1.5), (2.5, 0.5), (2.5, 1.5)],
    [(-0.5, 0.5), (-0.5, 1.5), (-1.5, 0.5), (-1.5, 1.5), (-2.5, 0.5), (-2.5, 1.5)],
    [(0.5, -0.5), (0.5, -1.5), (1.5, -0.5), (1.5, -1.5), (2.5, -0.5), (2.5, -1.5)],
    [(-0.5, -0.5), (-0.5, -1.5), (-1.5, -0.5), (-1.5, -1.5), (-2.5, -0.5), (-2.5, -1.5)],
    [(5.5, 0.0), (4.5, -0.5), (4.5, 0.5), (3.5, -1.0), (3.5, 0.0), (3.5, 1.0)],
];

/// Legacy 36-tile station pattern, scaled per axis by
/// `spacing_x_factor · width` and `spacing_y_factor · height`.
///
/// Under `CenterExponential` the pattern is built with unit factors and then
/// rescaled; the per-axis factors are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualCircularParams {
    pub spacing_mode: SpacingMode,
    pub spacing_x_factor: f64,
    pub spacing_y_factor: f64,
    pub center_exp_scale_factor: f64,
    pub jitter: Jitter,
    pub center_layout: bool,
}

impl Default for ManualCircularParams {
    fn default() -> Self {
        Self {
            spacing_mode: SpacingMode::Linear,
            spacing_x_factor: 1.0,
            spacing_y_factor: 1.0,
            center_exp_scale_factor: 1.1,
            jitter: Jitter::default(),
            center_layout: true,
        }
    }
}

impl ManualCircularParams {
    pub const TILE_COUNT: usize = 36;
}

impl LayoutGenerator for ManualCircularParams {
    const SHAPE: &'static str = "manual_circular";

    fn validate(&self) -> Result<(), LayoutError> {
        require_positive(Self::SHAPE, "spacing_x_factor", self.spacing_x_factor)?;
        require_positive(Self::SHAPE, "spacing_y_factor", self.spacing_y_factor)?;
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

impl LatticeLayout for ManualCircularParams {
    fn base_layout(&self, tile: &TileDims, _cfg: &LayoutCfg) -> BaseLayout {
        let (fx, fy) = match self.spacing_mode {
            SpacingMode::CenterExponential => (1.0, 1.0),
            _ => (self.spacing_x_factor, self.spacing_y_factor),
        };
        let lx = tile.width_m * fx;
        let ly = tile.height_m * fy;
        let points = CLUSTERS
            .iter()
            .flatten()
            .map(|&(ux, uy)| Vector2::new(ux * lx, uy * ly))
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
    fn thirty_six_symmetric_points() {
        let mut rng = StdRng::seed_from_u64(0);
        let out = ManualCircularParams::default()
            .generate(&TileDims::BINGO, &LayoutCfg::default(), &mut rng)
            .unwrap();
        assert_eq!(out.len(), ManualCircularParams::TILE_COUNT);
        // Pattern is point symmetric, so centering is a no-op.
        assert!((out.points[0] - Vector2::new(-1.925, 0.0)).norm() < 1e-9);
        assert!(out.min_pairwise_distance().unwrap() > 0.0);
    }

    #[test]
    fn axis_factors_scale_independently() {
        let tile = TileDims::new(1.0, 2.0);
        let params = ManualCircularParams {
            spacing_x_factor: 3.0,
            spacing_y_factor: 0.5,
            ..ManualCircularParams::default()
        };
        let base = params.base_layout(&tile, &LayoutCfg::default());
        assert_eq!(base.points[1], Vector2::new(-13.5, -0.5));
    }

    #[test]
    fn center_exponential_ignores_axis_factors() {
        let tile = TileDims::new(1.0, 2.0);
        let params = ManualCircularParams {
            spacing_mode: SpacingMode::CenterExponential,
            spacing_x_factor: 3.0,
            ..ManualCircularParams::default()
        };
        let base = params.base_layout(&tile, &LayoutCfg::default());
        assert_eq!(base.points[0], Vector2::new(-5.5, 0.0));
    }
}
