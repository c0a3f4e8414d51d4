use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::layout::{
    capacity_hint, lattice_scale, require_count, require_positive, require_total, BaseLayout,
    Jitter, LatticeLayout, Layout, LayoutCfg, LayoutError, LayoutGenerator, SpacingMode, Stages,
    TileDims,
};

/// Rectangular `cols × rows` grid, spacing `factor * width` / `factor * height`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    pub num_cols: usize,
    pub num_rows: usize,
    pub spacing_mode: SpacingMode,
    pub spacing_x_factor: f64,
    pub spacing_y_factor: f64,
    pub center_exp_scale_factor: f64,
    pub jitter: Jitter,
    pub center_layout: bool,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            num_cols: 6,
            num_rows: 6,
            spacing_mode: SpacingMode::Linear,
            spacing_x_factor: 1.0,
            spacing_y_factor: 1.0,
            center_exp_scale_factor: 1.1,
            jitter: Jitter::default(),
            center_layout: true,
        }
    }
}

impl GridParams {
    pub fn new(num_cols: usize, num_rows: usize) -> Self {
        Self {
            num_cols,
            num_rows,
            ..Self::default()
        }
    }
}

impl LayoutGenerator for GridParams {
    const SHAPE: &'static str = "grid";

    fn validate(&self) -> Result<(), LayoutError> {
        require_count(Self::SHAPE, "num_cols", self.num_cols)?;
        require_count(Self::SHAPE, "num_rows", self.num_rows)?;
        require_total(Self::SHAPE, self.num_cols.checked_mul(self.num_rows))?;
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

impl LatticeLayout for GridParams {
    fn base_layout(&self, tile: &TileDims, _cfg: &LayoutCfg) -> BaseLayout {
        let sx = tile.width_m * self.spacing_x_factor;
        let sy = tile.height_m * self.spacing_y_factor;
        let half_c = (self.num_cols as f64 - 1.0) / 2.0;
        let half_r = (self.num_rows as f64 - 1.0) / 2.0;
        let mut points =
            Vec::with_capacity(capacity_hint(self.num_cols.checked_mul(self.num_rows)));
        for i in 0..self.num_cols {
            for j in 0..self.num_rows {
                points.push(Vector2::new(
                    (i as f64 - half_c) * sx,
                    (j as f64 - half_r) * sy,
                ));
            }
        }
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
