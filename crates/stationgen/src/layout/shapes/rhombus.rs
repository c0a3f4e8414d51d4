use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::round_to;
use crate::layout::pipeline::push_unique;
use crate::layout::{
    capacity_hint, lattice_scale, require_count, require_positive, require_total, BaseLayout,
    Jitter, LatticeLayout, Layout, LayoutCfg, LayoutError, LayoutGenerator, SeenSet, SpacingMode,
    Stages, TileDims,
};

/// Rhombus (hexagon-like diamond) built from a triangular half.
///
/// Row `i` (0 = equator) holds `num_rows_half - i` points spaced
/// `side · h_compress` apart and centered on x = 0, at
/// `y = i · side · √3/2 · v_compress`; rows above the equator are mirrored below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RhombusParams {
    pub num_rows_half: usize,
    pub spacing_mode: SpacingMode,
    pub side_length_factor: f64,
    pub h_compress_factor: f64,
    pub v_compress_factor: f64,
    pub center_exp_scale_factor: f64,
    pub jitter: Jitter,
    pub center_layout: bool,
}

impl Default for RhombusParams {
    fn default() -> Self {
        Self {
            num_rows_half: 6,
            spacing_mode: SpacingMode::Linear,
            side_length_factor: 0.65,
            h_compress_factor: 1.0,
            v_compress_factor: 1.0,
            center_exp_scale_factor: 1.1,
            jitter: Jitter::default(),
            center_layout: true,
        }
    }
}

impl RhombusParams {
    pub fn new(num_rows_half: usize) -> Self {
        Self {
            num_rows_half,
            ..Self::default()
        }
    }

    /// `n + 2·Σ_{i=1}^{n-1}(n-i) = n²` points.
    pub fn expected_len(&self) -> usize {
        self.num_rows_half.saturating_mul(self.num_rows_half)
    }
}

impl LayoutGenerator for RhombusParams {
    const SHAPE: &'static str = "rhombus";

    fn validate(&self) -> Result<(), LayoutError> {
        require_count(Self::SHAPE, "num_rows_half", self.num_rows_half)?;
        require_total(
            Self::SHAPE,
            self.num_rows_half.checked_mul(self.num_rows_half),
        )?;
        require_positive(Self::SHAPE, "side_length_factor", self.side_length_factor)?;
        require_positive(Self::SHAPE, "h_compress_factor", self.h_compress_factor)?;
        require_positive(Self::SHAPE, "v_compress_factor", self.v_compress_factor)?;
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

impl LatticeLayout for RhombusParams {
    fn base_layout(&self, tile: &TileDims, cfg: &LayoutCfg) -> BaseLayout {
        let side = self.side_length_factor * tile.diagonal();
        let dx = side * self.h_compress_factor;
        let dy = side * 3f64.sqrt() / 2.0 * self.v_compress_factor;
        let n = self.num_rows_half;
        let mut seen = SeenSet::new(cfg.precision);
        let mut points = Vec::with_capacity(capacity_hint(Some(self.expected_len())));
        for i in 0..n {
            let y = i as f64 * dy;
            let in_row = n - i;
            let x0 = -((in_row - 1) as f64) * dx / 2.0;
            for j in 0..in_row {
                let x = round_to(x0 + j as f64 * dx, cfg.precision);
                let y_up = round_to(y, cfg.precision);
                push_unique(&mut points, &mut seen, Vector2::new(x, y_up));
                if i != 0 {
                    push_unique(&mut points, &mut seen, Vector2::new(x, -y_up));
                }
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
