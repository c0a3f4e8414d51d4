use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::layout::pipeline::push_unique;
use crate::layout::{
    require_finite, require_positive, require_total, BaseLayout, Jitter, LatticeLayout, Layout,
    LayoutCfg, LayoutError, LayoutGenerator, SeenSet, SpacingMode, Stages, TileDims,
};

/// Concentric rings, inner to outer.
///
/// Ring `k` holds `tiles_per_ring[k]` points evenly spaced by angle, starting on
/// the positive x axis. The first radius is `radius_start_factor · diagonal`;
/// subsequent radii add `radius_step_factor · diagonal` (linear) or multiply by
/// `radius_step_factor` (exponential).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingParams {
    /// Must equal `tiles_per_ring.len()`. Zero rings is allowed.
    pub num_rings: usize,
    pub tiles_per_ring: Vec<usize>,
    pub ring_spacing_mode: SpacingMode,
    pub center_exponential: bool,
    pub radius_start_factor: f64,
    pub radius_step_factor: f64,
    pub center_exp_scale_factor: f64,
    pub add_center_tile: bool,
    pub jitter: Jitter,
    pub center_layout: bool,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            num_rings: 2,
            tiles_per_ring: vec![6, 12],
            ring_spacing_mode: SpacingMode::Linear,
            center_exponential: false,
            radius_start_factor: 1.5,
            radius_step_factor: 1.0,
            center_exp_scale_factor: 1.1,
            add_center_tile: true,
            jitter: Jitter::default(),
            center_layout: true,
        }
    }
}

impl RingParams {
    pub fn new(tiles_per_ring: Vec<usize>) -> Self {
        Self {
            num_rings: tiles_per_ring.len(),
            tiles_per_ring,
            ..Self::default()
        }
    }

    /// Point count before duplicate suppression and placement failures.
    pub fn expected_len(&self) -> usize {
        self.tiles_per_ring
            .iter()
            .fold(usize::from(self.add_center_tile), |acc, n| acc.saturating_add(*n))
    }
}

impl LayoutGenerator for RingParams {
    const SHAPE: &'static str = "ring";

    fn validate(&self) -> Result<(), LayoutError> {
        if self.tiles_per_ring.len() != self.num_rings {
            return Err(LayoutError::invalid(
                Self::SHAPE,
                format!(
                    "tiles_per_ring has {} entries but num_rings is {}",
                    self.tiles_per_ring.len(),
                    self.num_rings
                ),
            ));
        }
        require_total(Self::SHAPE, Some(self.expected_len()))?;
        if self.tiles_per_ring.iter().any(|n| *n == 0) {
            return Err(LayoutError::invalid(
                Self::SHAPE,
                "every ring needs at least one tile",
            ));
        }
        require_finite(Self::SHAPE, "radius_start_factor", self.radius_start_factor)?;
        match self.ring_spacing_mode {
            SpacingMode::Linear => {
                require_finite(Self::SHAPE, "radius_step_factor", self.radius_step_factor)?
            }
            SpacingMode::Exponential => {
                require_positive(Self::SHAPE, "radius_step_factor", self.radius_step_factor)?
            }
            SpacingMode::CenterExponential => {
                return Err(LayoutError::invalid(
                    Self::SHAPE,
                    "ring_spacing_mode must be 'linear' or 'exponential'",
                ))
            }
        }
        if self.center_exponential {
            require_positive(
                Self::SHAPE,
                "center_exp_scale_factor",
                self.center_exp_scale_factor,
            )?;
        }
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

impl LatticeLayout for RingParams {
    fn base_layout(&self, tile: &TileDims, cfg: &LayoutCfg) -> BaseLayout {
        let diag = tile.diagonal();
        let mut radius = self.radius_start_factor * diag;
        let mut seen = SeenSet::new(cfg.precision);
        let center = if self.add_center_tile {
            let c = Vector2::zeros();
            seen.insert(c);
            Some(c)
        } else {
            None
        };
        let mut points = Vec::new();
        for &n in &self.tiles_per_ring {
            for i in 0..n {
                let theta = i as f64 * TAU / n as f64;
                push_unique(
                    &mut points,
                    &mut seen,
                    Vector2::new(radius * theta.cos(), radius * theta.sin()),
                );
            }
            match self.ring_spacing_mode {
                SpacingMode::Exponential => radius *= self.radius_step_factor,
                _ => radius += self.radius_step_factor * diag,
            }
        }
        BaseLayout { center, points }
    }

    fn stages(&self) -> Stages {
        Stages {
            center_exp_scale: self
                .center_exponential
                .then_some(self.center_exp_scale_factor),
            jitter: self.jitter,
            center_layout: self.center_layout,
        }
    }
}
