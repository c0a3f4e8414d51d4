use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::layout::pipeline::push_unique;
use crate::layout::{
    capacity_hint, require_count, require_finite, require_positive, require_total, BaseLayout,
    Jitter, LatticeLayout, Layout, LayoutCfg, LayoutError, LayoutGenerator, SeenSet, Stages,
    TileDims,
};

/// Interlocking rings: `num_main_rings` sub-rings whose centers sit evenly on a
/// main circle of radius `main_ring_offset_factor · diagonal`. Each sub-ring holds
/// `tiles_per_ring` points at radius `ring_radius_factor · diagonal`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterlockingParams {
    pub num_main_rings: usize,
    pub tiles_per_ring: usize,
    pub center_exponential: bool,
    pub ring_radius_factor: f64,
    pub main_ring_offset_factor: f64,
    pub center_exp_scale_factor: f64,
    pub add_center_tile: bool,
    pub jitter: Jitter,
    pub center_layout: bool,
}

impl Default for InterlockingParams {
    fn default() -> Self {
        Self {
            num_main_rings: 3,
            tiles_per_ring: 8,
            center_exponential: false,
            ring_radius_factor: 1.0,
            main_ring_offset_factor: 1.5,
            center_exp_scale_factor: 1.1,
            add_center_tile: false,
            jitter: Jitter::default(),
            center_layout: true,
        }
    }
}

impl InterlockingParams {
    pub fn new(num_main_rings: usize, tiles_per_ring: usize) -> Self {
        Self {
            num_main_rings,
            tiles_per_ring,
            ..Self::default()
        }
    }
}

impl LayoutGenerator for InterlockingParams {
    const SHAPE: &'static str = "interlocking";

    fn validate(&self) -> Result<(), LayoutError> {
        require_count(Self::SHAPE, "num_main_rings", self.num_main_rings)?;
        require_count(Self::SHAPE, "tiles_per_ring", self.tiles_per_ring)?;
        require_total(
            Self::SHAPE,
            self.num_main_rings.checked_mul(self.tiles_per_ring),
        )?;
        require_finite(Self::SHAPE, "ring_radius_factor", self.ring_radius_factor)?;
        require_finite(
            Self::SHAPE,
            "main_ring_offset_factor",
            self.main_ring_offset_factor,
        )?;
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

impl LatticeLayout for InterlockingParams {
    fn base_layout(&self, tile: &TileDims, cfg: &LayoutCfg) -> BaseLayout {
        let diag = tile.diagonal();
        let ring_radius = self.ring_radius_factor * diag;
        let main_offset = self.main_ring_offset_factor * diag;
        let mut seen = SeenSet::new(cfg.precision);
        let center = if self.add_center_tile {
            let c = Vector2::zeros();
            seen.insert(c);
            Some(c)
        } else {
            None
        };
        let mut points = Vec::with_capacity(capacity_hint(
            self.num_main_rings.checked_mul(self.tiles_per_ring),
        ));
        for r in 0..self.num_main_rings {
            let main = r as f64 * TAU / self.num_main_rings as f64;
            let hub = Vector2::new(main_offset * main.cos(), main_offset * main.sin());
            for t in 0..self.tiles_per_ring {
                let a = t as f64 * TAU / self.tiles_per_ring as f64;
                let p = hub + Vector2::new(ring_radius * a.cos(), ring_radius * a.sin());
                push_unique(&mut points, &mut seen, p);
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
