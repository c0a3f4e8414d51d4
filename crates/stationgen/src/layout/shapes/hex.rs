use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_3;

use crate::layout::pipeline::push_unique;
use crate::layout::{
    capacity_hint, lattice_scale, require_positive, require_total, BaseLayout, Jitter,
    LatticeLayout, Layout, LayoutCfg, LayoutError, LayoutGenerator, SeenSet, SpacingMode, Stages,
    TileDims,
};

/// Hexagonal grid: center plus `num_rings_hex` hexagonal rings.
///
/// Ring `r` starts at `(r·s, 0)` and walks six sides of `r` steps of length `s`,
/// side `k` heading at `(k + 2)·60°`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexParams {
    /// `0` yields only the center tile (if enabled).
    pub num_rings_hex: usize,
    pub spacing_mode: SpacingMode,
    pub spacing_factor: f64,
    pub center_exp_scale_factor: f64,
    pub add_center_tile: bool,
    pub jitter: Jitter,
    pub center_layout: bool,
}

impl Default for HexParams {
    fn default() -> Self {
        Self {
            num_rings_hex: 3,
            spacing_mode: SpacingMode::Linear,
            spacing_factor: 1.5,
            center_exp_scale_factor: 1.1,
            add_center_tile: true,
            jitter: Jitter::default(),
            center_layout: true,
        }
    }
}

impl HexParams {
    pub fn new(num_rings_hex: usize) -> Self {
        Self {
            num_rings_hex,
            ..Self::default()
        }
    }

    /// `1 + 3·n·(n+1)` with the center tile, `3·n·(n+1)` without.
    pub fn expected_len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    fn checked_len(&self) -> Option<usize> {
        let n = self.num_rings_hex;
        n.checked_add(1)
            .and_then(|m| m.checked_mul(n))
            .and_then(|m| m.checked_mul(3))
            .and_then(|m| m.checked_add(usize::from(self.add_center_tile)))
    }
}

impl LayoutGenerator for HexParams {
    const SHAPE: &'static str = "hex";

    fn validate(&self) -> Result<(), LayoutError> {
        require_positive(Self::SHAPE, "spacing_factor", self.spacing_factor)?;
        require_total(Self::SHAPE, self.checked_len())?;
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

impl LatticeLayout for HexParams {
    fn base_layout(&self, tile: &TileDims, cfg: &LayoutCfg) -> BaseLayout {
        let s = self.spacing_factor * tile.diagonal();
        let mut seen = SeenSet::new(cfg.precision);
        let center = if self.add_center_tile {
            let c = Vector2::zeros();
            seen.insert(c);
            Some(c)
        } else {
            None
        };
        let dirs: Vec<Vector2<f64>> = (0..6)
            .map(|side| {
                let a = (side + 2) as f64 * FRAC_PI_3;
                Vector2::new(s * a.cos(), s * a.sin())
            })
            .collect();
        let mut points = Vec::with_capacity(capacity_hint(self.checked_len()));
        for ring in 1..=self.num_rings_hex {
            let mut p = Vector2::new(ring as f64 * s, 0.0);
            push_unique(&mut points, &mut seen, p);
            for d in &dirs {
                for _ in 0..ring {
                    p += d;
                    push_unique(&mut points, &mut seen, p);
                }
            }
        }
        BaseLayout { center, points }
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
    use crate::layout::shapes::testutil::distinct_radii;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn ring_counts_follow_centered_hexagonal_numbers() {
        let cfg = LayoutCfg::default();
        for n in 0..5 {
            let params = HexParams::new(n);
            let base = params.base_layout(&TileDims::BINGO, &cfg);
            assert_eq!(base.len(), params.expected_len(), "rings = {n}");
        }
    }

    #[test]
    fn first_ring_is_regular_hexagon() {
        let tile = TileDims::new(3.0, 4.0);
        let base = HexParams::new(1).base_layout(&tile, &LayoutCfg::default());
        assert_eq!(base.points.len(), 6);
        let radii = distinct_radii(&base.points, 1e-9);
        assert_eq!(radii.len(), 1);
        assert!((radii[0] - 7.5).abs() < 1e-9);
        assert_eq!(base.points[0], Vector2::new(7.5, 0.0));
    }

    #[test]
    fn nearest_neighbour_spacing_is_constant() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = HexParams::new(2);
        let out = params
            .generate(&TileDims::BINGO, &LayoutCfg::default(), &mut rng)
            .unwrap();
        assert_eq!(out.len(), 19);
        let s = 1.5 * TileDims::BINGO.diagonal();
        assert!((out.min_pairwise_distance().unwrap() - s).abs() < 1e-5);
    }

    #[test]
    fn without_center() {
        let params = HexParams {
            add_center_tile: false,
            ..HexParams::new(0)
        };
        let mut rng = StdRng::seed_from_u64(0);
        let out = params
            .generate(&TileDims::BINGO, &LayoutCfg::default(), &mut rng)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn oversized_hex_is_rejected() {
        // 3·n·(n+1) + 1 overflows for the first, exceeds the tile cap for the second.
        for rings in [usize::MAX, 1_000] {
            assert!(HexParams::new(rings).validate().is_err());
        }
        let mut rng = StdRng::seed_from_u64(0);
        let res =
            HexParams::new(usize::MAX).generate(&TileDims::BINGO, &LayoutCfg::default(), &mut rng);
        assert!(matches!(res, Err(LayoutError::InvalidParams { shape: "hex", .. })));
        assert!(HexParams::new(500).validate().is_ok());
    }
}
