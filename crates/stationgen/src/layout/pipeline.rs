//! Post-processing shared by every lattice-style generator.
//!
//! Order: center-exponential rescale (center tile excluded) → jitter with
//! collision rejection (center tile first) → round → center on origin.

use nalgebra::Vector2;
use rand::Rng;
use std::collections::HashSet;

use super::placement::{Placement, Placer};
use super::types::{Layout, LayoutCfg, PlacementReport, Stages, TileDims};
use crate::geometry::{apply_center_exponential_scaling, center_on_origin, round_coords};

/// Base pattern before post-processing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BaseLayout {
    /// Always-present center tile, pinned during rescaling.
    pub center: Option<Vector2<f64>>,
    pub points: Vec<Vector2<f64>>,
}

impl BaseLayout {
    pub fn len(&self) -> usize {
        self.points.len() + usize::from(self.center.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Seen-set keyed on coordinates rounded to the output precision.
#[derive(Clone, Debug)]
pub struct SeenSet {
    scale: f64,
    keys: HashSet<(i64, i64)>,
}

impl SeenSet {
    pub fn new(precision: u32) -> Self {
        Self {
            scale: 10f64.powi(precision as i32),
            keys: HashSet::new(),
        }
    }

    /// `true` if `p` was not seen before (and records it).
    pub fn insert(&mut self, p: Vector2<f64>) -> bool {
        let key = ((p.x * self.scale).round() as i64, (p.y * self.scale).round() as i64);
        self.keys.insert(key)
    }
}

/// Push `p` into `out` unless an equal (rounded) point is already there.
pub(crate) fn push_unique(out: &mut Vec<Vector2<f64>>, seen: &mut SeenSet, p: Vector2<f64>) {
    if seen.insert(p) {
        out.push(p);
    }
}

/// Rescale, jitter, round and center `base` according to `stages`.
pub fn run_pipeline<R: Rng + ?Sized>(
    shape: &'static str,
    base: BaseLayout,
    stages: &Stages,
    tile: &TileDims,
    cfg: &LayoutCfg,
    rng: &mut R,
) -> Layout {
    let requested = base.len();
    let BaseLayout { center, points } = base;

    let points = match stages.center_exp_scale {
        Some(f) => {
            tracing::debug!(shape, factor = f, "center_exponential_scaling");
            apply_center_exponential_scaling(&points, f, cfg.origin_eps)
        }
        None => points,
    };

    let mut report = PlacementReport {
        requested,
        ..PlacementReport::default()
    };

    let placed = if stages.jitter.enabled() {
        let jitter = stages.jitter;
        let max_attempts = jitter.max_attempts.unwrap_or(cfg.max_placement_attempts);
        let min_dist = jitter.min_separation_factor * tile.diagonal();
        tracing::debug!(shape, stddev = jitter.stddev_m, min_dist, "jitter");
        let mut placer = Placer::new(jitter.stddev_m, min_dist, max_attempts);
        if let Some(c) = center {
            if placer.place(c, rng) == Placement::Failed {
                tracing::warn!(shape, "jitter failed for center tile; kept at base position");
                placer.force(c);
                report.center_fallback = true;
            }
        }
        for p in &points {
            if placer.place(*p, rng) == Placement::Failed {
                tracing::warn!(
                    shape,
                    x = p.x,
                    y = p.y,
                    max_attempts,
                    "could not place tile without collision"
                );
                report.skipped += 1;
            }
        }
        if report.skipped > 0 {
            tracing::warn!(
                shape,
                skipped = report.skipped,
                total = requested,
                "tiles skipped after persistent collisions"
            );
        }
        report.attempts = placer.attempts();
        placer.into_points()
    } else {
        center.into_iter().chain(points).collect()
    };

    let mut out = round_coords(&placed, cfg.precision);
    if stages.center_layout {
        out = round_coords(&center_on_origin(&out), cfg.precision);
    }
    report.placed = out.len();
    tracing::info!(
        shape,
        placed = report.placed,
        requested,
        skipped = report.skipped,
        "layout generated"
    );
    Layout {
        points: out,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Jitter;
    use nalgebra::vector;
    use rand::{rngs::StdRng, SeedableRng};

    fn stages(scale: Option<f64>, stddev: f64) -> Stages {
        Stages {
            center_exp_scale: scale,
            jitter: Jitter {
                stddev_m: stddev,
                min_separation_factor: 1.0,
                max_attempts: Some(500),
            },
            center_layout: true,
        }
    }

    #[test]
    fn seen_set_suppresses_rounded_duplicates() {
        let mut seen = SeenSet::new(6);
        let mut out = Vec::new();
        push_unique(&mut out, &mut seen, vector![1.0, 2.0]);
        push_unique(&mut out, &mut seen, vector![1.0 + 1e-9, 2.0 - 1e-9]);
        push_unique(&mut out, &mut seen, vector![1.0, 2.1]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn center_tile_is_not_rescaled() {
        let base = BaseLayout {
            center: Some(vector![0.0, 0.0]),
            points: vec![vector![1.0, 0.0], vector![-1.0, 0.0]],
        };
        let mut st = stages(Some(2.0), 0.0);
        st.center_layout = false;
        let mut rng = StdRng::seed_from_u64(0);
        let out = run_pipeline("test", base, &st, &TileDims::new(1.0, 1.0), &LayoutCfg::default(), &mut rng);
        assert_eq!(out.points[0], vector![0.0, 0.0]);
        assert_eq!(out.points[1], vector![2.0, 0.0]);
        assert_eq!(out.points[2], vector![-2.0, 0.0]);
    }

    #[test]
    fn output_is_rounded_and_centered() {
        let base = BaseLayout {
            center: None,
            points: vec![vector![10.1234567, 1.0], vector![12.0, 3.0]],
        };
        let mut rng = StdRng::seed_from_u64(0);
        let out = run_pipeline("test", base, &stages(None, 0.0), &TileDims::new(1.0, 1.0), &LayoutCfg::default(), &mut rng);
        let c = out.centroid().unwrap();
        assert!(c.norm() < 1e-6);
        for p in &out.points {
            assert_eq!(p.x, (p.x * 1e6).round() / 1e6);
        }
        assert_eq!(out.report.placed, 2);
        assert_eq!(out.report.skipped, 0);
    }

    #[test]
    fn crowded_base_skips_points_but_keeps_center() {
        // Every point coincides; a 1.41 m exclusion cannot be met with 1 mm noise.
        let base = BaseLayout {
            center: Some(vector![0.0, 0.0]),
            points: vec![vector![0.0, 0.0]; 4],
        };
        let mut rng = StdRng::seed_from_u64(5);
        let out = run_pipeline("test", base, &stages(None, 1e-3), &TileDims::new(1.0, 1.0), &LayoutCfg::default(), &mut rng);
        assert_eq!(out.report.requested, 5);
        assert_eq!(out.report.skipped, 4);
        assert_eq!(out.len(), 1);
        assert!(!out.report.center_fallback);
        assert_eq!(out.report.attempts, 1 + 4 * 500);
    }
}
