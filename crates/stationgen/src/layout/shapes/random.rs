use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::str::FromStr;

use crate::geometry::{center_on_origin, round_coords};
use crate::layout::{
    check_inputs, require_positive, require_total, Layout, LayoutCfg, LayoutError,
    LayoutGenerator, PlacementReport, TileDims,
};

/// Radius distribution of the pure-random sampler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusSampling {
    /// `r ~ U(0, R)`: denser toward the center. Historical behavior.
    #[default]
    UniformRadius,
    /// `r = R·√u`: uniform density over the disk.
    AreaUniform,
}

impl FromStr for RadiusSampling {
    type Err = LayoutError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform_radius" => Ok(Self::UniformRadius),
            "area_uniform" => Ok(Self::AreaUniform),
            other => Err(LayoutError::InvalidMode(other.to_string())),
        }
    }
}

/// Random points in a disk of radius `max_radius_m`, each accepted only if it
/// keeps `min_separation_factor · diagonal` from every earlier point.
///
/// There is no base pattern, so this implements `LayoutGenerator` only; rounding
/// and centering are applied directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomParams {
    /// `0` yields an empty layout.
    pub num_tiles: usize,
    pub max_radius_m: f64,
    pub min_separation_factor: f64,
    /// `None` uses `max_placement_attempts * random_attempts_multiplier`.
    pub max_placement_attempts: Option<u32>,
    pub radius_sampling: RadiusSampling,
    pub center_layout: bool,
}

impl Default for RandomParams {
    fn default() -> Self {
        Self {
            num_tiles: 36,
            max_radius_m: 10.0,
            min_separation_factor: 1.05,
            max_placement_attempts: None,
            radius_sampling: RadiusSampling::UniformRadius,
            center_layout: true,
        }
    }
}

impl RandomParams {
    pub fn new(num_tiles: usize, max_radius_m: f64) -> Self {
        Self {
            num_tiles,
            max_radius_m,
            ..Self::default()
        }
    }

    fn attempts(&self, cfg: &LayoutCfg) -> u32 {
        self.max_placement_attempts.unwrap_or_else(|| {
            cfg.max_placement_attempts
                .saturating_mul(cfg.random_attempts_multiplier)
        })
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2<f64> {
        let r = match self.radius_sampling {
            RadiusSampling::UniformRadius => rng.gen_range(0.0..=self.max_radius_m),
            RadiusSampling::AreaUniform => self.max_radius_m * rng.gen::<f64>().sqrt(),
        };
        let theta = rng.gen_range(0.0..TAU);
        Vector2::new(r * theta.cos(), r * theta.sin())
    }
}

impl LayoutGenerator for RandomParams {
    const SHAPE: &'static str = "random";

    fn validate(&self) -> Result<(), LayoutError> {
        require_total(Self::SHAPE, Some(self.num_tiles))?;
        require_positive(Self::SHAPE, "max_radius_m", self.max_radius_m)?;
        require_positive(
            Self::SHAPE,
            "min_separation_factor",
            self.min_separation_factor,
        )?;
        if self.max_placement_attempts == Some(0) {
            return Err(LayoutError::invalid(
                Self::SHAPE,
                "max_placement_attempts must be > 0",
            ));
        }
        Ok(())
    }

    fn generate<R: Rng + ?Sized>(
        &self,
        tile: &TileDims,
        cfg: &LayoutCfg,
        rng: &mut R,
    ) -> Result<Layout, LayoutError> {
        check_inputs(Self::SHAPE, tile, cfg, || self.validate())?;
        if self.num_tiles == 0 {
            return Ok(Layout::default());
        }
        let min_dist = self.min_separation_factor * tile.diagonal();
        let min_dist_sq = min_dist * min_dist;
        let max_attempts = self.attempts(cfg);
        tracing::debug!(
            shape = Self::SHAPE,
            n = self.num_tiles,
            max_radius_m = self.max_radius_m,
            "random placement"
        );

        let mut placed: Vec<Vector2<f64>> = Vec::with_capacity(self.num_tiles);
        let mut report = PlacementReport {
            requested: self.num_tiles,
            ..PlacementReport::default()
        };
        for _ in 0..self.num_tiles {
            let mut accepted = false;
            for _ in 0..max_attempts {
                report.attempts += 1;
                let c = self.sample(rng);
                if placed.iter().all(|p| (c - p).norm_squared() >= min_dist_sq) {
                    placed.push(c);
                    accepted = true;
                    break;
                }
            }
            if !accepted {
                tracing::warn!(
                    shape = Self::SHAPE,
                    tile = placed.len() + 1,
                    max_attempts,
                    "could not place tile"
                );
                report.skipped += 1;
            }
        }

        let mut out = round_coords(&placed, cfg.precision);
        if self.center_layout {
            out = round_coords(&center_on_origin(&out), cfg.precision);
        }
        report.placed = out.len();
        tracing::info!(
            shape = Self::SHAPE,
            placed = report.placed,
            skipped = report.skipped,
            attempts = report.attempts,
            "layout generated"
        );
        Ok(Layout {
            points: out,
            report,
        })
    }
}
