use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

use crate::geometry::angle_to_radians;
use crate::layout::pipeline::push_unique;
use crate::layout::{
    capacity_hint, require_count, require_finite, require_positive, require_total, AngleMode,
    BaseLayout, Jitter, LatticeLayout, Layout, LayoutCfg, LayoutError, LayoutGenerator, SeenSet,
    SpacingMode, Stages, TileDims,
};

/// Multi-arm spiral.
///
/// Arm `p` starts at angle `2π·p/N + p·rotation_per_arm + arm_offset` and radius
/// `radius_start_factor · diagonal`. Each step advances the angle by `angle_step`
/// and grows the radius by `radius_step_factor · diagonal` (linear) or multiplies
/// it by `radius_step_factor` (exponential).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralParams {
    pub num_arms: usize,
    pub tiles_per_arm: usize,
    /// `Linear` or `Exponential` growth along each arm.
    pub arm_spacing_mode: SpacingMode,
    /// Extra center-exponential rescale after the arms are laid out.
    pub center_exponential: bool,
    pub radius_start_factor: f64,
    pub radius_step_factor: f64,
    pub center_exp_scale_factor: f64,
    pub angle_step: f64,
    pub arm_offset: f64,
    pub rotation_per_arm: f64,
    /// Unit of `angle_step`, `arm_offset` and `rotation_per_arm`.
    pub angle_unit: AngleMode,
    pub include_center_tile: bool,
    pub jitter: Jitter,
    pub center_layout: bool,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            num_arms: 3,
            tiles_per_arm: 12,
            arm_spacing_mode: SpacingMode::Linear,
            center_exponential: false,
            radius_start_factor: 0.5,
            radius_step_factor: 0.2,
            center_exp_scale_factor: 1.1,
            angle_step: PI / 6.0,
            arm_offset: 0.0,
            rotation_per_arm: 0.0,
            angle_unit: AngleMode::Radian,
            include_center_tile: false,
            jitter: Jitter::default(),
            center_layout: true,
        }
    }
}

impl SpiralParams {
    pub fn new(num_arms: usize, tiles_per_arm: usize) -> Self {
        Self {
            num_arms,
            tiles_per_arm,
            ..Self::default()
        }
    }

    fn rad(&self, angle: f64) -> f64 {
        angle_to_radians(angle, self.angle_unit)
    }
}

impl LayoutGenerator for SpiralParams {
    const SHAPE: &'static str = "spiral";

    fn validate(&self) -> Result<(), LayoutError> {
        require_count(Self::SHAPE, "num_arms", self.num_arms)?;
        require_count(Self::SHAPE, "tiles_per_arm", self.tiles_per_arm)?;
        require_total(Self::SHAPE, self.num_arms.checked_mul(self.tiles_per_arm))?;
        require_finite(Self::SHAPE, "radius_start_factor", self.radius_start_factor)?;
        require_finite(Self::SHAPE, "angle_step", self.angle_step)?;
        require_finite(Self::SHAPE, "arm_offset", self.arm_offset)?;
        require_finite(Self::SHAPE, "rotation_per_arm", self.rotation_per_arm)?;
        match self.arm_spacing_mode {
            SpacingMode::Linear => {
                require_finite(Self::SHAPE, "radius_step_factor", self.radius_step_factor)?
            }
            SpacingMode::Exponential => {
                require_positive(Self::SHAPE, "radius_step_factor", self.radius_step_factor)?
            }
            SpacingMode::CenterExponential => {
                return Err(LayoutError::invalid(
                    Self::SHAPE,
                    "arm_spacing_mode must be 'linear' or 'exponential'",
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

impl LatticeLayout for SpiralParams {
    fn base_layout(&self, tile: &TileDims, cfg: &LayoutCfg) -> BaseLayout {
        let diag = tile.diagonal();
        let step = self.rad(self.angle_step);
        let rot = self.rad(self.rotation_per_arm);
        let offset = self.rad(self.arm_offset);
        let mut seen = SeenSet::new(cfg.precision);
        let center = if self.include_center_tile {
            let c = Vector2::zeros();
            seen.insert(c);
            Some(c)
        } else {
            None
        };
        let mut points =
            Vec::with_capacity(capacity_hint(self.num_arms.checked_mul(self.tiles_per_arm)));
        for p in 0..self.num_arms {
            let arm_angle = p as f64 * (TAU / self.num_arms as f64) + p as f64 * rot + offset;
            let mut radius = self.radius_start_factor * diag;
            for i in 0..self.tiles_per_arm {
                let theta = arm_angle + i as f64 * step;
                push_unique(
                    &mut points,
                    &mut seen,
                    Vector2::new(radius * theta.cos(), radius * theta.sin()),
                );
                match self.arm_spacing_mode {
                    SpacingMode::Exponential => radius *= self.radius_step_factor,
                    _ => radius += self.radius_step_factor * diag,
                }
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
