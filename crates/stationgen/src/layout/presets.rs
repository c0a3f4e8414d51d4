//! Named station presets: four shapes × four variants.
//!
//! Shapes
//! - `circle`: legacy manual circular pattern.
//! - `square`: 12 × 3 grid.
//! - `rhombus`: 6 half rows, compressed (0.785 horizontal, 0.86 vertical).
//! - `spiral`: 3 arms × 12 tiles, start 0.7, step 0.3, angle step π/9.
//!
//! Variants
//! - `default`: the base parameters.
//! - `spaced`: linear spacing factors ×3, linear radius step ×1.5.
//! - `random`: `spaced` plus Gaussian jitter (0.3 · diagonal, min separation 1.01).
//! - `exponential`: center-exponential rescale (factor 2); the spiral also grows
//!   its arms exponentially (factor 1.15).

use std::f64::consts::PI;

use super::shapes::{GridParams, ManualCircularParams, RhombusParams, SpiralParams};
use super::{Jitter, LayoutSpec, SpacingMode, TileDims};

pub const SHAPES: [&str; 4] = ["circle", "square", "rhombus", "spiral"];
pub const VARIANTS: [&str; 4] = ["default", "spaced", "random", "exponential"];

const SPACING_MULT: f64 = 3.0;
const RADIUS_STEP_MULT: f64 = 1.5;
const JITTER_DIAGONAL_FRAC: f64 = 0.3;
const JITTER_MIN_SEPARATION: f64 = 1.01;
const EXP_CENTER_FACTOR: f64 = 2.0;
const EXP_ARM_FACTOR: f64 = 1.15;
/// Center-exponential factor carried by the grid-like base presets.
const BASE_CENTER_FACTOR: f64 = 4.0;

/// A named, fully parameterized layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    pub name: String,
    pub spec: LayoutSpec,
}

fn base(shape: &str) -> Option<LayoutSpec> {
    Some(match shape {
        "circle" => LayoutSpec::ManualCircular(ManualCircularParams {
            center_exp_scale_factor: BASE_CENTER_FACTOR,
            ..ManualCircularParams::default()
        }),
        "square" => LayoutSpec::Grid(GridParams {
            center_exp_scale_factor: BASE_CENTER_FACTOR,
            ..GridParams::new(12, 3)
        }),
        "rhombus" => LayoutSpec::Rhombus(RhombusParams {
            side_length_factor: 0.65,
            h_compress_factor: 0.785,
            v_compress_factor: 0.86,
            center_exp_scale_factor: BASE_CENTER_FACTOR,
            ..RhombusParams::new(6)
        }),
        "spiral" => LayoutSpec::Spiral(SpiralParams {
            radius_start_factor: 0.7,
            radius_step_factor: 0.3,
            angle_step: PI / 9.0,
            include_center_tile: false,
            ..SpiralParams::new(3, 12)
        }),
        _ => return None,
    })
}

fn spaced(spec: &mut LayoutSpec) {
    match spec {
        LayoutSpec::Grid(p) => {
            p.spacing_x_factor *= SPACING_MULT;
            p.spacing_y_factor *= SPACING_MULT;
        }
        LayoutSpec::ManualCircular(p) => {
            p.spacing_x_factor *= SPACING_MULT;
            p.spacing_y_factor *= SPACING_MULT;
        }
        LayoutSpec::Rhombus(p) => p.side_length_factor *= SPACING_MULT,
        LayoutSpec::Hex(p) => p.spacing_factor *= SPACING_MULT,
        LayoutSpec::Phyllotaxis(p) => p.scale_factor *= SPACING_MULT,
        LayoutSpec::Spiral(p) if p.arm_spacing_mode == SpacingMode::Linear => {
            p.radius_step_factor *= RADIUS_STEP_MULT
        }
        LayoutSpec::Ring(p) if p.ring_spacing_mode == SpacingMode::Linear => {
            p.radius_step_factor *= RADIUS_STEP_MULT
        }
        _ => {}
    }
}

fn jittered(spec: &mut LayoutSpec, tile: &TileDims) {
    let jitter = Jitter {
        stddev_m: JITTER_DIAGONAL_FRAC * tile.diagonal(),
        min_separation_factor: JITTER_MIN_SEPARATION,
        max_attempts: None,
    };
    match spec {
        LayoutSpec::Grid(p) => p.jitter = jitter,
        LayoutSpec::Spiral(p) => p.jitter = jitter,
        LayoutSpec::Ring(p) => p.jitter = jitter,
        LayoutSpec::Rhombus(p) => p.jitter = jitter,
        LayoutSpec::Hex(p) => p.jitter = jitter,
        LayoutSpec::Phyllotaxis(p) => p.jitter = jitter,
        LayoutSpec::Interlocking(p) => p.jitter = jitter,
        LayoutSpec::ManualCircular(p) => p.jitter = jitter,
        LayoutSpec::Random(_) => {}
    }
}

fn exponential(spec: &mut LayoutSpec) {
    match spec {
        LayoutSpec::Grid(p) => {
            p.spacing_mode = SpacingMode::CenterExponential;
            p.center_exp_scale_factor = EXP_CENTER_FACTOR;
        }
        LayoutSpec::Rhombus(p) => {
            p.spacing_mode = SpacingMode::CenterExponential;
            p.center_exp_scale_factor = EXP_CENTER_FACTOR;
        }
        LayoutSpec::Hex(p) => {
            p.spacing_mode = SpacingMode::CenterExponential;
            p.center_exp_scale_factor = EXP_CENTER_FACTOR;
        }
        LayoutSpec::Phyllotaxis(p) => {
            p.spacing_mode = SpacingMode::CenterExponential;
            p.center_exp_scale_factor = EXP_CENTER_FACTOR;
        }
        LayoutSpec::ManualCircular(p) => {
            p.spacing_mode = SpacingMode::CenterExponential;
            p.center_exp_scale_factor = EXP_CENTER_FACTOR;
            p.spacing_x_factor = 1.0;
            p.spacing_y_factor = 1.0;
        }
        LayoutSpec::Spiral(p) => {
            p.arm_spacing_mode = SpacingMode::Exponential;
            p.radius_step_factor = EXP_ARM_FACTOR;
            p.center_exponential = true;
            p.center_exp_scale_factor = EXP_CENTER_FACTOR;
        }
        LayoutSpec::Ring(p) => {
            p.ring_spacing_mode = SpacingMode::Exponential;
            p.radius_step_factor = EXP_ARM_FACTOR;
            p.center_exponential = true;
            p.center_exp_scale_factor = EXP_CENTER_FACTOR;
        }
        LayoutSpec::Interlocking(p) => {
            p.center_exponential = true;
            p.center_exp_scale_factor = EXP_CENTER_FACTOR;
        }
        LayoutSpec::Random(_) => {}
    }
}

/// Apply a named variant to `spec`. Returns `None` for an unknown variant.
pub fn apply_variant(spec: &LayoutSpec, variant: &str, tile: &TileDims) -> Option<LayoutSpec> {
    let mut out = spec.clone();
    match variant {
        "default" => {}
        "spaced" => spaced(&mut out),
        "random" => {
            spaced(&mut out);
            jittered(&mut out, tile);
        }
        "exponential" => exponential(&mut out),
        _ => return None,
    }
    Some(out)
}

/// Preset `<shape>_<variant>`, if both parts are known.
pub fn preset(name: &str, tile: &TileDims) -> Option<Preset> {
    let (shape, variant) = name.split_once('_')?;
    let spec = apply_variant(&base(shape)?, variant, tile)?;
    Some(Preset {
        name: name.to_string(),
        spec,
    })
}

/// All 16 presets, shape-major.
pub fn catalogue(tile: &TileDims) -> Vec<Preset> {
    SHAPES
        .iter()
        .flat_map(|s| VARIANTS.iter().map(move |v| format!("{s}_{v}")))
        .filter_map(|name| preset(&name, tile))
        .collect()
}
