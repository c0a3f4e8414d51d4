//! Station layout generators (tile-center positions in meters).
//!
//! Purpose
//! - Nine point-pattern families sharing one parameterization model: every
//!   dimensionless `*_factor` is multiplied by the tile diagonal (grid and manual
//!   use width/height per axis).
//! - One post-processing pipeline for the eight lattice shapes (`LatticeLayout`),
//!   see `pipeline::run_pipeline`. Pure random places its points directly.
//!
//! Contract
//! - Invalid parameters, tile dimensions or `LayoutCfg` values return
//!   `Err(LayoutError::InvalidParams)`; an empty pattern by construction is
//!   `Ok` with no points. Tile counts are capped at `MAX_TILES`.
//! - Placement failures under jitter never fail the call. They are counted in
//!   `Layout::report` and logged.
//! - Output depends only on the parameters, `LayoutCfg` and the RNG state.

pub mod pipeline;
pub mod placement;
pub mod presets;
pub mod shapes;
mod spec;
mod types;

pub use pipeline::{run_pipeline, BaseLayout, SeenSet};
pub use placement::{place_with_jitter, Placement, Placer};
pub use shapes::{
    GridParams, HexParams, InterlockingParams, ManualCircularParams, PhyllotaxisParams,
    RadiusSampling, RandomParams, RhombusParams, RingParams, SpiralParams,
};
pub use spec::LayoutSpec;
pub use types::{
    AngleMode, Jitter, Layout, LayoutCfg, LayoutError, PlacementReport, SpacingMode, Stages,
    TileDims,
};

use rand::Rng;

/// Common interface of all generators.
pub trait LayoutGenerator {
    /// Short shape name used in logs and errors.
    const SHAPE: &'static str;

    /// Shape-specific parameter checks (tile dimensions and `LayoutCfg` are
    /// checked separately, see `check_inputs`).
    fn validate(&self) -> Result<(), LayoutError>;

    fn generate<R: Rng + ?Sized>(
        &self,
        tile: &TileDims,
        cfg: &LayoutCfg,
        rng: &mut R,
    ) -> Result<Layout, LayoutError>;
}

/// Shapes made of a deterministic base pattern plus the shared pipeline.
///
/// Implementors forward `LayoutGenerator::generate` to `generate_lattice`.
pub trait LatticeLayout: LayoutGenerator {
    /// Shape-specific base pattern, duplicates already suppressed.
    fn base_layout(&self, tile: &TileDims, cfg: &LayoutCfg) -> BaseLayout;

    fn stages(&self) -> Stages;

    fn generate_lattice<R: Rng + ?Sized>(
        &self,
        tile: &TileDims,
        cfg: &LayoutCfg,
        rng: &mut R,
    ) -> Result<Layout, LayoutError> {
        let stages = self.stages();
        check_inputs(Self::SHAPE, tile, cfg, || {
            self.validate()
                .and_then(|_| stages.jitter.validate(Self::SHAPE))
        })?;
        let base = self.base_layout(tile, cfg);
        Ok(run_pipeline(Self::SHAPE, base, &stages, tile, cfg, rng))
    }
}

/// Tile, pipeline config, then shape checks; a rejection is logged once.
pub(crate) fn check_inputs(
    shape: &'static str,
    tile: &TileDims,
    cfg: &LayoutCfg,
    params: impl FnOnce() -> Result<(), LayoutError>,
) -> Result<(), LayoutError> {
    let checked = tile
        .validate(shape)
        .and_then(|_| cfg.validate(shape))
        .and_then(|_| params());
    if let Err(err) = &checked {
        tracing::warn!(shape, %err, "rejected layout params");
    }
    checked
}

/// Upper bound on tiles in one layout request.
pub const MAX_TILES: usize = 1_000_000;

/// Check helpers shared by the shape modules.
pub(crate) fn require_positive(
    shape: &'static str,
    name: &str,
    value: f64,
) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::invalid(
            shape,
            format!("{name} must be finite and > 0 (got {value})"),
        ))
    }
}

pub(crate) fn require_finite(
    shape: &'static str,
    name: &str,
    value: f64,
) -> Result<(), LayoutError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::invalid(shape, format!("{name} must be finite")))
    }
}

pub(crate) fn require_count(
    shape: &'static str,
    name: &str,
    value: usize,
) -> Result<(), LayoutError> {
    if value > 0 {
        Ok(())
    } else {
        Err(LayoutError::invalid(shape, format!("{name} must be > 0")))
    }
}

/// Center-exponential factor for lattice shapes driven by a `SpacingMode`.
///
/// `Exponential` has no meaning for these shapes and is rejected.
pub(crate) fn lattice_scale(
    shape: &'static str,
    mode: SpacingMode,
    factor: f64,
) -> Result<Option<f64>, LayoutError> {
    match mode {
        SpacingMode::Linear => Ok(None),
        SpacingMode::CenterExponential => {
            require_positive(shape, "center_exp_scale_factor", factor)?;
            Ok(Some(factor))
        }
        SpacingMode::Exponential => Err(LayoutError::invalid(
            shape,
            "spacing_mode 'exponential' is only supported by spiral and ring",
        )),
    }
}

/// `total` is the shape's tile count computed with checked arithmetic.
pub(crate) fn require_total(
    shape: &'static str,
    total: Option<usize>,
) -> Result<usize, LayoutError> {
    total.filter(|&n| n <= MAX_TILES).ok_or_else(|| {
        LayoutError::invalid(shape, format!("tile count must not exceed {MAX_TILES}"))
    })
}

/// Pre-allocation size for a tile count, bounded by `MAX_TILES`.
#[inline]
pub(crate) fn capacity_hint(total: Option<usize>) -> usize {
    total.map_or(MAX_TILES, |n| n.min(MAX_TILES))
}
