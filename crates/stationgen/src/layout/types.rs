//! Shared layout types: tile reference, pipeline configuration, mode tags,
//! per-call results and the error type.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors shared by all generators.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid {shape} params: {reason}")]
    InvalidParams { shape: &'static str, reason: String },
    #[error("invalid mode tag: {0:?}")]
    InvalidMode(String),
}

impl LayoutError {
    pub(crate) fn invalid(shape: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            shape,
            reason: reason.into(),
        }
    }
}

/// Physical tile footprint in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileDims {
    pub width_m: f64,
    pub height_m: f64,
}

impl TileDims {
    /// BINGO reference tile (0.35 m × 1.34 m).
    pub const BINGO: TileDims = TileDims {
        width_m: 0.35,
        height_m: 1.34,
    };

    pub fn new(width_m: f64, height_m: f64) -> Self {
        Self { width_m, height_m }
    }

    #[inline]
    pub fn diagonal(&self) -> f64 {
        crate::geometry::tile_diagonal(self.width_m, self.height_m)
    }

    pub(crate) fn validate(&self, shape: &'static str) -> Result<(), LayoutError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.width_m) || !ok(self.height_m) {
            return Err(LayoutError::invalid(
                shape,
                format!(
                    "tile dimensions must be finite and > 0 (got {} x {})",
                    self.width_m, self.height_m
                ),
            ));
        }
        Ok(())
    }
}

impl Default for TileDims {
    fn default() -> Self {
        Self::BINGO
    }
}

/// Pipeline configuration (precision and attempt budgets).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutCfg {
    /// Decimal places kept in every output coordinate.
    pub precision: u32,
    /// Jitter attempts per point when a generator does not override it.
    pub max_placement_attempts: u32,
    /// Pure-random budget is `max_placement_attempts * random_attempts_multiplier`.
    pub random_attempts_multiplier: u32,
    /// Distances at or below this count as "at the origin".
    pub origin_eps: f64,
}

impl LayoutCfg {
    /// Largest supported `precision`; rounded coordinates are keyed as `i64`.
    pub const MAX_PRECISION: u32 = 12;

    pub(crate) fn validate(&self, shape: &'static str) -> Result<(), LayoutError> {
        if self.precision > Self::MAX_PRECISION {
            return Err(LayoutError::invalid(
                shape,
                format!(
                    "precision must be <= {} (got {})",
                    Self::MAX_PRECISION,
                    self.precision
                ),
            ));
        }
        if self.max_placement_attempts == 0 {
            return Err(LayoutError::invalid(
                shape,
                "max_placement_attempts must be > 0",
            ));
        }
        if self.random_attempts_multiplier == 0 {
            return Err(LayoutError::invalid(
                shape,
                "random_attempts_multiplier must be > 0",
            ));
        }
        if !(self.origin_eps.is_finite() && self.origin_eps >= 0.0) {
            return Err(LayoutError::invalid(
                shape,
                "origin_eps must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

impl Default for LayoutCfg {
    fn default() -> Self {
        Self {
            precision: 6,
            max_placement_attempts: 10_000,
            random_attempts_multiplier: 10,
            origin_eps: 1e-9,
        }
    }
}

/// How spacing progresses away from the center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacingMode {
    /// Constant step (or the shape's own base progression).
    #[default]
    Linear,
    /// Each radial step multiplies the previous radius (spiral arms, rings).
    Exponential,
    /// Post-hoc radial rescale of already placed points.
    CenterExponential,
}

impl FromStr for SpacingMode {
    type Err = LayoutError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "exponential" => Ok(Self::Exponential),
            "center_exponential" => Ok(Self::CenterExponential),
            other => Err(LayoutError::InvalidMode(other.to_string())),
        }
    }
}

/// Unit of an input angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleMode {
    Degree,
    #[default]
    Radian,
}

impl FromStr for AngleMode {
    type Err = LayoutError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "degree" => Ok(Self::Degree),
            "radian" => Ok(Self::Radian),
            other => Err(LayoutError::InvalidMode(other.to_string())),
        }
    }
}

/// Gaussian jitter with collision rejection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Jitter {
    /// Standard deviation in meters; `0` disables jitter and collision checks.
    pub stddev_m: f64,
    /// Minimum center distance, as a factor of the tile diagonal.
    pub min_separation_factor: f64,
    /// Attempts per point; `None` uses `LayoutCfg::max_placement_attempts`.
    pub max_attempts: Option<u32>,
}

impl Default for Jitter {
    fn default() -> Self {
        Self {
            stddev_m: 0.0,
            min_separation_factor: 1.05,
            max_attempts: None,
        }
    }
}

impl Jitter {
    #[inline]
    pub fn enabled(&self) -> bool {
        self.stddev_m > 0.0
    }

    pub(crate) fn validate(&self, shape: &'static str) -> Result<(), LayoutError> {
        if !(self.stddev_m.is_finite() && self.stddev_m >= 0.0) {
            return Err(LayoutError::invalid(
                shape,
                "random offset stddev must be finite and >= 0",
            ));
        }
        if self.enabled() && !(self.min_separation_factor > 0.0) {
            return Err(LayoutError::invalid(
                shape,
                "min_separation_factor must be > 0 when jitter is enabled",
            ));
        }
        if self.max_attempts == Some(0) {
            return Err(LayoutError::invalid(shape, "max_attempts must be > 0"));
        }
        Ok(())
    }
}

/// Post-processing stages applied after base generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stages {
    /// `Some(f)` rescales with `apply_center_exponential_scaling(_, f)`.
    pub center_exp_scale: Option<f64>,
    pub jitter: Jitter,
    pub center_layout: bool,
}

/// Per-call placement bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PlacementReport {
    /// Points in the base pattern (after duplicate suppression).
    pub requested: usize,
    pub placed: usize,
    /// Points dropped after exhausting their attempt budget.
    pub skipped: usize,
    /// Center tile kept at its unperturbed position after a failed jitter.
    pub center_fallback: bool,
    /// Candidate positions drawn in total.
    pub attempts: u64,
}

/// Generated tile centers plus the placement report.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub points: Vec<Vector2<f64>>,
    pub report: PlacementReport,
}

impl Layout {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Centroid of the points (`None` if empty).
    pub fn centroid(&self) -> Option<Vector2<f64>> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p);
        Some(sum / self.points.len() as f64)
    }

    /// Smallest pairwise distance (`None` for fewer than two points).
    pub fn min_pairwise_distance(&self) -> Option<f64> {
        let mut best: Option<f64> = None;
        for (i, a) in self.points.iter().enumerate() {
            for b in &self.points[i + 1..] {
                let d = (a - b).norm();
                best = Some(best.map_or(d, |m| m.min(d)));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_tags_parse() {
        assert_eq!("linear".parse::<SpacingMode>(), Ok(SpacingMode::Linear));
        assert_eq!(
            "center_exponential".parse::<SpacingMode>(),
            Ok(SpacingMode::CenterExponential)
        );
        assert_eq!("degree".parse::<AngleMode>(), Ok(AngleMode::Degree));
        assert!(matches!(
            "gradian".parse::<AngleMode>(),
            Err(LayoutError::InvalidMode(_))
        ));
        assert!("quadratic".parse::<SpacingMode>().is_err());
    }

    #[test]
    fn tile_validation_rejects_non_positive() {
        assert!(TileDims::new(0.35, 1.34).validate("grid").is_ok());
        assert!(TileDims::new(0.0, 1.34).validate("grid").is_err());
        assert!(TileDims::new(0.35, -1.0).validate("grid").is_err());
        assert!(TileDims::new(f64::NAN, 1.0).validate("grid").is_err());
    }

    #[test]
    fn cfg_validation_bounds_every_field() {
        let ok = LayoutCfg::default();
        assert!(ok.validate("grid").is_ok());
        let max_precision = LayoutCfg {
            precision: LayoutCfg::MAX_PRECISION,
            ..ok
        };
        assert!(max_precision.validate("grid").is_ok());
        let bad = [
            LayoutCfg {
                precision: LayoutCfg::MAX_PRECISION + 1,
                ..ok
            },
            LayoutCfg {
                precision: 400,
                ..ok
            },
            LayoutCfg {
                max_placement_attempts: 0,
                ..ok
            },
            LayoutCfg {
                random_attempts_multiplier: 0,
                ..ok
            },
            LayoutCfg {
                origin_eps: -1e-9,
                ..ok
            },
            LayoutCfg {
                origin_eps: f64::NAN,
                ..ok
            },
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate("grid"), Err(LayoutError::InvalidParams { .. })),
                "{cfg:?}"
            );
        }
    }

    #[test]
    fn jitter_validation() {
        assert!(Jitter::default().validate("grid").is_ok());
        let bad = Jitter {
            stddev_m: 0.1,
            min_separation_factor: 0.0,
            max_attempts: None,
        };
        assert!(bad.validate("grid").is_err());
        let zero_attempts = Jitter {
            max_attempts: Some(0),
            ..Jitter::default()
        };
        assert!(zero_attempts.validate("grid").is_err());
    }

    #[test]
    fn cfg_deserializes_with_defaults() {
        let cfg: LayoutCfg = serde_json::from_str(r#"{"precision": 3}"#).unwrap();
        assert_eq!(cfg.precision, 3);
        assert_eq!(cfg.max_placement_attempts, 10_000);
    }
}
