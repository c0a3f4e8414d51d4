use rand::Rng;
use serde::{Deserialize, Serialize};

use super::shapes::{
    GridParams, HexParams, InterlockingParams, ManualCircularParams, PhyllotaxisParams,
    RandomParams, RhombusParams, RingParams, SpiralParams,
};
use super::{Layout, LayoutCfg, LayoutError, LayoutGenerator, TileDims};

/// Any of the nine generators with its typed parameters.
///
/// Serialized with an internal `"shape"` tag, e.g.
/// `{"shape": "grid", "num_cols": 12, "num_rows": 3}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum LayoutSpec {
    Grid(GridParams),
    Spiral(SpiralParams),
    Ring(RingParams),
    Rhombus(RhombusParams),
    Hex(HexParams),
    Phyllotaxis(PhyllotaxisParams),
    Interlocking(InterlockingParams),
    ManualCircular(ManualCircularParams),
    Random(RandomParams),
}

impl LayoutSpec {
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Grid(_) => GridParams::SHAPE,
            Self::Spiral(_) => SpiralParams::SHAPE,
            Self::Ring(_) => RingParams::SHAPE,
            Self::Rhombus(_) => RhombusParams::SHAPE,
            Self::Hex(_) => HexParams::SHAPE,
            Self::Phyllotaxis(_) => PhyllotaxisParams::SHAPE,
            Self::Interlocking(_) => InterlockingParams::SHAPE,
            Self::ManualCircular(_) => ManualCircularParams::SHAPE,
            Self::Random(_) => RandomParams::SHAPE,
        }
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        tile: &TileDims,
        cfg: &LayoutCfg,
        rng: &mut R,
    ) -> Result<Layout, LayoutError> {
        match self {
            Self::Grid(p) => p.generate(tile, cfg, rng),
            Self::Spiral(p) => p.generate(tile, cfg, rng),
            Self::Ring(p) => p.generate(tile, cfg, rng),
            Self::Rhombus(p) => p.generate(tile, cfg, rng),
            Self::Hex(p) => p.generate(tile, cfg, rng),
            Self::Phyllotaxis(p) => p.generate(tile, cfg, rng),
            Self::Interlocking(p) => p.generate(tile, cfg, rng),
            Self::ManualCircular(p) => p.generate(tile, cfg, rng),
            Self::Random(p) => p.generate(tile, cfg, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SpacingMode;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn tagged_json_fills_defaults() {
        let spec: LayoutSpec = serde_json::from_str(
            r#"{"shape": "grid", "num_cols": 12, "num_rows": 3, "spacing_mode": "center_exponential"}"#,
        )
        .unwrap();
        match &spec {
            LayoutSpec::Grid(p) => {
                assert_eq!(p.num_cols, 12);
                assert_eq!(p.spacing_mode, SpacingMode::CenterExponential);
                assert_eq!(p.spacing_x_factor, 1.0);
                assert!(p.center_layout);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(spec.shape(), "grid");
    }

    #[test]
    fn unknown_mode_tag_is_rejected() {
        let res: Result<LayoutSpec, _> =
            serde_json::from_str(r#"{"shape": "rhombus", "spacing_mode": "quadratic"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn dispatch_matches_direct_call() {
        let params = RingParams::new(vec![4, 8]);
        let cfg = LayoutCfg::default();
        let a = LayoutSpec::Ring(params.clone())
            .generate(&TileDims::BINGO, &cfg, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let b = params
            .generate(&TileDims::BINGO, &cfg, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn round_trips_through_json() {
        let spec = LayoutSpec::ManualCircular(ManualCircularParams::default());
        let text = serde_json::to_string(&spec).unwrap();
        assert!(text.contains(r#""shape":"manual_circular""#));
        let back: LayoutSpec = serde_json::from_str(&text).unwrap();
        assert_eq!(back, spec);
    }
}
