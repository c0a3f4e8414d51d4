//! Curated surface used by the CLI (unstable, internal).

// Layout model
pub use crate::layout::{
    AngleMode, Jitter, LatticeLayout, Layout, LayoutCfg, LayoutError, LayoutGenerator, LayoutSpec,
    PlacementReport, SpacingMode, TileDims, MAX_TILES,
};
// Presets
pub use crate::layout::presets::{catalogue, preset, Preset, SHAPES, VARIANTS};
// Tile internals
pub use crate::tile::{antenna_layout, TileAntennaCfg, ANTENNAS_PER_SUBGROUP};
// Numeric helpers
pub use crate::geometry::{round_coords, tile_diagonal};
