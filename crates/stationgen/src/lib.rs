//! Station layout generation for tiled radio-telescope stations.
//!
//! A station is a set of identical rectangular tiles; this crate computes the
//! 2-D positions (meters, station-local frame) of the tile centers, plus the
//! fixed antenna pattern inside one tile.
//!
//! Layout
//! - `geometry`: numeric helpers (rounding, centering, center-exponential rescale).
//! - `layout`: the nine generators, the shared pipeline and named presets.
//! - `tile`: intra-tile antenna positions.
//! - `api`: curated re-exports for the CLI.

pub mod api;
pub mod geometry;
pub mod layout;
pub mod tile;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common imports for callers that generate layouts.
pub mod prelude {
    pub use crate::layout::{
        Jitter, LatticeLayout, Layout, LayoutCfg, LayoutError, LayoutGenerator, LayoutSpec,
        PlacementReport, SpacingMode, TileDims,
    };
    pub use crate::tile::{antenna_layout, TileAntennaCfg};
    pub use nalgebra::Vector2 as Vec2;
}
