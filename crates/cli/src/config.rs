//! JSON run configuration: `{ "name", "tile", "cfg", "seed", "tile_antennas", "layout" }`.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stationgen::api::{preset, LayoutCfg, LayoutSpec, TileAntennaCfg, TileDims};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Used for output folder names; defaults to the shape name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tile: TileDims,
    #[serde(default)]
    pub cfg: LayoutCfg,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub tile_antennas: TileAntennaCfg,
    pub layout: LayoutSpec,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Config for a named preset with default tile and pipeline settings.
    pub fn from_preset(name: &str) -> Result<Self> {
        let tile = TileDims::default();
        let p = preset(name, &tile).ok_or_else(|| anyhow!("unknown preset {name:?}"))?;
        Ok(Self {
            name: Some(p.name),
            tile,
            cfg: LayoutCfg::default(),
            seed: 0,
            tile_antennas: TileAntennaCfg::default(),
            layout: p.spec,
        })
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if let Some(s) = seed {
            self.seed = s;
        }
        self
    }

    pub fn layout_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.layout.shape().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn minimal_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, r#"{"layout": {"shape": "hex", "num_rings_hex": 2}}"#).unwrap();
        let cfg = RunConfig::load(&path).unwrap();
        assert_eq!(cfg.tile, TileDims::BINGO);
        assert_eq!(cfg.cfg.precision, 6);
        assert_eq!(cfg.seed, 0);
        assert_eq!(cfg.layout_name(), "hex");
    }

    #[test]
    fn seed_override_wins() {
        let cfg = RunConfig::from_preset("square_random").unwrap().with_seed(Some(9));
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.layout_name(), "square_random");
        assert_eq!(cfg.clone().with_seed(None).seed, 9);
    }

    #[test]
    fn unknown_preset_and_bad_json_fail() {
        assert!(RunConfig::from_preset("blob_default").is_err());
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"layout": {"shape": "pentagon"}}"#).unwrap();
        assert!(RunConfig::load(&path).is_err());
    }
}
