//! OSKAR telescope-model folders.
//!
//! For layout `L` and arrangement `A` the folder `<out>/<L>_<a>` holds:
//! - `layout_wgs84.txt`: station positions, `lat,lon,alt`
//! - `position.txt`: reference position of the array
//! - `station/layout.txt`: tile centers, `x,y` in meters
//! - `station/tile/layout.txt`: antenna offsets inside one tile

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use stationgen::Vec2;

use crate::stations::{Arrangements, Station};

/// Decimal places for local `x,y` coordinates.
pub const XY_PRECISION: usize = 6;
const LAT_LON_PRECISION: usize = 7;
const ALT_PRECISION: usize = 1;

/// WGS84 reference position of the array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Default for RefPosition {
    /// BINGO central site.
    fn default() -> Self {
        Self {
            latitude: -7.04067,
            longitude: -38.26884,
            altitude: 396.4,
        }
    }
}

pub fn format_xy(points: &[Vec2<f64>]) -> String {
    points
        .iter()
        .map(|p| format!("{:.prec$},{:.prec$}\n", p.x, p.y, prec = XY_PRECISION))
        .collect()
}

fn format_wgs84_line(lat: f64, lon: f64, alt: f64) -> String {
    format!(
        "{lat:.ll$},{lon:.ll$},{alt:.a$}\n",
        ll = LAT_LON_PRECISION,
        a = ALT_PRECISION
    )
}

pub fn format_wgs84(stations: &[Station]) -> String {
    stations
        .iter()
        .map(|st| format_wgs84_line(st.latitude, st.longitude, st.altitude))
        .collect()
}

pub fn format_position(pos: &RefPosition) -> String {
    format_wgs84_line(pos.latitude, pos.longitude, pos.altitude)
}

/// `<layout>_<arrangement>` with the arrangement lower-cased and spaces as `_`.
pub fn telescope_folder_name(layout: &str, arrangement: &str) -> String {
    format!("{layout}_{}", arrangement.replace(' ', "_").to_lowercase())
}

/// Everything shared by the folders of one station layout.
pub struct TelescopeModel<'a> {
    pub layout_name: &'a str,
    pub station: &'a [Vec2<f64>],
    pub tile: &'a [Vec2<f64>],
    pub position: RefPosition,
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}

/// Write one telescope folder per arrangement; returns the folders created.
pub fn write_telescopes(
    out_dir: &Path,
    model: &TelescopeModel<'_>,
    arrangements: &Arrangements,
) -> Result<Vec<PathBuf>> {
    let station_txt = format_xy(model.station);
    let tile_txt = format_xy(model.tile);
    let position_txt = format_position(&model.position);

    let mut created = Vec::with_capacity(arrangements.len());
    for (name, stations) in arrangements {
        let root = out_dir.join(telescope_folder_name(model.layout_name, name));
        let tile_dir = root.join("station").join("tile");
        fs::create_dir_all(&tile_dir)
            .with_context(|| format!("creating {}", tile_dir.display()))?;

        write_file(&root.join("layout_wgs84.txt"), &format_wgs84(stations))?;
        write_file(&root.join("position.txt"), &position_txt)?;
        write_file(&root.join("station").join("layout.txt"), &station_txt)?;
        write_file(&tile_dir.join("layout.txt"), &tile_txt)?;
        tracing::info!(
            folder = %root.display(),
            stations = stations.len(),
            tiles = model.station.len(),
            "telescope written"
        );
        created.push(root);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn xy_uses_six_decimals() {
        let s = format_xy(&[Vec2::new(1.0, -0.25), Vec2::new(0.1234567, 2.0)]);
        assert_eq!(s, "1.000000,-0.250000\n0.123457,2.000000\n");
        assert_eq!(format_xy(&[]), "");
    }

    #[test]
    fn position_line_matches_reference() {
        assert_eq!(
            format_position(&RefPosition::default()),
            "-7.0406700,-38.2688400,396.4\n"
        );
    }

    #[test]
    fn wgs84_writes_one_line_per_station() {
        let station = |id: &str, latitude, longitude, altitude| Station {
            id: id.into(),
            latitude,
            longitude,
            altitude,
        };
        let s = format_wgs84(&[
            station("S1", -7.5, -38.0, 400.0),
            station("S2", -7.04067, -38.26884, 396.44),
        ]);
        assert_eq!(
            s,
            "-7.5000000,-38.0000000,400.0\n-7.0406700,-38.2688400,396.4\n"
        );
        assert_eq!(format_wgs84(&[]), "");
    }

    #[test]
    fn folder_names_are_normalized() {
        assert_eq!(
            telescope_folder_name("square_default", "50km A"),
            "square_default_50km_a"
        );
    }

    #[test]
    fn writes_full_tree_per_arrangement() {
        let dir = tempdir().unwrap();
        let mut arr = Arrangements::new();
        arr.insert(
            "Core".into(),
            vec![Station {
                id: "S1".into(),
                latitude: -7.5,
                longitude: -38.0,
                altitude: 400.0,
            }],
        );
        arr.insert("Far Out".into(), Vec::new());
        let station = [Vec2::new(0.0, 0.0), Vec2::new(1.5, 0.0)];
        let tile = [Vec2::new(0.05, 0.0)];
        let model = TelescopeModel {
            layout_name: "hex",
            station: &station,
            tile: &tile,
            position: RefPosition::default(),
        };
        let created = write_telescopes(dir.path(), &model, &arr).unwrap();
        assert_eq!(created.len(), 2);

        let core = dir.path().join("hex_core");
        assert_eq!(
            fs::read_to_string(core.join("layout_wgs84.txt")).unwrap(),
            "-7.5000000,-38.0000000,400.0\n"
        );
        assert_eq!(
            fs::read_to_string(core.join("station/layout.txt")).unwrap(),
            "0.000000,0.000000\n1.500000,0.000000\n"
        );
        assert!(core.join("station/tile/layout.txt").exists());
        assert!(dir.path().join("hex_far_out/position.txt").exists());
    }
}
