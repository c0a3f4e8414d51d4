//! Station (outrigger) positions from CSV, grouped by arrangement.
//!
//! Expected headers: `ArrangementName,StationID,Latitude,Longitude,Altitude`.
//! Rows with a missing or non-numeric field are skipped with a warning.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

pub const HEADERS: [&str; 5] = [
    "ArrangementName",
    "StationID",
    "Latitude",
    "Longitude",
    "Altitude",
];

#[derive(Clone, Debug, PartialEq)]
pub struct Station {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// Arrangement name → stations in file order. Arrangements iterate sorted by name.
pub type Arrangements = BTreeMap<String, Vec<Station>>;

fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let s = df
        .column(name)
        .with_context(|| format!("missing column {name}"))?
        .cast(&DataType::String)?;
    Ok(s.str()?
        .into_iter()
        .map(|v| v.map(str::trim).filter(|v| !v.is_empty()).map(String::from))
        .collect())
}

fn number_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let s = df
        .column(name)
        .with_context(|| format!("missing column {name}"))?
        .cast(&DataType::Float64)?;
    Ok(s.f64()?.into_iter().collect())
}

pub fn read_stations(path: &Path) -> Result<Arrangements> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;

    let arrangement = text_column(&df, HEADERS[0])?;
    let id = text_column(&df, HEADERS[1])?;
    let lat = number_column(&df, HEADERS[2])?;
    let lon = number_column(&df, HEADERS[3])?;
    let alt = number_column(&df, HEADERS[4])?;

    let mut out = Arrangements::new();
    for row in 0..df.height() {
        let fields = (
            arrangement[row].clone(),
            id[row].clone(),
            lat[row],
            lon[row],
            alt[row],
        );
        match fields {
            (Some(name), Some(id), Some(latitude), Some(longitude), Some(altitude)) => {
                out.entry(name).or_default().push(Station {
                    id,
                    latitude,
                    longitude,
                    altitude,
                })
            }
            // +2: header line and 1-based numbering
            _ => tracing::warn!(line = row + 2, "skipping incomplete station row"),
        }
    }
    if out.is_empty() {
        bail!("no valid stations in {}", path.display());
    }
    tracing::info!(
        arrangements = out.len(),
        stations = out.values().map(Vec::len).sum::<usize>(),
        "stations loaded"
    );
    Ok(out)
}
