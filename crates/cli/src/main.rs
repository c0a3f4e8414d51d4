use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use stationgen::api::{antenna_layout, catalogue, Layout, TileDims};
use stationgen::Vec2;
use tracing_subscriber::fmt::SubscriberBuilder;

mod config;
mod oskar;
mod provenance;
mod stations;

use config::RunConfig;
use oskar::{format_xy, write_telescopes, RefPosition, TelescopeModel};

#[derive(Parser)]
#[command(name = "stationgen")]
#[command(about = "Station layout generator and OSKAR telescope writer")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate one station layout and write `x,y` lines plus a provenance sidecar
    Generate {
        /// JSON run config; mutually exclusive with --preset
        #[arg(long, conflicts_with = "preset")]
        config: Option<PathBuf>,
        #[arg(long)]
        preset: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write OSKAR telescope folders for every (layout, arrangement) pair
    Telescope {
        /// CSV with ArrangementName,StationID,Latitude,Longitude,Altitude
        #[arg(long)]
        stations: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        /// Run config to use instead of presets
        #[arg(long, conflicts_with = "preset")]
        config: Option<PathBuf>,
        /// Preset names (repeatable); all presets when omitted
        #[arg(long)]
        preset: Vec<String>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the preset catalogue as JSON
    Presets,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            config,
            preset,
            seed,
            out,
        } => {
            let run = resolve(config.as_deref(), preset.as_deref())?.with_seed(seed);
            generate(&run, &out)
        }
        Action::Telescope {
            stations,
            out_dir,
            config,
            preset,
            seed,
        } => {
            let runs = match config {
                Some(path) => vec![RunConfig::load(&path)?],
                None if preset.is_empty() => catalogue(&TileDims::default())
                    .into_iter()
                    .map(|p| RunConfig::from_preset(&p.name))
                    .collect::<Result<_>>()?,
                None => preset
                    .iter()
                    .map(|name| RunConfig::from_preset(name))
                    .collect::<Result<_>>()?,
            };
            let runs: Vec<_> = runs.into_iter().map(|r| r.with_seed(seed)).collect();
            telescope(&stations, &out_dir, &runs)
        }
        Action::Presets => presets(),
    }
}

fn resolve(config: Option<&Path>, preset: Option<&str>) -> Result<RunConfig> {
    match (config, preset) {
        (Some(path), _) => RunConfig::load(path),
        (None, Some(name)) => RunConfig::from_preset(name),
        (None, None) => bail!("one of --config or --preset is required"),
    }
}

fn build(run: &RunConfig) -> Result<Layout> {
    let mut rng = StdRng::seed_from_u64(run.seed);
    let layout = run
        .layout
        .generate(&run.tile, &run.cfg, &mut rng)
        .with_context(|| format!("generating {}", run.layout_name()))?;
    Ok(layout)
}

fn generate(run: &RunConfig, out: &Path) -> Result<()> {
    tracing::info!(name = %run.layout_name(), seed = run.seed, out = %out.display(), "generate");
    let layout = build(run)?;
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(out, format_xy(&layout.points))
        .with_context(|| format!("writing {}", out.display()))?;
    let payload = provenance::Payload::new(serde_json::to_value(run)?)
        .with_report(serde_json::to_value(&layout.report)?);
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn telescope(stations_csv: &Path, out_dir: &Path, runs: &[RunConfig]) -> Result<()> {
    let arrangements = stations::read_stations(stations_csv)?;
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let mut written = 0usize;
    for run in runs {
        let name = run.layout_name();
        let layout = build(run)?;
        if layout.is_empty() {
            tracing::warn!(%name, "layout has no tiles; skipping");
            continue;
        }
        let tile: Vec<Vec2<f64>> = antenna_layout(&run.tile_antennas)?;
        let model = TelescopeModel {
            layout_name: &name,
            station: &layout.points,
            tile: &tile,
            position: RefPosition::default(),
        };
        written += write_telescopes(out_dir, &model, &arrangements)?.len();
    }
    tracing::info!(layouts = runs.len(), telescopes = written, "telescope done");
    Ok(())
}

fn presets() -> Result<()> {
    let tile = TileDims::default();
    let doc: serde_json::Map<String, serde_json::Value> = catalogue(&tile)
        .into_iter()
        .map(|p| -> Result<(String, serde_json::Value)> {
            Ok((p.name, serde_json::to_value(&p.spec)?))
        })
        .collect::<Result<_>>()?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn generate_writes_layout_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested/layout.txt");
        let run = RunConfig::from_preset("square_default").unwrap();
        generate(&run, &out).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 36);
        assert!(dir.path().join("nested/layout.provenance.json").exists());
    }

    #[test]
    fn same_seed_same_file() {
        let dir = tempdir().unwrap();
        let run = RunConfig::from_preset("rhombus_random").unwrap().with_seed(Some(5));
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        generate(&run, &a).unwrap();
        generate(&run, &b).unwrap();
        assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap());
    }

    #[test]
    fn telescope_writes_one_folder_per_pair() {
        let dir = tempdir().unwrap();
        let csv = dir.path().join("stations.csv");
        fs::write(
            &csv,
            "ArrangementName,StationID,Latitude,Longitude,Altitude\n\
             Core,S1,-7.0,-38.0,400.0\n\
             Ring B,S2,-7.1,-38.1,401.0\n",
        )
        .unwrap();
        let out = dir.path().join("telescopes");
        let runs = vec![
            RunConfig::from_preset("circle_default").unwrap(),
            RunConfig::from_preset("spiral_spaced").unwrap(),
        ];
        telescope(&csv, &out, &runs).unwrap();
        for folder in [
            "circle_default_core",
            "circle_default_ring_b",
            "spiral_spaced_core",
            "spiral_spaced_ring_b",
        ] {
            let tile = out.join(folder).join("station/tile/layout.txt");
            let text = fs::read_to_string(&tile).unwrap();
            assert_eq!(text.lines().count(), 64, "{folder}");
        }
    }

    #[test]
    fn resolve_needs_a_source() {
        assert!(resolve(None, None).is_err());
        assert!(resolve(None, Some("spiral_default")).is_ok());
    }
}
