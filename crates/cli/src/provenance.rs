use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact: the full run config and the placement report.
pub struct Payload {
    pub params: Value,
    pub report: Value,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            report: Value::Null,
        }
    }

    pub fn with_report(mut self, report: Value) -> Self {
        self.report = report;
        self
    }
}

/// Write `<artifact stem>.provenance.json` next to `artifact`.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "stationgen_version": stationgen::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "report": payload.report,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("layout"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_name_replaces_extension() {
        let derived = provenance_path(Path::new("/tmp/out/layout.txt"));
        assert_eq!(derived, Path::new("/tmp/out/layout.provenance.json"));
    }

    #[test]
    fn sidecar_records_params_and_report() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("layout.txt");
        fs::write(&artifact, "0.000000,0.000000\n").unwrap();
        let payload =
            Payload::new(json!({"seed": 3})).with_report(json!({"placed": 1, "skipped": 0}));
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["seed"], 3);
        assert_eq!(parsed["report"]["placed"], 1);
    }
}
