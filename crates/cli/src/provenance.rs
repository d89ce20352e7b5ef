//! Provenance sidecars: `<stem>.provenance.json` next to every artifact the
//! CLI writes, recording the kernel version, code revision, and the inputs
//! needed to reproduce the run.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

/// Sidecar document. `params` is free-form per subcommand.
#[derive(Debug, Serialize)]
pub struct Sidecar {
    pub command: &'static str,
    pub kernel_version: &'static str,
    pub code_rev: String,
    pub callsite: Callsite,
    pub params: Value,
    pub outputs: Vec<String>,
}

impl Sidecar {
    #[track_caller]
    pub fn new(command: &'static str, params: Value) -> Self {
        let at = Location::caller();
        Self {
            command,
            kernel_version: qsim::VERSION,
            code_rev: current_git_rev(),
            callsite: Callsite {
                file: at.file(),
                line: at.line(),
            },
            params,
            outputs: Vec::new(),
        }
    }
}

/// Write the sidecar for `artifact` and return its path.
pub fn write_sidecar(artifact: &Path, mut sidecar: Sidecar) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    sidecar.outputs.push(artifact.to_string_lossy().into_owned());
    fs::write(&path, serde_json::to_vec_pretty(&sidecar)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else "unknown".
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn sidecar_path_replaces_extension() {
        let derived = sidecar_path(Path::new("/tmp/runs/mz.json"));
        assert_eq!(derived, Path::new("/tmp/runs/mz.provenance.json"));
    }

    #[test]
    fn write_sidecar_records_inputs_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("state.json");
        fs::write(&artifact, "{}").unwrap();
        let sidecar = Sidecar::new("run", json!({"layout": "mz.json", "dedup_layers": false}));
        let path = write_sidecar(&artifact, sidecar).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["command"], "run");
        assert_eq!(parsed["kernel_version"], qsim::VERSION);
        assert_eq!(parsed["params"]["layout"], "mz.json");
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert!(parsed["callsite"]["line"].as_u64().unwrap() > 0);
    }
}
