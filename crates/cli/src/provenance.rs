//! Provenance sidecars: every artifact the CLI writes (vertex lists, rasters,
//! projections, sampled tables) gets a `<stem>.provenance.json` next to it
//! recording the code revision, library version, subcommand, run tag,
//! callsite and parameters.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What a subcommand wants recorded about one artifact.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
    pub tag: Option<String>,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self {
            command,
            params,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    polywalk_version: &'static str,
    command: &'a str,
    tag: Option<&'a str>,
    callsite: Callsite,
    params: &'a Value,
    outputs: [String; 1],
}

/// Write the sidecar for `artifact` and return its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let callsite = Location::caller();
    let path = provenance_path(artifact);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let doc = Sidecar {
        code_rev: current_git_rev(),
        polywalk_version: polywalk::VERSION,
        command: payload.command,
        tag: payload.tag.as_deref(),
        callsite: Callsite {
            file: callsite.file(),
            line: callsite.line(),
        },
        params: &payload.params,
        outputs: [artifact.to_string_lossy().into_owned()],
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(sidecar = %path.display(), command = payload.command, "provenance_written");
    Ok(path)
}

/// `dir/vertices.json` -> `dir/vertices.provenance.json`.
fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact.file_stem().unwrap_or(OsStr::new("artifact"));
    let mut name = stem.to_os_string();
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Revision from `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    let pinned = option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .into_iter()
        .chain(std::env::var("GIT_COMMIT").ok())
        .find(|rev| !rev.is_empty());
    pinned
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            out.status.success().then_some(())?;
            String::from_utf8(out.stdout).ok().map(|s| s.trim().to_owned())
        })
        .unwrap_or_else(|| "unknown".to_owned())
}
