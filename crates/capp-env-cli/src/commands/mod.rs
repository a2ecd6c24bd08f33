pub mod inject;

use capp_env_core::Workspace;
use std::path::{Path, PathBuf};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Exit code for a finished command. Failures are reported on stderr.
pub fn exit_code(result: Result<u8, String>) -> u8 {
    match result {
        Ok(code) => code,
        Err(msg) => {
            eprintln!("error: {msg}");
            EXIT_FAILURE
        }
    }
}

/// Exit code for a command line clap refused. `--help` and `--version`
/// surface as errors too but are successful runs.
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        EXIT_FAILURE
    } else {
        EXIT_SUCCESS
    }
}

/// An explicit `--manifest` wins; otherwise the manifest sits in the
/// workspace output directory. No workspace means the current directory.
pub fn resolve_manifest_path(manifest: Option<PathBuf>, workspace_dir: Option<&Path>) -> PathBuf {
    manifest.unwrap_or_else(|| {
        Workspace::new(workspace_dir.unwrap_or_else(|| Path::new(""))).manifest_path()
    })
}
