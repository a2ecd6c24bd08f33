//! Env injection pipeline for ContainerApp manifests.
//!
//! This crate ties the schema layer to the command line: `Workspace` locates
//! the manifest a build produced, `parse_assignments` turns `NAME=VALUE`
//! arguments into `EnvAssignment`s, `append_non_secret_env` applies them to
//! `spec.nonSecretEnv`, and `inject` runs load, parse, mutate and write as one
//! linear step.

pub mod assignment;
pub mod mutate;
pub mod workspace;

pub use assignment::{parse_assignments, EnvAssignment};
pub use mutate::append_non_secret_env;
pub use workspace::{Workspace, WORKSPACE_DIR_ENV};

use capp_env_schema::{parse_manifest_file, write_manifest_file};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Manifest(#[from] capp_env_schema::ManifestError),
    #[error("invalid arg: {0}. expected argument in format `NAME=VALUE`")]
    ArgumentFormat(String),
}

/// What an [`inject`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectOutcome {
    /// No arguments were given; the manifest was neither read nor written.
    Skipped,
    /// The manifest was rewritten with `added` new entries.
    Injected { name: String, added: usize },
}

/// Append the `NAME=VALUE` arguments in `args` to the non-secret env of the
/// manifest at `manifest_path` and write it back.
///
/// Any failure aborts before the write, leaving the file as it was.
pub fn inject<S: AsRef<str>>(manifest_path: &Path, args: &[S]) -> Result<InjectOutcome, CoreError> {
    if args.is_empty() {
        info!("No args provided, skipping adding env vars");
        return Ok(InjectOutcome::Skipped);
    }

    debug!("loading manifest {}", manifest_path.display());
    let app = parse_manifest_file(manifest_path)?;
    let name = app.name().to_owned();
    info!("processing {name}");

    let assignments = parse_assignments(args)?;
    let added = assignments.len();
    let app = append_non_secret_env(app, assignments);

    write_manifest_file(manifest_path, &app)?;
    debug!(
        "wrote {} env entries to {}",
        app.spec.non_secret_env.len(),
        manifest_path.display()
    );
    info!("Done.");

    Ok(InjectOutcome::Injected { name, added })
}
