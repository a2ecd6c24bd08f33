use super::EXIT_SUCCESS;
use capp_env_core::{inject, InjectOutcome};
use std::path::Path;
use tracing::debug;

pub fn run(manifest_path: &Path, assignments: &[String]) -> Result<u8, String> {
    match inject(manifest_path, assignments).map_err(|e| e.to_string())? {
        InjectOutcome::Skipped => debug!("manifest left untouched"),
        InjectOutcome::Injected { name, added } => {
            debug!("added {added} env vars to {name}");
        }
    }
    Ok(EXIT_SUCCESS)
}
