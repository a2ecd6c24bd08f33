mod commands;

use capp_env_core::WORKSPACE_DIR_ENV;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "capp-env",
    version,
    about = "Append non-secret environment variables to a ContainerApp manifest"
)]
struct Cli {
    /// Build workspace root; the manifest is read from <DIR>/output/containerapp.yml.
    #[arg(long, value_name = "DIR", env = WORKSPACE_DIR_ENV)]
    workspace_dir: Option<PathBuf>,

    /// Manifest to rewrite, overriding the workspace location.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false)]
    trace: bool,

    /// Variables to append to spec.nonSecretEnv. Tokens starting with `-`
    /// that are not flags of this command are taken as assignments.
    #[arg(value_name = "NAME=VALUE", allow_hyphen_values = true)]
    assignments: Vec<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(commands::usage_exit_code(&err));
        }
    };

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("CAPP_ENV_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();

    let manifest_path =
        commands::resolve_manifest_path(cli.manifest, cli.workspace_dir.as_deref());

    ExitCode::from(commands::exit_code(commands::inject::run(
        &manifest_path,
        &cli.assignments,
    )))
}
