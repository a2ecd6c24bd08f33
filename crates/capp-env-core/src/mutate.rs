use crate::assignment::EnvAssignment;
use capp_env_schema::{ContainerApp, NonSecretEnvVar};
use tracing::info;

/// Append each assignment to `spec.nonSecretEnv`, after the existing entries
/// and in the given order. Nothing is removed or merged: a name that is
/// already present ends up listed twice.
pub fn append_non_secret_env<I>(mut app: ContainerApp, assignments: I) -> ContainerApp
where
    I: IntoIterator<Item = EnvAssignment>,
{
    for EnvAssignment { name, value } in assignments {
        info!("will add env {name}={value}");
        app.spec
            .non_secret_env
            .push(NonSecretEnvVar::new(name, value));
    }
    app
}
