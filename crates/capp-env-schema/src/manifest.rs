use crate::types::{
    ConditionStatus, ContainerAppConditionType, ContentKey, RelatedRefFor, ReplicaConditionType,
    ResourcesKey, UriScheme,
};
use crate::yaml11::quote_yaml11_ambiguous;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Mode of a rewritten manifest: readable by everyone, writable by owner and group.
pub const MANIFEST_FILE_MODE: u32 = 0o664;

/// Keys a record does not model. Kept so they are written back unchanged.
pub type Passthrough = BTreeMap<String, serde_yaml::Value>;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse manifest: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[source] serde_yaml::Error),
    #[error("failed to write manifest {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// A `ContainerApp` custom resource.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerApp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "ObjectMeta::is_empty")]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ContainerAppSpec,
    #[serde(default, skip_serializing_if = "ContainerAppStatus::is_empty")]
    pub status: ContainerAppStatus,
    #[serde(flatten)]
    pub extra: Passthrough,
}

impl ContainerApp {
    /// Resource name: `metadata.name`, or a bare top-level `name` key for
    /// manifests written without object metadata.
    pub fn name(&self) -> &str {
        if let Some(name) = self.metadata.name.as_deref() {
            return name;
        }
        self.extra
            .get("name")
            .and_then(serde_yaml::Value::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

impl ObjectMeta {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.namespace.is_none()
            && self.labels.is_empty()
            && self.annotations.is_empty()
            && self.extra.is_empty()
    }
}

/// Desired state of a `ContainerApp`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerAppSpec {
    /// Short description of the app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Contact information about the app owners.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub contact: BTreeMap<String, String>,
    /// Source repository, revision, build dates and so on.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<ContentKey, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<Build>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Environment independent variables.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_secret_env: Vec<NonSecretEnvVar>,
    /// Environment dependent variables, resolved from secrets at deploy time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secret_env: Vec<SecretEnvVar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i64>,
    /// Per-replica resources, e.g. `cpu` and `memory`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<ResourcesKey, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probes: Option<Probes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_bindings: Vec<ServiceBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_refs: Vec<RelatedRef>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    /// Relative to the location of the manifest.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
    /// Buildpack settings. Not modelled, carried as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buildpacks: Option<Passthrough>,
    /// Build-time variables. Never touched by env injection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_secret_env: Vec<NonSecretEnvVar>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NonSecretEnvVar {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(flatten)]
    pub extra: Passthrough,
}

impl NonSecretEnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            extra: Passthrough::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretEnvVar {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<SecretKeyRef>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SecretKeyRef {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Probes {
    /// The app is restarted when this probe fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness: Option<Probe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness: Option<Probe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup: Option<Probe>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

/// Health probe. Handlers other than `httpGet` land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    #[serde(flatten)]
    pub handler: ProbeHandler,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub initial_delay_seconds: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub timeout_seconds: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub period_seconds: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub success_threshold: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub failure_threshold: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_grace_period_seconds: Option<i64>,
    // Must follow `handler`: the handler takes its keys first.
    #[serde(flatten)]
    pub extra: Passthrough,
}

/// Action taken to determine the health of a container. Inlined into [`Probe`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeHandler {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_get: Option<HttpGetAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpGetAction {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(default)]
    pub port: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<UriScheme>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub http_headers: Vec<HttpHeader>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpHeader {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Port {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub port: i64,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceBinding {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedRef {
    #[serde(default, rename = "for")]
    pub target: RelatedRefFor,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_group: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// JSONPath into the referenced resource. `->` selects into a document
    /// embedded under a single key, e.g. `.data.'values\.yaml'->[yaml].data.replicas`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label_selector: String,
    #[serde(flatten)]
    pub extra: Passthrough,
}

/// Observed state of a `ContainerApp`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContainerAppStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ContainerAppCondition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replicas: Vec<Replica>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

impl ContainerAppStatus {
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.replicas.is_empty() && self.extra.is_empty()
    }
}

/// Fields shared by every condition record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BaseCondition {
    /// One of `True`, `False`, `Unknown`.
    #[serde(default)]
    pub status: ConditionStatus,
    /// Reason for the last transition.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContainerAppCondition {
    #[serde(default, rename = "type")]
    pub kind: ContainerAppConditionType,
    #[serde(flatten)]
    pub base: BaseCondition,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Replica {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Human-readable summary of the app contents running in this replica.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content_summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub availability_target: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ReplicaCondition>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReplicaCondition {
    #[serde(default, rename = "type")]
    pub kind: ReplicaConditionType,
    #[serde(flatten)]
    pub base: BaseCondition,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(v: &i32) -> bool {
    *v == 0
}

pub fn parse_manifest_str(input: &str) -> Result<ContainerApp, ManifestError> {
    Ok(serde_yaml::from_str(input)?)
}

pub fn parse_manifest_file(path: impl AsRef<Path>) -> Result<ContainerApp, ManifestError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest_str(&content)
}

pub fn to_yaml_string(app: &ContainerApp) -> Result<String, ManifestError> {
    let yaml = serde_yaml::to_string(app).map_err(ManifestError::Serialize)?;
    Ok(quote_yaml11_ambiguous(&yaml))
}

/// Serialize `app` and replace the file at `path` with the result.
///
/// The new content is written to a temporary file next to `path`, synced,
/// and renamed over the original, so readers see either the old or the new
/// manifest but never a truncated one.
pub fn write_manifest_file(path: impl AsRef<Path>, app: &ContainerApp) -> Result<(), ManifestError> {
    let path = path.as_ref();
    let yaml = to_yaml_string(app)?;
    let write_err = |source: io::Error| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.write_all(yaml.as_bytes()).map_err(write_err)?;
    set_manifest_permissions(tmp.as_file()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    File::open(&dir)
        .and_then(|d| d.sync_all())
        .map_err(write_err)?;
    Ok(())
}

#[cfg(unix)]
fn set_manifest_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(MANIFEST_FILE_MODE))
}

#[cfg(not(unix))]
fn set_manifest_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
apiVersion: apps.tanzu.vmware.com/v1
kind: ContainerApp
metadata:
  name: petclinic
  creationTimestamp: null
spec:
  description: Spring pet clinic
  contact:
    team: pets
  content:
    summary: git:abc123 @ 2024-05-01
  build:
    path: ..
    buildpacks: {}
    nonSecretEnv:
      - name: BP_JVM_VERSION
        value: "17"
  image: registry.example.com/petclinic@sha256:0123
  nonSecretEnv:
    - name: FOO
      value: bar
  secretEnv:
    - name: DB_PASSWORD
      secretKeyRef:
        name: db
        key: password
  replicas: 2
  resources:
    cpu: 500m
    memory: 1Gi
  probes:
    liveness:
      httpGet:
        path: /actuator/health
        port: 8080
        scheme: HTTP
      initialDelaySeconds: 10
      periodSeconds: 5
  ports:
    - name: main
      port: 8080
  serviceBindings:
    - name: db
      type: postgres
  relatedRefs:
    - for: kubernetes.service-target
      kind: Service
      name: petclinic
status:
  conditions:
    - type: DeploySucceeded
      status: "True"
      reason: Ready
  replicas:
    - name: petclinic-0
      contentSummary: git:abc123
      conditions:
        - type: Running
          status: "True"
"#;

    #[test]
    fn parses_full_manifest() {
        let app = parse_manifest_str(FULL).expect("should parse");
        assert_eq!(app.name(), "petclinic");
        assert_eq!(app.kind.as_deref(), Some("ContainerApp"));
        assert_eq!(app.spec.non_secret_env, vec![NonSecretEnvVar::new("FOO", "bar")]);
        assert_eq!(app.spec.replicas, Some(2));
        assert_eq!(app.spec.resources[&ResourcesKey::cpu()], "500m");
        assert_eq!(
            app.spec.content[&ContentKey::summary()],
            "git:abc123 @ 2024-05-01"
        );

        let build = app.spec.build.as_ref().expect("build section");
        assert_eq!(build.path, "..");
        assert!(build.buildpacks.is_some());
        assert_eq!(build.non_secret_env[0].value, "17");

        let liveness = app
            .spec
            .probes
            .as_ref()
            .and_then(|p| p.liveness.as_ref())
            .expect("liveness probe");
        let http = liveness.handler.http_get.as_ref().expect("httpGet");
        assert_eq!(http.port, 8080);
        assert_eq!(http.scheme.as_deref(), Some(UriScheme::HTTP));
        assert_eq!(liveness.initial_delay_seconds, 10);

        assert_eq!(app.spec.service_bindings[0].kind, "postgres");
        assert!(app.spec.related_refs[0].target.is_well_known());

        let cond = &app.status.conditions[0];
        assert_eq!(cond.kind, ContainerAppConditionType::DEPLOY_SUCCEEDED);
        assert_eq!(cond.base.status, ConditionStatus::TRUE);
        assert_eq!(cond.base.reason, "Ready");
        assert_eq!(
            app.status.replicas[0].conditions[0].kind,
            ReplicaConditionType::RUNNING
        );
    }

    #[test]
    fn parses_minimal_manifest() {
        let app = parse_manifest_str("metadata:\n  name: tiny\nspec: {}\n").expect("should parse");
        assert_eq!(app.name(), "tiny");
        assert!(app.spec.non_secret_env.is_empty());
        assert!(app.status.is_empty());
    }

    #[test]
    fn bare_top_level_name_is_used() {
        let input = "name: flat\nspec:\n  nonSecretEnv:\n    - name: A\n      value: b\n";
        let app = parse_manifest_str(input).expect("should parse");
        assert_eq!(app.name(), "flat");
        assert_eq!(app.spec.non_secret_env.len(), 1);
    }

    #[test]
    fn missing_value_reads_as_empty() {
        let app = parse_manifest_str("spec:\n  nonSecretEnv:\n    - name: EMPTY\n").unwrap();
        assert_eq!(app.spec.non_secret_env[0], NonSecretEnvVar::new("EMPTY", ""));
    }

    #[test]
    fn roundtrip_preserves_known_and_unknown_fields() {
        let input = format!("{FULL}\nextraTop:\n  nested: [1, 2]\n");
        let first = parse_manifest_str(&input).unwrap();
        assert!(first.extra.contains_key("extraTop"));
        assert!(first.metadata.extra.contains_key("creationTimestamp"));

        let yaml = to_yaml_string(&first).unwrap();
        let second = parse_manifest_str(&yaml).unwrap();
        assert_eq!(first, second);
        assert_eq!(to_yaml_string(&second).unwrap(), yaml);
    }

    #[test]
    fn unknown_spec_fields_survive() {
        let input = "spec:\n  futureField:\n    enabled: true\n";
        let app = parse_manifest_str(input).unwrap();
        let yaml = to_yaml_string(&app).unwrap();
        assert!(yaml.contains("futureField"));
        assert!(yaml.contains("enabled: true"));
    }

    #[test]
    fn empty_env_value_is_written() {
        let mut app = ContainerApp::default();
        app.spec
            .non_secret_env
            .push(NonSecretEnvVar::new("EMPTY", ""));
        let yaml = to_yaml_string(&app).unwrap();
        assert!(yaml.contains("name: EMPTY"));
        assert!(yaml.contains("value: ''"));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = parse_manifest_str("spec: [unclosed\n").unwrap_err();
        assert!(matches!(err, ManifestError::ParseYaml(_)));
        assert!(err.to_string().starts_with("failed to parse manifest"));
    }

    #[test]
    fn rejects_schema_mismatch() {
        assert!(parse_manifest_str("spec:\n  nonSecretEnv: notalist\n").is_err());
        assert!(parse_manifest_str("- just\n- a list\n").is_err());
    }

    #[test]
    fn nameless_env_entry_loads() {
        let app = parse_manifest_str("spec:\n  nonSecretEnv:\n    - value: nameless\n").unwrap();
        assert_eq!(app.spec.non_secret_env[0], NonSecretEnvVar::new("", "nameless"));
    }

    #[test]
    fn values_outside_the_known_sets_load_and_survive() {
        let input = r#"
spec:
  probes:
    readiness:
      httpGet:
        port: 8080
        scheme: http
  ports:
    - port: 9090
status:
  conditions:
    - type: Ready
      status: "true"
    - type: Deploying
  replicas:
    - name: r0
      conditions:
        - type: Warming
          status: Unknown
"#;
        let app = parse_manifest_str(input).expect("should parse");
        let http = app
            .spec
            .probes
            .as_ref()
            .and_then(|p| p.readiness.as_ref())
            .and_then(|r| r.handler.http_get.as_ref())
            .expect("httpGet");
        assert_eq!(http.scheme.as_deref(), Some("http"));
        assert_eq!(app.spec.ports[0].name, "");
        assert_eq!(app.spec.ports[0].port, 9090);

        let conditions = &app.status.conditions;
        assert_eq!(conditions[0].kind, "Ready");
        assert_eq!(conditions[0].base.status, "true");
        assert_eq!(conditions[1].kind, ContainerAppConditionType::DEPLOYING);
        assert_eq!(conditions[1].base.status, "");
        let replica_condition = &app.status.replicas[0].conditions[0];
        assert_eq!(replica_condition.kind, "Warming");
        assert_eq!(replica_condition.base.status, ConditionStatus::UNKNOWN);

        let yaml = to_yaml_string(&app).unwrap();
        assert!(yaml.contains("status: 'true'"), "{yaml}");
        assert!(yaml.contains("scheme: http"), "{yaml}");
        assert_eq!(parse_manifest_str(&yaml).unwrap(), app);
    }

    #[test]
    fn nested_unknown_fields_survive() {
        let input = r#"
spec:
  build:
    buildpacks:
      builder: paketo
      env:
        - name: X
    cache: true
    nonSecretEnv:
      - name: BP
        value: x
        description: build-only
  nonSecretEnv:
    - name: FOO
      value: bar
      description: keep-me
  secretEnv:
    - name: S
      secretKeyRef:
        name: s
        key: k
        optional: true
  probes:
    liveness:
      exec:
        command: [cat, /tmp/healthy]
      periodSeconds: 5
    readiness:
      httpGet:
        port: 8080
        httpHeaders:
          - name: X-Health
            value: "1"
            note: kept
        extension: kept
  ports:
    - name: main
      port: 8080
      protocol: TCP
  serviceBindings:
    - name: db
      type: postgres
      optional: true
  relatedRefs:
    - for: kubernetes.service-target
      kind: Service
      namespace: apps
status:
  conditions:
    - type: DeploySucceeded
      status: "True"
      lastTransitionTime: "2024-05-01T00:00:00Z"
  replicas:
    - name: r0
      zone: a
      conditions:
        - type: Running
          status: "True"
          observedGeneration: 3
"#;
        let app = parse_manifest_str(input).expect("should parse");
        assert_eq!(
            app.spec.non_secret_env[0].extra["description"],
            serde_yaml::Value::from("keep-me")
        );
        let build = app.spec.build.as_ref().expect("build section");
        let buildpacks = build.buildpacks.as_ref().expect("buildpacks");
        assert_eq!(buildpacks["builder"], serde_yaml::Value::from("paketo"));
        assert!(build.extra.contains_key("cache"));
        let liveness = app
            .spec
            .probes
            .as_ref()
            .and_then(|p| p.liveness.as_ref())
            .expect("liveness");
        assert!(liveness.extra.contains_key("exec"));
        assert!(liveness.handler.http_get.is_none());
        assert_eq!(liveness.period_seconds, 5);

        let yaml = to_yaml_string(&app).unwrap();
        for key in [
            "description: keep-me",
            "description: build-only",
            "builder: paketo",
            "cache: true",
            "optional: true",
            "- /tmp/healthy",
            "note: kept",
            "extension: kept",
            "protocol: TCP",
            "namespace: apps",
            "lastTransitionTime:",
            "zone: a",
            "observedGeneration: 3",
        ] {
            assert!(yaml.contains(key), "missing {key:?} in:\n{yaml}");
        }
        assert_eq!(parse_manifest_str(&yaml).unwrap(), app);
    }

    #[test]
    fn yaml11_boolean_words_are_written_quoted() {
        let mut app = ContainerApp::default();
        for (name, value) in [("A", "on"), ("B", "yes"), ("C", "n"), ("D", "1_000")] {
            app.spec
                .non_secret_env
                .push(NonSecretEnvVar::new(name, value));
        }
        let yaml = to_yaml_string(&app).unwrap();
        assert!(yaml.contains("value: 'on'"), "{yaml}");
        assert!(yaml.contains("value: 'yes'"), "{yaml}");
        assert!(yaml.contains("value: 'n'"), "{yaml}");
        assert!(yaml.contains("value: '1_000'"), "{yaml}");
        assert_eq!(parse_manifest_str(&yaml).unwrap(), app);
    }

    #[test]
    fn read_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("containerapp.yml");
        let err = parse_manifest_file(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
        assert!(err.to_string().contains("containerapp.yml"));
        assert!(!path.exists());
    }

    #[test]
    fn write_replaces_file_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("containerapp.yml");
        fs::write(&path, FULL).unwrap();

        let mut app = parse_manifest_file(&path).unwrap();
        app.spec
            .non_secret_env
            .push(NonSecretEnvVar::new("BAZ", "qux"));
        write_manifest_file(&path, &app).unwrap();

        let reread = parse_manifest_file(&path).unwrap();
        assert_eq!(reread, app);
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1, "temp file must not be left behind");
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_group_writable_and_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("containerapp.yml");
        write_manifest_file(&path, &ContainerApp::default()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, MANIFEST_FILE_MODE);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone").join("containerapp.yml");
        let err = write_manifest_file(&path, &ContainerApp::default()).unwrap_err();
        assert!(matches!(err, ManifestError::Write { .. }));
    }
}
