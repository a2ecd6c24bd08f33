//! ContainerApp manifest model and YAML persistence for capp-env.
//!
//! This crate defines the schema layer: the typed `ContainerApp` custom
//! resource (`ContainerApp`, `ContainerAppSpec`, status and condition records),
//! YAML parsing (`parse_manifest_file`), serialization (`to_yaml_string`), and
//! in-place replacement of a manifest on disk (`write_manifest_file`). Fields
//! the model does not name are carried through unchanged, and strings that
//! YAML 1.1 readers would retype are written quoted.

pub mod manifest;
pub mod types;
mod yaml11;

pub use manifest::{
    parse_manifest_file, parse_manifest_str, to_yaml_string, write_manifest_file, BaseCondition,
    Build, ContainerApp, ContainerAppCondition, ContainerAppSpec, ContainerAppStatus,
    HttpGetAction, HttpHeader, ManifestError, NonSecretEnvVar, ObjectMeta, Passthrough, Port,
    Probe, ProbeHandler, Probes, RelatedRef, Replica, ReplicaCondition, SecretEnvVar,
    SecretKeyRef, ServiceBinding, MANIFEST_FILE_MODE,
};
pub use types::{
    ConditionStatus, ContainerAppConditionType, ContentKey, RelatedRefFor, ReplicaConditionType,
    ResourcesKey, UriScheme,
};
