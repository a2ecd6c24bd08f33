//! Newtype wrappers for the string-valued keys and enums of the ContainerApp schema.
//!
//! The resource definition treats these as open string sets: a handful of
//! well-known values exist, but any other string must survive a round trip,
//! since validation happens in the control plane and not here.
//! All newtypes serialize/deserialize as plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new instance from a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Return the inner string as a slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume self and return the inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

string_newtype!(
    /// Key of `spec.content`. The list of keys is open; `summary` always exists.
    ContentKey
);

string_newtype!(
    /// Key of `spec.resources`, e.g. `cpu` or `memory`.
    ResourcesKey
);

string_newtype!(
    /// Kind of reference a `RelatedRef` points at.
    RelatedRefFor
);

string_newtype!(
    /// Scheme of an HTTP probe, `HTTP` or `HTTPS`.
    UriScheme
);

string_newtype!(
    /// `status` of a condition: `True`, `False` or `Unknown`.
    ConditionStatus
);

string_newtype!(
    /// `type` of a ContainerApp condition.
    ContainerAppConditionType
);

string_newtype!(
    /// `type` of a replica condition.
    ReplicaConditionType
);

impl UriScheme {
    pub const HTTP: &'static str = "HTTP";
    pub const HTTPS: &'static str = "HTTPS";
}

impl ConditionStatus {
    pub const TRUE: &'static str = "True";
    pub const FALSE: &'static str = "False";
    pub const UNKNOWN: &'static str = "Unknown";
}

impl ContainerAppConditionType {
    pub const DEPLOYING: &'static str = "Deploying";
    pub const DEPLOY_SUCCEEDED: &'static str = "DeploySucceeded";
    pub const DEPLOY_FAILED: &'static str = "DeployFailed";
}

impl ReplicaConditionType {
    pub const INITIALIZING: &'static str = "Initializing";
    pub const RUNNING: &'static str = "Running";
    pub const SUCCEEDED: &'static str = "Succeeded";
    pub const FAILED: &'static str = "Failed";
}

impl ContentKey {
    pub const SUMMARY: &'static str = "summary";

    pub fn summary() -> Self {
        Self::new(Self::SUMMARY)
    }
}

impl ResourcesKey {
    pub const CPU: &'static str = "cpu";
    pub const MEMORY: &'static str = "memory";

    pub fn cpu() -> Self {
        Self::new(Self::CPU)
    }

    pub fn memory() -> Self {
        Self::new(Self::MEMORY)
    }
}

impl RelatedRefFor {
    pub const KUBERNETES_LIST_REPLICAS: &'static str = "kubernetes.list-replicas";
    pub const KUBERNETES_SET_SECRET_ENV: &'static str = "kubernetes.set-secret-env";
    pub const KUBERNETES_SCALE_REPLICAS: &'static str = "kubernetes.scale-replicas";
    pub const KUBERNETES_SCALE_RESOURCES: &'static str = "kubernetes.scale-resources";
    pub const KUBERNETES_SERVICE_BINDING_TARGET: &'static str =
        "kubernetes.service-binding-target";
    pub const KUBERNETES_SERVICE_TARGET: &'static str = "kubernetes.service-target";

    /// Whether this is one of the reference kinds the platform defines.
    pub fn is_well_known(&self) -> bool {
        matches!(
            self.as_str(),
            Self::KUBERNETES_LIST_REPLICAS
                | Self::KUBERNETES_SET_SECRET_ENV
                | Self::KUBERNETES_SCALE_REPLICAS
                | Self::KUBERNETES_SCALE_RESOURCES
                | Self::KUBERNETES_SERVICE_BINDING_TARGET
                | Self::KUBERNETES_SERVICE_TARGET
        )
    }
}
