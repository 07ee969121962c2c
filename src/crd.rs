// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definitions (CRDs) for machine OS builds and DNS name resolution.
//!
//! This module defines the Kubernetes Custom Resource Definitions and the value
//! types they are built from. The types carry no controller logic; lifecycle rules
//! live in [`crate::resolver_cache`] and [`crate::build_status`].
//!
//! # Resource Types
//!
//! ## Machine Configuration
//!
//! - [`MachineOSBuild`] - Tracks an OS image build for a machine config pool (cluster scoped)
//!
//! ## Networking
//!
//! - [`DNSNameResolver`] - Caches DNS resolution results of a regular or wildcard DNS name
//!
//! # Example: Creating a DNS Name Resolver
//!
//! ```rust,no_run
//! use openshift_crds::crd::{DNSNameResolver, DNSNameResolverSpec};
//!
//! let resolver = DNSNameResolver::new(
//!     "wildcard-example",
//!     DNSNameResolverSpec {
//!         name: "*.example.com.".to_string(),
//!     },
//! );
//! ```
//!
//! # Example: Creating a Machine OS Build
//!
//! ```rust,no_run
//! use openshift_crds::crd::{
//!     BuildInputs, ImageSecretObjectReference, MachineConfigPoolReference,
//!     MachineOSBuildSpec, MachineOSImageBuilderType,
//! };
//!
//! let spec = MachineOSBuildSpec {
//!     machine_config_pool: MachineConfigPoolReference { name: "worker".to_string() },
//!     build_inputs: BuildInputs {
//!         image_builder_type: MachineOSImageBuilderType::PodImageBuilder,
//!         base_os_image_url: "quay.io/openshift/rhcos:latest".to_string(),
//!         base_image_pull_secret: "global-pull-secret".to_string(),
//!         final_image_push_secret: ImageSecretObjectReference { name: "push-secret".to_string() },
//!         final_image_pull_secret: ImageSecretObjectReference { name: "pull-secret".to_string() },
//!         containerfile: b"FROM configs AS final\nRUN rpm-ostree install tmux".to_vec(),
//!         final_image_pullspec: "https://registry.example.com/os/worker".to_string(),
//!     },
//!     current_config: "rendered-worker-aaa".to_string(),
//!     desired_config: "rendered-worker-bbb".to_string(),
//! };
//! assert!(spec.needs_build());
//! ```

use crate::constants::{DNS_NAME_PATTERN, IP_ADDRESS_PATTERN};
use chrono::{DateTime, Utc};
use kube::{CustomResource, KubeSchema};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Condition represents an observation of a resource's current state.
///
/// Conditions are used in status subresources to communicate the state of
/// a resource to users and controllers.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition, e.g. `Degraded` for resolved DNS names or `Building` for builds.
    pub r#type: String,

    /// Status of the condition: True, False, or Unknown.
    pub status: String,

    /// The `.metadata.generation` the condition was set based upon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// Brief CamelCase reason for the condition's last transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message indicating details about the transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Last time the condition transitioned from one status to another (RFC3339 format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

// ============================================================================
// DNSNameResolver
// ============================================================================

/// `DNSNameResolver` stores the DNS name resolution information of a DNS name.
///
/// For a regular DNS name only the resolution information of that name is stored.
/// For a wildcard DNS name the resolution information of every DNS name matching
/// the wildcard is stored. The `*` matches exactly one label and may only appear at
/// the beginning of the name: `*.example.com.` matches `sub1.example.com.` but not
/// `sub2.sub1.example.com.`.
///
/// # Example
///
/// ```yaml
/// apiVersion: network.openshift.io/v1alpha1
/// kind: DNSNameResolver
/// metadata:
///   name: wildcard-example
///   namespace: openshift-ovn-kubernetes
/// spec:
///   name: "*.example.com."
/// status:
///   resolvedNames:
///     - dnsName: www.example.com.
///       resolvedAddresses:
///         - ip: 192.0.2.10
///           ttlSeconds: 30
///           lastLookupTime: "2025-01-01T00:00:00Z"
/// ```
#[derive(CustomResource, KubeSchema, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[kube(
    group = "network.openshift.io",
    version = "v1alpha1",
    kind = "DNSNameResolver",
    namespaced,
    derive = "PartialEq",
    doc = "DNSNameResolver stores the DNS name resolution information of a DNS name. Compatibility level 4: No compatibility is provided, the API can change at any point for any reason."
)]
#[kube(status = "DNSNameResolverStatus")]
#[kube(printcolumn = r#"{"name":"Name","type":"string","jsonPath":".spec.name"}"#)]
#[serde(rename_all = "camelCase")]
pub struct DNSNameResolverSpec {
    /// DNS name for which the DNS name resolution information will be stored.
    ///
    /// Must be fully qualified (end with a dot). A single `*` label is allowed at
    /// the beginning for wildcard names. This field is immutable.
    #[schemars(regex(pattern = DNS_NAME_PATTERN))]
    #[schemars(length(max = 254))]
    #[x_kube(validation = Rule::new("self == oldSelf").message("spec.name is immutable"))]
    pub name: String,
}

/// `DNSNameResolver` status
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, KubeSchema)]
#[serde(rename_all = "camelCase")]
pub struct DNSNameResolverStatus {
    /// Matching DNS names and their corresponding IP addresses along with TTL and
    /// last DNS lookup time. Keyed by `dnsName`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[x_kube(merge_strategy = ListMerge::Map(vec!["dnsName".into()]))]
    pub resolved_names: Vec<DNSNameResolverStatusItem>,
}

/// Details of a resolved DNS name.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, KubeSchema)]
#[serde(rename_all = "camelCase")]
pub struct DNSNameResolverStatusItem {
    /// State of the DNS name. Known condition type: `Degraded`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[x_kube(merge_strategy = ListMerge::Map(vec!["type".into()]))]
    pub conditions: Vec<Condition>,

    /// The resolved DNS name matching `spec.name`.
    ///
    /// For a regular `spec.name` this is the same name. For a wildcard `spec.name`
    /// this is any regular name matching the wildcard, or the wildcard itself when
    /// the wildcard can be resolved.
    #[schemars(regex(pattern = DNS_NAME_PATTERN))]
    #[schemars(length(max = 254))]
    pub dns_name: String,

    /// Associated IP addresses and their TTLs and last lookup times. Keyed by `ip`.
    #[x_kube(merge_strategy = ListMerge::Map(vec!["ip".into()]))]
    pub resolved_addresses: Vec<DNSNameResolverInfo>,

    /// Consecutive failed resolutions of `dnsName`.
    ///
    /// Reset to zero on success and incremented on every failure. On reaching 5
    /// the details about the DNS name are removed.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub resolution_failures: i32,
}

/// One IP address observed for a DNS name.
///
/// The address is valid until `lastLookupTime + ttlSeconds`. A lookup refreshes it
/// on expiry; if it is not refreshed it is removed after a grace period of 1 second.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DNSNameResolverInfo {
    /// IP address associated with the `dnsName`. IPv4 dotted quad or IPv6 text form.
    #[schemars(with = "String")]
    #[schemars(regex(pattern = IP_ADDRESS_PATTERN))]
    pub ip: IpAddr,

    /// Time-to-live of the IP address, in seconds.
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub ttl_seconds: i32,

    /// Timestamp when the last DNS lookup was completed.
    pub last_lookup_time: DateTime<Utc>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &i32) -> bool {
    *value == 0
}

// ============================================================================
// MachineOSBuild
// ============================================================================

/// `MachineOSBuild` describes a build process managed by the Machine Config Operator.
///
/// If `currentConfig` and `desiredConfig` differ, an image has to be built for the
/// desired rendered config of the referenced pool.
///
/// # Example
///
/// ```yaml
/// apiVersion: machineconfiguration.openshift.io/v1alpha1
/// kind: MachineOSBuild
/// metadata:
///   name: worker-build
/// spec:
///   machineConfigPool:
///     name: worker
///   desiredConfig: rendered-worker-ec40d2965ff81bce7cd7a7e82a680739
///   buildInputs:
///     imageBuilderType: PodImageBuilder
///     baseOSImageURL: quay.io/openshift/rhcos:latest
///     baseImagePullSecret: global-pull-secret
///     finalImagePushSecret:
///       name: push-secret
///     finalImagePullSecret:
///       name: pull-secret
///     finalImagePullspec: https://registry.example.com/os/worker
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
#[kube(
    group = "machineconfiguration.openshift.io",
    version = "v1alpha1",
    kind = "MachineOSBuild",
    derive = "PartialEq",
    doc = "MachineOSBuild describes a build process managed by the MCO. Compatibility level 4: No compatibility is provided, the API can change at any point for any reason."
)]
#[kube(status = "MachineOSBuildStatus")]
#[kube(printcolumn = r#"{"name":"Pool","type":"string","jsonPath":".spec.machineConfigPool.name"}"#)]
#[kube(printcolumn = r#"{"name":"Desired","type":"string","jsonPath":".spec.desiredConfig"}"#)]
#[serde(rename_all = "camelCase")]
pub struct MachineOSBuildSpec {
    /// The pool which the build is for.
    pub machine_config_pool: MachineConfigPoolReference,

    /// User options for the build.
    pub build_inputs: BuildInputs,

    /// Currently running config on the pool.
    #[serde(default)]
    pub current_config: String,

    /// Desired config to build an image for.
    pub desired_config: String,
}

/// All of the information needed to trigger a build.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildInputs {
    /// Backend used to build the image.
    #[serde(default)]
    pub image_builder_type: MachineOSImageBuilderType,

    /// Base OS image the custom image is built from.
    #[serde(rename = "baseOSImageURL")]
    pub base_os_image_url: String,

    /// Secret used to pull the base image.
    pub base_image_pull_secret: String,

    /// Secret used to push to the user registry.
    pub final_image_push_secret: ImageSecretObjectReference,

    /// Secret used to pull the final produced image.
    pub final_image_pull_secret: ImageSecretObjectReference,

    /// Custom data to build into the image. Base64 encoded on the wire.
    #[serde(rename = "containerFile", default, with = "base64_bytes")]
    #[schemars(with = "String")]
    pub containerfile: Vec<u8>,

    /// Location of the final image. Must start with `https://`.
    #[schemars(regex(pattern = r"^https://"))]
    pub final_image_pullspec: String,
}

/// Image builder backend: the OpenShift build API, a plain pod running the image
/// builder, or `Default`, which resolves to `OpenShiftImageBuilder`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum MachineOSImageBuilderType {
    OpenShiftImageBuilder,
    PodImageBuilder,
    #[default]
    Default,
}

/// `MachineOSBuild` status
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, KubeSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineOSBuildStatus {
    /// Build conditions. Valid types are the [`BuildProgress`] values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[x_kube(merge_strategy = ListMerge::Map(vec!["type".into()]))]
    pub conditions: Vec<Condition>,

    /// `MachineOSImage` object created to track image specific information.
    #[serde(
        rename = "renderedMachineOSImage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub rendered_machine_os_image: Option<MachineOSImageReference>,

    /// When the build began.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    /// When the build ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    /// Prior failed or interrupted iterations of this build. No two items are equal.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[x_kube(merge_strategy = ListMerge::Set)]
    pub build_history: Vec<PriorMachineOSBuilds>,
}

/// Information about a related prior build.
///
/// Replaced as a whole when `buildHistory` is merged.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
#[schemars(extend("x-kubernetes-map-type" = "atomic"))]
#[serde(rename_all = "camelCase")]
pub struct PriorMachineOSBuilds {
    /// Name of the build.
    pub name: String,

    /// Optional message describing why the build ended prematurely.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build_failure: String,
}

/// Name of a `MachineConfigPool`, e.g. "worker" or "infra".
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
pub struct MachineConfigPoolReference {
    /// Name of the referenced object.
    pub name: String,
}

/// Name of a rendered `MachineConfig`, e.g. "rendered-worker-ec40d2965ff81bce7cd7a7e82a680739".
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
pub struct RenderedMachineConfigReference {
    /// Name of the referenced object.
    pub name: String,
}

/// Name of a `MachineOSImage`, e.g. "worker-os-image-167651b10ec98af17971d6a47df9e22f".
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
pub struct MachineOSImageReference {
    /// Name of the referenced object.
    pub name: String,
}

/// Name of an image registry push/pull secret needed in the build process.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
pub struct ImageSecretObjectReference {
    /// Name of the referenced object.
    pub name: String,
}

/// Key phases of a build, tracked as condition types in `MachineOSBuildStatus`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildProgress {
    /// Build inputs were gathered and validated.
    Prepared,
    /// Build was kicked off with the image builder.
    Building,
    /// Build or preparation failed.
    Failed,
    /// User stopped the build by modifying part of the build config.
    Interrupted,
    /// A failed or interrupted build started a new iteration.
    Restarted,
    /// Image is built and ready to roll out.
    Ready,
}

impl BuildProgress {
    /// Every progress value, in lifecycle order.
    pub const ALL: [BuildProgress; 6] = [
        BuildProgress::Prepared,
        BuildProgress::Building,
        BuildProgress::Failed,
        BuildProgress::Interrupted,
        BuildProgress::Restarted,
        BuildProgress::Ready,
    ];

    /// Condition type string for this phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BuildProgress::Prepared => "Prepared",
            BuildProgress::Building => "Building",
            BuildProgress::Failed => "Failed",
            BuildProgress::Interrupted => "Interrupted",
            BuildProgress::Restarted => "Restarted",
            BuildProgress::Ready => "Ready",
        }
    }

    /// Whether the build has stopped in this phase.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            BuildProgress::Failed | BuildProgress::Interrupted | BuildProgress::Ready
        )
    }
}

impl fmt::Display for BuildProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildProgress {
    type Err = crate::errors::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildProgress::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| crate::errors::ValidationError::UnknownBuildProgress(s.to_string()))
    }
}

/// Serde adapter encoding `containerFile` bytes as standard base64.
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(encoded) => STANDARD
                .decode(encoded.as_bytes())
                .map_err(serde::de::Error::custom),
            None => Ok(Vec::new()),
        }
    }
}
