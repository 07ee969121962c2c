// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the OpenShift CRD types.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// DNS Name Resolver Constants
// ============================================================================

/// Maximum length of a DNS name, including the trailing dot
pub const MAX_DNS_NAME_LENGTH: usize = 254;

/// Grace period after an address expires before it is removed (1 second)
pub const DEFAULT_REMOVAL_GRACE_PERIOD_SECS: u64 = 1;

/// Consecutive lookup failures after which a resolved name is removed
pub const DEFAULT_MAX_RESOLUTION_FAILURES: i32 = 5;

/// Environment variable overriding the removal grace period
pub const ENV_GRACE_PERIOD_SECS: &str = "DNS_RESOLVER_GRACE_PERIOD_SECS";

/// Environment variable overriding the failure threshold
pub const ENV_MAX_RESOLUTION_FAILURES: &str = "DNS_RESOLVER_MAX_RESOLUTION_FAILURES";

/// Prefix of a wildcard DNS name
pub const WILDCARD_PREFIX: &str = "*.";

/// Schema pattern of `spec.name` and `dnsName`: fully qualified, optional leading `*` label
pub const DNS_NAME_PATTERN: &str = r"^(\*\.)?([A-Za-z0-9-]+\.)*[A-Za-z0-9-]+\.$";

/// Schema pattern of `ip`: IPv4 dotted quad or IPv6 text form without a zone suffix
pub const IP_ADDRESS_PATTERN: &str = concat!(
    r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    r"|^((([0-9A-Fa-f]{1,4}:){7}(:|([0-9A-Fa-f]{1,4})))",
    r"|(([0-9A-Fa-f]{1,4}:){6}:([0-9A-Fa-f]{1,4})?)",
    r"|(([0-9A-Fa-f]{1,4}:){5}(((:[0-9A-Fa-f]{1,4}){0,1}):([0-9A-Fa-f]{1,4})?))",
    r"|(([0-9A-Fa-f]{1,4}:){4}(((:[0-9A-Fa-f]{1,4}){0,2}):([0-9A-Fa-f]{1,4})?))",
    r"|(([0-9A-Fa-f]{1,4}:){3}(((:[0-9A-Fa-f]{1,4}){0,3}):([0-9A-Fa-f]{1,4})?))",
    r"|(([0-9A-Fa-f]{1,4}:){2}(((:[0-9A-Fa-f]{1,4}){0,4}):([0-9A-Fa-f]{1,4})?))",
    r"|(([0-9A-Fa-f]{1,4}:){1}(((:[0-9A-Fa-f]{1,4}){0,5}):([0-9A-Fa-f]{1,4})?))",
    r"|(:(:|((:[0-9A-Fa-f]{1,4}){1,7}))))$",
);

// ============================================================================
// MachineOSBuild Constants
// ============================================================================

/// Required scheme prefix of `finalImagePullspec`
pub const FINAL_IMAGE_PULLSPEC_PREFIX: &str = "https://";

// ============================================================================
// Manifest Generation Constants
// ============================================================================

/// Default output directory for generated CRD manifests
pub const DEFAULT_CRD_OUTPUT_DIR: &str = "deploy/crds";

/// File name of the generated `MachineOSBuild` CRD
pub const MACHINE_OS_BUILD_CRD_FILE: &str = "machineosbuilds.crd.yaml";

/// File name of the generated `DNSNameResolver` CRD
pub const DNS_NAME_RESOLVER_CRD_FILE: &str = "dnsnameresolvers.crd.yaml";
