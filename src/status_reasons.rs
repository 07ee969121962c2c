// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Standard Kubernetes status condition types and reasons.
//!
//! Reasons are programmatic identifiers in CamelCase that explain why a condition has
//! a particular status.
//!
//! # Example Status
//!
//! ```yaml
//! status:
//!   resolvedNames:
//!     - dnsName: www.example.com.
//!       resolutionFailures: 2
//!       conditions:
//!         - type: Degraded
//!           status: "True"
//!           reason: ResolutionFailed
//!           message: "lookup of www.example.com. failed: SERVFAIL"
//! ```

// ============================================================================
// Condition Status Values
// ============================================================================

/// Condition holds.
pub const CONDITION_STATUS_TRUE: &str = "True";

/// Condition does not hold.
pub const CONDITION_STATUS_FALSE: &str = "False";

/// Condition state is not known.
pub const CONDITION_STATUS_UNKNOWN: &str = "Unknown";

// ============================================================================
// DNSNameResolver Condition Types and Reasons
// ============================================================================

/// The only known condition type on a resolved DNS name.
pub const CONDITION_TYPE_DEGRADED: &str = "Degraded";

/// The last lookup of the DNS name succeeded.
pub const REASON_RESOLUTION_SUCCEEDED: &str = "ResolutionSucceeded";

/// The last lookup of the DNS name failed.
///
/// The item stays in the status with its remaining addresses until the failure
/// threshold is reached.
pub const REASON_RESOLUTION_FAILED: &str = "ResolutionFailed";

// ============================================================================
// MachineOSBuild Reasons
// ============================================================================

/// Build inputs were gathered and validated.
pub const REASON_BUILD_PREPARED: &str = "BuildPrepared";

/// The image builder is running.
pub const REASON_BUILD_RUNNING: &str = "BuildRunning";

/// The image was built and pushed.
pub const REASON_BUILD_SUCCEEDED: &str = "BuildSucceeded";

/// The image builder reported a failure.
pub const REASON_BUILD_FAILED: &str = "BuildFailed";

/// The build config changed while the build was running.
pub const REASON_BUILD_INTERRUPTED: &str = "BuildInterrupted";

/// A new iteration of a failed or interrupted build started.
pub const REASON_BUILD_RESTARTED: &str = "BuildRestarted";

/// Another phase superseded this one.
pub const REASON_PHASE_SUPERSEDED: &str = "PhaseSuperseded";

/// Map a build phase to its default reason.
#[must_use]
pub fn reason_for_progress(progress: crate::crd::BuildProgress) -> &'static str {
    use crate::crd::BuildProgress;

    match progress {
        BuildProgress::Prepared => REASON_BUILD_PREPARED,
        BuildProgress::Building => REASON_BUILD_RUNNING,
        BuildProgress::Failed => REASON_BUILD_FAILED,
        BuildProgress::Interrupted => REASON_BUILD_INTERRUPTED,
        BuildProgress::Restarted => REASON_BUILD_RESTARTED,
        BuildProgress::Ready => REASON_BUILD_SUCCEEDED,
    }
}
