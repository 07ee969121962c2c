// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Status condition helpers for Kubernetes resources.
//!
//! This module provides utility functions for creating and managing Kubernetes
//! status conditions following the standard conventions.
//!
//! # Condition Format
//!
//! Kubernetes conditions follow a standard format:
//! - `type`: The aspect of the resource being reported (e.g., "Degraded", "Building")
//! - `status`: "True", "False", or "Unknown"
//! - `reason`: A programmatic identifier (CamelCase)
//! - `message`: A human-readable explanation
//! - `lastTransitionTime`: RFC3339 timestamp when the condition changed
//!
//! # Example
//!
//! ```rust,no_run
//! use openshift_crds::status::create_condition;
//!
//! let condition = create_condition(
//!     "Degraded",
//!     "False",
//!     "ResolutionSucceeded",
//!     "DNS name resolved to 2 addresses"
//! );
//! ```

use crate::crd::Condition;
use chrono::{DateTime, SecondsFormat, Utc};
use kube::api::Patch;
use serde::Serialize;
use serde_json::{json, Value};

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Create a new Kubernetes condition with the current timestamp.
///
/// # Arguments
///
/// * `condition_type` - The type of condition (e.g., "Degraded", "Ready")
/// * `status` - The status: "True", "False", or "Unknown"
/// * `reason` - A programmatic identifier in `CamelCase`
/// * `message` - A human-readable explanation
///
/// # Example
///
/// ```rust
/// # use openshift_crds::status::create_condition;
/// let condition = create_condition("Ready", "True", "BuildSucceeded", "Image pushed");
/// assert_eq!(condition.r#type, "Ready");
/// assert_eq!(condition.status, "True");
/// ```
#[must_use]
pub fn create_condition(
    condition_type: &str,
    status: &str,
    reason: &str,
    message: &str,
) -> Condition {
    create_condition_at(condition_type, status, reason, message, Utc::now())
}

/// Create a condition whose `lastTransitionTime` is `now`.
#[must_use]
pub fn create_condition_at(
    condition_type: &str,
    status: &str,
    reason: &str,
    message: &str,
    now: DateTime<Utc>,
) -> Condition {
    Condition {
        r#type: condition_type.to_string(),
        status: status.to_string(),
        observed_generation: None,
        reason: Some(reason.to_string()),
        message: Some(message.to_string()),
        last_transition_time: Some(format_time(now)),
    }
}

/// Check if a condition has changed compared to the existing status.
///
/// A condition is considered changed if the type, status or message differ.
/// The `reason` and `lastTransitionTime` are not compared, as these typically
/// change with the condition itself.
#[must_use]
pub fn condition_changed(existing: Option<&Condition>, new_condition: &Condition) -> bool {
    if let Some(current) = existing {
        current.r#type != new_condition.r#type
            || current.status != new_condition.status
            || current.message != new_condition.message
    } else {
        true
    }
}

/// Find a condition by type in a list of conditions.
///
/// # Example
///
/// ```rust
/// # use openshift_crds::status::{create_condition, find_condition};
/// let conditions = vec![create_condition("Degraded", "True", "ResolutionFailed", "SERVFAIL")];
/// assert!(find_condition(&conditions, "Degraded").is_some());
/// assert!(find_condition(&conditions, "Ready").is_none());
/// ```
#[must_use]
pub fn find_condition<'a>(
    conditions: &'a [Condition],
    condition_type: &str,
) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.r#type == condition_type)
}

/// Returns `true` if the condition of the given type exists with status `True`.
#[must_use]
pub fn is_condition_true(conditions: &[Condition], condition_type: &str) -> bool {
    find_condition(conditions, condition_type).is_some_and(|c| c.status == "True")
}

/// Update or add a condition in a mutable conditions list (in-memory, no API call).
///
/// It preserves the `lastTransitionTime` if the status hasn't changed, or sets a new
/// timestamp if it has. Use [`status_merge_patch`] to persist the result.
///
/// # Example
///
/// ```rust
/// use openshift_crds::status::update_condition_in_memory;
///
/// let mut conditions = Vec::new();
/// update_condition_in_memory(&mut conditions, "Degraded", "False", "ResolutionSucceeded", "ok");
/// assert_eq!(conditions.len(), 1);
/// ```
pub fn update_condition_in_memory(
    conditions: &mut Vec<Condition>,
    condition_type: &str,
    status: &str,
    reason: &str,
    message: &str,
) {
    update_condition_at(conditions, condition_type, status, reason, message, Utc::now());
}

/// Same as [`update_condition_in_memory`] with an explicit transition time.
pub fn update_condition_at(
    conditions: &mut Vec<Condition>,
    condition_type: &str,
    status: &str,
    reason: &str,
    message: &str,
    now: DateTime<Utc>,
) {
    if let Some(existing) = conditions.iter_mut().find(|c| c.r#type == condition_type) {
        let last_transition_time = if existing.status == status {
            existing
                .last_transition_time
                .clone()
                .unwrap_or_else(|| format_time(now))
        } else {
            format_time(now)
        };

        existing.status = status.to_string();
        existing.reason = Some(reason.to_string());
        existing.message = Some(message.to_string());
        existing.last_transition_time = Some(last_transition_time);
    } else {
        conditions.push(create_condition_at(
            condition_type,
            status,
            reason,
            message,
            now,
        ));
    }
}

/// Compare two condition lists to check if they are semantically equal.
///
/// Ignores `lastTransitionTime` and ordering; compares type, status, reason and message.
#[must_use]
pub fn conditions_equal(current: &[Condition], new: &[Condition]) -> bool {
    if current.len() != new.len() {
        return false;
    }

    new.iter().all(|new_cond| {
        find_condition(current, &new_cond.r#type).is_some_and(|curr_cond| {
            curr_cond.status == new_cond.status
                && curr_cond.reason == new_cond.reason
                && curr_cond.message == new_cond.message
        })
    })
}

/// Build a JSON merge patch that replaces `.status` with the given value.
///
/// The patch is meant for `Api::patch_status`. Lists such as `resolvedNames` are
/// replaced wholesale, so the caller sends the complete, already merged status.
///
/// # Errors
///
/// Returns an error if the status cannot be serialized to JSON.
pub fn status_merge_patch<S: Serialize>(status: &S) -> Result<Patch<Value>, serde_json::Error> {
    Ok(Patch::Merge(json!({ "status": serde_json::to_value(status)? })))
}
