// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Validation of `DNSNameResolver` and `MachineOSBuild` resources.
//!
//! The API server enforces these rules through the CRD schema. The same checks are
//! available here so a controller can reject bad data before it writes a status,
//! and so that tests do not need an API server.

use crate::constants::FINAL_IMAGE_PULLSPEC_PREFIX;
use crate::crd::{DNSNameResolverSpec, DNSNameResolverStatus, MachineOSBuildSpec};
use crate::dns_name::{matches, normalize, validate_dns_name};
use crate::errors::ValidationError;
use std::collections::HashSet;
use tracing::debug;

/// Validate `spec.name` of a `DNSNameResolver`.
///
/// # Errors
///
/// Returns an error if the name is not a valid (optionally wildcard) DNS name.
pub fn validate_dns_name_resolver_spec(spec: &DNSNameResolverSpec) -> Result<(), ValidationError> {
    validate_dns_name(&spec.name)
}

/// Enforce `self == oldSelf` on `spec.name`.
///
/// # Errors
///
/// Returns [`ValidationError::ImmutableSpecName`] if the name changed.
pub fn validate_spec_update(
    old: &DNSNameResolverSpec,
    new: &DNSNameResolverSpec,
) -> Result<(), ValidationError> {
    if old.name != new.name {
        return Err(ValidationError::ImmutableSpecName {
            old: old.name.clone(),
            new: new.name.clone(),
        });
    }
    Ok(())
}

/// Validate a `DNSNameResolver` status against its spec.
///
/// Checks that every `dnsName` is valid, matches `spec.name` and appears once,
/// that every item has at least one address, that IPs are unique per item and
/// that no numeric field is negative.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_dns_name_resolver_status(
    spec: &DNSNameResolverSpec,
    status: &DNSNameResolverStatus,
) -> Result<(), ValidationError> {
    let mut seen_names = HashSet::new();

    for item in &status.resolved_names {
        validate_dns_name(&item.dns_name)?;

        if !matches(&spec.name, &item.dns_name) {
            return Err(ValidationError::NameMismatch {
                spec_name: spec.name.clone(),
                dns_name: item.dns_name.clone(),
            });
        }

        if !seen_names.insert(normalize(&item.dns_name)) {
            return Err(ValidationError::DuplicateDnsName(item.dns_name.clone()));
        }

        if item.resolved_addresses.is_empty() {
            return Err(ValidationError::NoResolvedAddresses(item.dns_name.clone()));
        }

        if item.resolution_failures < 0 {
            return Err(ValidationError::NegativeValue {
                field: format!("resolvedNames[{}].resolutionFailures", item.dns_name),
                value: i64::from(item.resolution_failures),
            });
        }

        let mut seen_ips = HashSet::new();
        for info in &item.resolved_addresses {
            if !seen_ips.insert(info.ip) {
                return Err(ValidationError::DuplicateAddress {
                    dns_name: item.dns_name.clone(),
                    ip: info.ip.to_string(),
                });
            }
            if info.ttl_seconds < 0 {
                return Err(ValidationError::NegativeValue {
                    field: format!("resolvedNames[{}].resolvedAddresses[{}].ttlSeconds", item.dns_name, info.ip),
                    value: i64::from(info.ttl_seconds),
                });
            }
        }
    }

    debug!(
        "Validated status of {} with {} resolved names",
        spec.name,
        status.resolved_names.len()
    );
    Ok(())
}

/// Validate a `MachineOSBuild` spec.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] for empty required fields and
/// [`ValidationError::InvalidPullspec`] if `finalImagePullspec` is not `https://`.
pub fn validate_machine_os_build_spec(spec: &MachineOSBuildSpec) -> Result<(), ValidationError> {
    let inputs = &spec.build_inputs;
    let required = [
        ("spec.machineConfigPool.name", spec.machine_config_pool.name.as_str()),
        ("spec.desiredConfig", spec.desired_config.as_str()),
        ("spec.buildInputs.baseOSImageURL", inputs.base_os_image_url.as_str()),
        (
            "spec.buildInputs.baseImagePullSecret",
            inputs.base_image_pull_secret.as_str(),
        ),
        (
            "spec.buildInputs.finalImagePushSecret.name",
            inputs.final_image_push_secret.name.as_str(),
        ),
        (
            "spec.buildInputs.finalImagePullSecret.name",
            inputs.final_image_pull_secret.name.as_str(),
        ),
        (
            "spec.buildInputs.finalImagePullspec",
            inputs.final_image_pullspec.as_str(),
        ),
    ];

    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ValidationError::MissingField((*field).to_string()));
    }

    if !inputs
        .final_image_pullspec
        .starts_with(FINAL_IMAGE_PULLSPEC_PREFIX)
    {
        return Err(ValidationError::InvalidPullspec(
            inputs.final_image_pullspec.clone(),
        ));
    }

    Ok(())
}
