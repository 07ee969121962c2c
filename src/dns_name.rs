// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS name syntax checks and wildcard matching.
//!
//! Names handled here are always fully qualified (they end with a dot). A wildcard
//! name starts with a single `*` label which matches exactly one label:
//!
//! ```rust
//! use openshift_crds::dns_name::matches;
//!
//! assert!(matches("*.example.com.", "sub1.example.com."));
//! assert!(!matches("*.example.com.", "sub2.sub1.example.com."));
//! assert!(matches("*.example.com.", "*.example.com."));
//! ```

use crate::constants::{MAX_DNS_NAME_LENGTH, WILDCARD_PREFIX};
use crate::errors::ValidationError;

/// Check a DNS name against `^(\*\.)?([A-Za-z0-9-]+\.)*[A-Za-z0-9-]+\.$` and the
/// 254 character limit.
///
/// # Errors
///
/// Returns [`ValidationError::DnsNameTooLong`] or [`ValidationError::InvalidDnsName`].
pub fn validate_dns_name(name: &str) -> Result<(), ValidationError> {
    if name.len() > MAX_DNS_NAME_LENGTH {
        return Err(ValidationError::DnsNameTooLong {
            name: name.to_string(),
            length: name.len(),
            max: MAX_DNS_NAME_LENGTH,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidDnsName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let rest = name.strip_prefix(WILDCARD_PREFIX).unwrap_or(name);
    let body = rest
        .strip_suffix('.')
        .ok_or_else(|| invalid("name must be fully qualified and end with '.'"))?;

    if body.is_empty() {
        return Err(invalid("name must contain at least one label"));
    }

    for label in body.split('.') {
        if label.is_empty() {
            return Err(invalid("name contains an empty label"));
        }
        if label == "*" {
            return Err(invalid("'*' is only allowed as the first label"));
        }
        if !label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
            return Err(invalid(&format!(
                "label '{label}' may only contain letters, digits and '-'"
            )));
        }
    }

    Ok(())
}

/// Returns `true` if [`validate_dns_name`] accepts the name.
#[must_use]
pub fn is_valid_dns_name(name: &str) -> bool {
    validate_dns_name(name).is_ok()
}

/// Returns `true` if the name starts with the `*.` wildcard label.
#[must_use]
pub fn is_wildcard(name: &str) -> bool {
    name.starts_with(WILDCARD_PREFIX)
}

/// Canonical form used as the `dnsName` map key. DNS names compare case-insensitively.
#[must_use]
pub fn normalize(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Whether `dns_name` belongs to the resolver whose `spec.name` is `spec_name`.
///
/// A regular `spec_name` only matches itself. A wildcard `spec_name` matches
/// itself and every name that has exactly one label in place of the `*`.
#[must_use]
pub fn matches(spec_name: &str, dns_name: &str) -> bool {
    let spec_name = normalize(spec_name);
    let dns_name = normalize(dns_name);

    if spec_name == dns_name {
        return true;
    }

    let Some(suffix) = spec_name.strip_prefix(WILDCARD_PREFIX) else {
        return false;
    };

    match dns_name.split_once('.') {
        Some((label, rest)) => !label.is_empty() && label != "*" && rest == suffix,
        None => false,
    }
}
