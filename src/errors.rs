// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for validation and DNS resolution cache operations.
//!
//! This module provides specialized error types for:
//! - Schema-level validation of `DNSNameResolver` and `MachineOSBuild` resources
//! - Updates to the `DNSNameResolver` status cache
//! - Loading cache configuration from the environment
//!
//! The messages are meant to be surfaced in status conditions and logs as-is.

use thiserror::Error;

/// Errors raised when a resource violates the constraints of its schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// DNS name does not match `^(\*\.)?([A-Za-z0-9-]+\.)*[A-Za-z0-9-]+\.$`
    #[error("Invalid DNS name '{name}': {reason}")]
    InvalidDnsName {
        /// The offending DNS name
        name: String,
        /// Explanation of what is invalid
        reason: String,
    },

    /// DNS name is longer than 254 characters
    #[error("DNS name '{name}' is {length} characters long, maximum is {max}")]
    DnsNameTooLong {
        /// The offending DNS name
        name: String,
        /// Actual length
        length: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// `spec.name` was changed on update
    #[error("spec.name is immutable: cannot change '{old}' to '{new}'")]
    ImmutableSpecName {
        /// Name stored in the existing object
        old: String,
        /// Name in the update
        new: String,
    },

    /// A resolved name in the status does not match `spec.name`
    #[error("Resolved DNS name '{dns_name}' does not match '{spec_name}'")]
    NameMismatch {
        /// `spec.name` of the resolver
        spec_name: String,
        /// The non-matching `dnsName`
        dns_name: String,
    },

    /// The same `dnsName` appears twice in `status.resolvedNames`
    #[error("Duplicate dnsName '{0}' in status.resolvedNames")]
    DuplicateDnsName(String),

    /// The same IP appears twice in one item's `resolvedAddresses`
    #[error("Duplicate ip '{ip}' in resolvedAddresses of '{dns_name}'")]
    DuplicateAddress {
        /// Item the duplicate was found in
        dns_name: String,
        /// Duplicated address
        ip: String,
    },

    /// `resolvedAddresses` is empty
    #[error("resolvedAddresses of '{0}' must not be empty")]
    NoResolvedAddresses(String),

    /// A numeric field holds a negative value
    #[error("{field} must not be negative, got {value}")]
    NegativeValue {
        /// Path of the field
        field: String,
        /// Value found
        value: i64,
    },

    /// A required string field is empty
    #[error("{0} is required")]
    MissingField(String),

    /// `finalImagePullspec` does not start with `https://`
    #[error("finalImagePullspec '{0}' must start with https://")]
    InvalidPullspec(String),

    /// Condition type is not a known build progress
    #[error("Unknown build progress '{0}'")]
    UnknownBuildProgress(String),
}

/// Errors raised while updating the DNS resolution cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The looked up name does not belong to the resolver
    #[error("DNS name '{dns_name}' does not match resolver name '{spec_name}'")]
    NameMismatch {
        /// `spec.name` of the resolver
        spec_name: String,
        /// Name the lookup was performed for
        dns_name: String,
    },

    /// A successful lookup carried no addresses
    #[error("Lookup of '{0}' returned no addresses")]
    EmptyAnswer(String),

    /// An answer record carried a TTL below zero
    #[error("TTL {ttl_seconds} of '{ip}' for '{dns_name}' must not be negative")]
    NegativeTtl {
        /// Name the lookup was performed for
        dns_name: String,
        /// Address of the offending record
        ip: String,
        /// TTL found in the answer
        ttl_seconds: i32,
    },

    /// Name failed syntax validation
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Errors raised while loading configuration from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable could not be parsed
    #[error("Invalid value '{value}' for {variable}: {reason}")]
    InvalidValue {
        /// Environment variable name
        variable: String,
        /// Raw value found
        value: String,
        /// Why the value was rejected
        reason: String,
    },
}
