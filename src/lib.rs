// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # openshift-crds - MachineOSBuild and DNSNameResolver for Kubernetes
//!
//! Rust types for two OpenShift Custom Resource Definitions (CRDs) plus the
//! lifecycle rules that operate on their status.
//!
//! ## Overview
//!
//! - `MachineOSBuild` (`machineconfiguration.openshift.io/v1alpha1`, cluster scoped)
//!   describes an OS image build for a machine config pool.
//! - `DNSNameResolver` (`network.openshift.io/v1alpha1`, namespaced) caches the
//!   IP addresses a regular or wildcard DNS name resolves to, with a TTL per
//!   address.
//!
//! No controller runs here. Callers perform the DNS lookups and builds, then use
//! this crate to keep the status consistent and patch it back.
//!
//! ## Modules
//!
//! - [`crd`] - Custom Resource Definition types
//! - [`resolver_cache`] - TTL, grace period and failure handling of resolved names
//! - [`build_status`] - Build progress conditions and history
//! - [`validation`] - Checks mirroring the schema constraints
//! - [`dns_name`] - DNS name syntax and wildcard matching
//! - [`status`] - Condition helpers and status patches
//! - [`manifests`] - CRD YAML rendering
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use openshift_crds::crd::DNSNameResolverStatus;
//! use openshift_crds::resolver_cache::{ResolvedAddress, ResolverCache, ResolverCacheConfig};
//!
//! let cache = ResolverCache::new(ResolverCacheConfig::default());
//! let mut status = DNSNameResolverStatus::default();
//!
//! cache
//!     .record_success(
//!         &mut status,
//!         "*.example.com.",
//!         "www.example.com.",
//!         &[ResolvedAddress::new("192.0.2.10".parse().unwrap(), 30)],
//!         Utc::now(),
//!     )
//!     .unwrap();
//! ```

pub mod build_status;
pub mod constants;
pub mod crd;
pub mod dns_name;
pub mod errors;
pub mod logging;
pub mod manifests;
pub mod resolver_cache;
pub mod status;
pub mod status_reasons;
pub mod validation;

#[cfg(test)]
mod build_status_tests;
#[cfg(test)]
mod logging_tests;
#[cfg(test)]
mod status_reasons_tests;
#[cfg(test)]
mod status_tests;
