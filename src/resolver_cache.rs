// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS resolution cache lifecycle for `DNSNameResolver` status.
//!
//! The status of a `DNSNameResolver` is a cache of lookup results. This module holds
//! the rules an external reconciler applies to it after every lookup and on every
//! tick:
//!
//! - An address is valid until `lastLookupTime + ttlSeconds` and must be looked up
//!   again once it expires.
//! - An address that is not refreshed is removed after a grace period (1 second by
//!   default) following its expiration.
//! - A name whose lookups fail 5 consecutive times (by default) is removed.
//! - A name left without addresses is removed.
//!
//! Nothing here performs DNS lookups or talks to the API server. All functions take
//! the current time as an argument so the caller decides what "now" is.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use openshift_crds::crd::DNSNameResolverStatus;
//! use openshift_crds::resolver_cache::{next_lookup_time, ResolvedAddress, ResolverCache};
//!
//! let cache = ResolverCache::default();
//! let mut status = DNSNameResolverStatus::default();
//! let looked_up = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
//!
//! cache
//!     .record_success(
//!         &mut status,
//!         "*.example.com.",
//!         "www.example.com.",
//!         &[ResolvedAddress::new("192.0.2.10".parse().unwrap(), 30)],
//!         looked_up,
//!     )
//!     .unwrap();
//!
//! assert_eq!(
//!     next_lookup_time(&status),
//!     Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 30).unwrap())
//! );
//! ```

use crate::constants::{
    DEFAULT_MAX_RESOLUTION_FAILURES, DEFAULT_REMOVAL_GRACE_PERIOD_SECS, ENV_GRACE_PERIOD_SECS,
    ENV_MAX_RESOLUTION_FAILURES,
};
use crate::crd::{DNSNameResolverInfo, DNSNameResolverStatus, DNSNameResolverStatusItem};
use crate::dns_name::{matches, normalize, validate_dns_name};
use crate::errors::{CacheError, ConfigError};
use crate::status::update_condition_at;
use crate::status_reasons::{
    CONDITION_STATUS_FALSE, CONDITION_STATUS_TRUE, CONDITION_TYPE_DEGRADED,
    REASON_RESOLUTION_FAILED, REASON_RESOLUTION_SUCCEEDED,
};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, info};

/// Tunables of the cache lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverCacheConfig {
    /// Time an expired address is kept before removal
    pub grace_period: Duration,
    /// Consecutive failures after which a name is removed
    pub max_resolution_failures: i32,
}

impl Default for ResolverCacheConfig {
    fn default() -> Self {
        Self {
            grace_period: Duration::from_secs(DEFAULT_REMOVAL_GRACE_PERIOD_SECS),
            max_resolution_failures: DEFAULT_MAX_RESOLUTION_FAILURES,
        }
    }
}

impl ResolverCacheConfig {
    /// Load the configuration from `DNS_RESOLVER_GRACE_PERIOD_SECS` and
    /// `DNS_RESOLVER_MAX_RESOLUTION_FAILURES`, falling back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but not valid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but not valid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_GRACE_PERIOD_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    variable: ENV_GRACE_PERIOD_SECS.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
            config.grace_period = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(ENV_MAX_RESOLUTION_FAILURES) {
            let max = raw
                .trim()
                .parse::<i32>()
                .map_err(|e| ConfigError::InvalidValue {
                    variable: ENV_MAX_RESOLUTION_FAILURES.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
            if max < 1 {
                return Err(ConfigError::InvalidValue {
                    variable: ENV_MAX_RESOLUTION_FAILURES.to_string(),
                    value: raw,
                    reason: "must be at least 1".to_string(),
                });
            }
            config.max_resolution_failures = max;
        }

        debug!(
            grace_period_secs = config.grace_period.as_secs(),
            max_resolution_failures = config.max_resolution_failures,
            "Loaded DNS resolver cache configuration"
        );

        Ok(config)
    }
}

/// One address from a successful lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedAddress {
    /// Address returned by the lookup
    pub ip: IpAddr,
    /// TTL of the answer record, in seconds
    pub ttl_seconds: i32,
}

impl ResolvedAddress {
    #[must_use]
    pub const fn new(ip: IpAddr, ttl_seconds: i32) -> Self {
        Self { ip, ttl_seconds }
    }
}

/// Result of [`ResolverCache::record_failure`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureOutcome {
    /// The name is kept; `failures` consecutive failures so far
    Retained {
        /// Current value of `resolutionFailures`
        failures: i32,
    },
    /// The failure threshold was reached and the name was removed
    Removed,
    /// The name is not present in the status
    NotTracked,
}

/// What [`ResolverCache::prune`] removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Number of addresses dropped after their grace period
    pub removed_addresses: usize,
    /// Names dropped because no address was left
    pub removed_names: Vec<String>,
}

impl PruneReport {
    /// Returns `true` if nothing was removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed_addresses == 0 && self.removed_names.is_empty()
    }
}

impl DNSNameResolverInfo {
    /// `lastLookupTime + ttlSeconds`. Negative TTLs count as zero.
    #[must_use]
    pub fn expiration_time(&self) -> DateTime<Utc> {
        let ttl = TimeDelta::seconds(i64::from(self.ttl_seconds.max(0)));
        self.last_lookup_time
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// The address has reached its expiration and must be looked up again.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiration_time()
    }

    /// The address has not been refreshed within `grace` after its expiration.
    #[must_use]
    pub fn is_removable(&self, now: DateTime<Utc>, grace: Duration) -> bool {
        let grace = TimeDelta::from_std(grace).unwrap_or(TimeDelta::MAX);
        let deadline = self
            .expiration_time()
            .checked_add_signed(grace)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        now >= deadline
    }

    /// Time left until expiration, zero once expired.
    #[must_use]
    pub fn remaining_ttl(&self, now: DateTime<Utc>) -> Duration {
        (self.expiration_time() - now)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Applies lookup results and expirations to a `DNSNameResolverStatus`.
#[derive(Clone, Debug, Default)]
pub struct ResolverCache {
    config: ResolverCacheConfig,
}

impl ResolverCache {
    #[must_use]
    pub fn new(config: ResolverCacheConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ResolverCacheConfig {
        &self.config
    }

    /// Store the answer of a successful lookup of `dns_name`.
    ///
    /// Each answer refreshes the address with the same IP or adds a new one.
    /// Addresses missing from the answer are kept until [`ResolverCache::prune`]
    /// removes them. The failure counter is reset and `Degraded` becomes `False`.
    ///
    /// # Errors
    ///
    /// - [`CacheError::Invalid`] if `dns_name` is not a valid DNS name
    /// - [`CacheError::NameMismatch`] if `dns_name` does not match `spec_name`
    /// - [`CacheError::EmptyAnswer`] if `answers` is empty
    /// - [`CacheError::NegativeTtl`] if any answer has a TTL below zero
    pub fn record_success(
        &self,
        status: &mut DNSNameResolverStatus,
        spec_name: &str,
        dns_name: &str,
        answers: &[ResolvedAddress],
        lookup_time: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        validate_dns_name(dns_name)?;

        if !matches(spec_name, dns_name) {
            return Err(CacheError::NameMismatch {
                spec_name: spec_name.to_string(),
                dns_name: dns_name.to_string(),
            });
        }

        if answers.is_empty() {
            return Err(CacheError::EmptyAnswer(dns_name.to_string()));
        }

        // The status is left untouched when any record is rejected
        if let Some(bad) = answers.iter().find(|answer| answer.ttl_seconds < 0) {
            return Err(CacheError::NegativeTtl {
                dns_name: dns_name.to_string(),
                ip: bad.ip.to_string(),
                ttl_seconds: bad.ttl_seconds,
            });
        }

        let key = normalize(dns_name);
        let existing = status
            .resolved_names
            .iter()
            .position(|item| normalize(&item.dns_name) == key);
        let item = match existing {
            Some(index) => &mut status.resolved_names[index],
            None => {
                debug!("Tracking new resolved name {}", key);
                status.resolved_names.push(DNSNameResolverStatusItem {
                    dns_name: key.clone(),
                    ..Default::default()
                });
                let last = status.resolved_names.len() - 1;
                &mut status.resolved_names[last]
            }
        };

        for answer in answers {
            match item
                .resolved_addresses
                .iter_mut()
                .find(|info| info.ip == answer.ip)
            {
                Some(info) => {
                    info.ttl_seconds = answer.ttl_seconds;
                    info.last_lookup_time = lookup_time;
                    debug!(
                        dns_name = %key,
                        ip = %answer.ip,
                        ttl_seconds = answer.ttl_seconds,
                        "Refreshed resolved address"
                    );
                }
                None => {
                    item.resolved_addresses.push(DNSNameResolverInfo {
                        ip: answer.ip,
                        ttl_seconds: answer.ttl_seconds,
                        last_lookup_time: lookup_time,
                    });
                    debug!(
                        dns_name = %key,
                        ip = %answer.ip,
                        ttl_seconds = answer.ttl_seconds,
                        "Added resolved address"
                    );
                }
            }
        }
        item.resolved_addresses.sort_by_key(|info| info.ip);
        item.resolution_failures = 0;

        let count = item.resolved_addresses.len();
        update_condition_at(
            &mut item.conditions,
            CONDITION_TYPE_DEGRADED,
            CONDITION_STATUS_FALSE,
            REASON_RESOLUTION_SUCCEEDED,
            &format!("{key} resolved to {count} address(es)"),
            lookup_time,
        );

        sort_names(status);
        Ok(())
    }

    /// Count a failed lookup of `dns_name`.
    ///
    /// Once the counter reaches the configured threshold the name is removed from
    /// the status together with all of its addresses.
    pub fn record_failure(
        &self,
        status: &mut DNSNameResolverStatus,
        dns_name: &str,
        message: &str,
        now: DateTime<Utc>,
    ) -> FailureOutcome {
        let key = normalize(dns_name);
        let Some(index) = status
            .resolved_names
            .iter()
            .position(|item| normalize(&item.dns_name) == key)
        else {
            debug!("Ignoring lookup failure of untracked name {}", key);
            return FailureOutcome::NotTracked;
        };

        let item = &mut status.resolved_names[index];
        item.resolution_failures = item.resolution_failures.max(0).saturating_add(1);
        let failures = item.resolution_failures;

        if failures >= self.config.max_resolution_failures {
            info!(
                "Removing {} after {} consecutive resolution failures",
                key, failures
            );
            status.resolved_names.remove(index);
            return FailureOutcome::Removed;
        }

        update_condition_at(
            &mut item.conditions,
            CONDITION_TYPE_DEGRADED,
            CONDITION_STATUS_TRUE,
            REASON_RESOLUTION_FAILED,
            message,
            now,
        );
        debug!(
            dns_name = %key,
            failures,
            "Recorded resolution failure"
        );

        FailureOutcome::Retained { failures }
    }

    /// Drop addresses whose grace period has passed and names left without addresses.
    pub fn prune(&self, status: &mut DNSNameResolverStatus, now: DateTime<Utc>) -> PruneReport {
        let grace = self.config.grace_period;
        let mut report = PruneReport::default();

        for item in &mut status.resolved_names {
            let before = item.resolved_addresses.len();
            item.resolved_addresses.retain(|info| {
                let removable = info.is_removable(now, grace);
                if removable {
                    debug!(
                        dns_name = %item.dns_name,
                        ip = %info.ip,
                        "Removing expired address"
                    );
                }
                !removable
            });
            report.removed_addresses += before - item.resolved_addresses.len();
        }

        status.resolved_names.retain(|item| {
            if item.resolved_addresses.is_empty() {
                info!("Removing {} with no remaining addresses", item.dns_name);
                report.removed_names.push(item.dns_name.clone());
                false
            } else {
                true
            }
        });

        report
    }
}

fn sort_names(status: &mut DNSNameResolverStatus) {
    status
        .resolved_names
        .sort_by(|a, b| a.dns_name.cmp(&b.dns_name));
}

/// Names with at least one expired address, in status order.
#[must_use]
pub fn names_due_for_lookup(status: &DNSNameResolverStatus, now: DateTime<Utc>) -> Vec<String> {
    status
        .resolved_names
        .iter()
        .filter(|item| item.resolved_addresses.iter().any(|info| info.is_expired(now)))
        .map(|item| item.dns_name.clone())
        .collect()
}

/// Earliest expiration across every address, i.e. when the next lookup is due.
#[must_use]
pub fn next_lookup_time(status: &DNSNameResolverStatus) -> Option<DateTime<Utc>> {
    status
        .resolved_names
        .iter()
        .flat_map(|item| item.resolved_addresses.iter())
        .map(DNSNameResolverInfo::expiration_time)
        .min()
}

/// Time until [`next_lookup_time`], zero if it is already past.
#[must_use]
pub fn next_lookup_delay(status: &DNSNameResolverStatus, now: DateTime<Utc>) -> Option<Duration> {
    next_lookup_time(status).map(|at| (at - now).to_std().unwrap_or(Duration::ZERO))
}

/// Every address still held (expired addresses within their grace period included).
#[must_use]
pub fn active_addresses(
    status: &DNSNameResolverStatus,
    now: DateTime<Utc>,
    grace: Duration,
) -> BTreeSet<IpAddr> {
    status
        .resolved_names
        .iter()
        .flat_map(|item| item.resolved_addresses.iter())
        .filter(|info| !info.is_removable(now, grace))
        .map(|info| info.ip)
        .collect()
}
