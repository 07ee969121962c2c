// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Cluster integration tests.
//!
//! These tests need a Kubernetes cluster with the CRDs from `deploy/crds/`
//! installed. They skip when no cluster is reachable.
//!
//! Run with: cargo test --test cluster_integration -- --ignored

mod common;

use chrono::Utc;
use common::get_kube_client_or_skip;
use kube::api::{Api, DeleteParams, PatchParams, PostParams};
use openshift_crds::crd::{DNSNameResolver, DNSNameResolverSpec, DNSNameResolverStatus};
use openshift_crds::resolver_cache::{ResolvedAddress, ResolverCache, ResolverCacheConfig};
use openshift_crds::status::status_merge_patch;

const TEST_NAMESPACE: &str = "default";

#[tokio::test]
#[ignore = "requires a Kubernetes cluster with the CRDs installed"]
async fn test_dns_name_resolver_status_round_trip() {
    let Some(client) = get_kube_client_or_skip().await else {
        return;
    };
    let api: Api<DNSNameResolver> = Api::namespaced(client, TEST_NAMESPACE);
    let name = "wildcard-integration";

    let resolver = DNSNameResolver::new(
        name,
        DNSNameResolverSpec {
            name: "*.example.com.".to_string(),
        },
    );
    let _ = api.delete(name, &DeleteParams::default()).await;
    api.create(&PostParams::default(), &resolver)
        .await
        .expect("create DNSNameResolver");

    let cache = ResolverCache::new(ResolverCacheConfig::default());
    let mut status = DNSNameResolverStatus::default();
    cache
        .record_success(
            &mut status,
            "*.example.com.",
            "www.example.com.",
            &[ResolvedAddress::new("192.0.2.10".parse().unwrap(), 30)],
            Utc::now(),
        )
        .unwrap();

    let patch = status_merge_patch(&status).unwrap();
    api.patch_status(name, &PatchParams::default(), &patch)
        .await
        .expect("patch status");

    let stored = api.get_status(name).await.expect("get status");
    assert_eq!(stored.status, Some(status));

    api.delete(name, &DeleteParams::default())
        .await
        .expect("delete DNSNameResolver");
}

#[tokio::test]
#[ignore = "requires a Kubernetes cluster with the CRDs installed"]
async fn test_spec_name_must_be_fully_qualified() {
    let Some(client) = get_kube_client_or_skip().await else {
        return;
    };
    let api: Api<DNSNameResolver> = Api::namespaced(client, TEST_NAMESPACE);

    let resolver = DNSNameResolver::new(
        "not-fully-qualified",
        DNSNameResolverSpec {
            name: "www.example.com".to_string(),
        },
    );

    let result = api.create(&PostParams::default(), &resolver).await;
    assert!(
        matches!(result, Err(kube::Error::Api(ref ae)) if ae.code == 422),
        "expected schema rejection, got {result:?}"
    );
}
