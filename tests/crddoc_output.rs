// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Integration tests for the `crddoc` API reference generator.

use std::process::Command;

fn crddoc_output() -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_crddoc"))
        .output()
        .expect("crddoc should run");
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_table_of_contents_lists_both_kinds() {
    let doc = crddoc_output();

    assert!(doc.contains("- [Machine Configuration](#machine-configuration)"));
    assert!(doc.contains("  - [MachineOSBuild](#machineosbuild)"));
    assert!(doc.contains("- [Networking](#networking)"));
    assert!(doc.contains("  - [DNSNameResolver](#dnsnameresolver)"));

    let build = doc.find("### MachineOSBuild").unwrap();
    let resolver = doc.find("### DNSNameResolver").unwrap();
    assert!(build < resolver);
}

#[test]
fn test_sections_and_api_versions() {
    let doc = crddoc_output();

    assert!(doc.contains("**API Version**: `machineconfiguration.openshift.io/v1alpha1`"));
    assert!(doc.contains("**API Version**: `network.openshift.io/v1alpha1`"));
    assert_eq!(doc.matches("#### Spec Fields").count(), 2);
    assert_eq!(doc.matches("#### Status Fields").count(), 2);
}

#[test]
fn test_nested_fields_carry_constraints() {
    let doc = crddoc_output();

    let name_row = doc
        .lines()
        .find(|line| line.starts_with("| `name` | string | Yes |"))
        .unwrap();
    assert!(name_row.contains("spec.name is immutable"));
    assert!(name_row.contains("max length 254"));

    assert!(doc.contains("| `resolvedNames` |"));
    assert!(doc.contains("map keyed by `dnsName`"));
    assert!(doc.contains("| `resolvedNames[].resolvedAddresses[].ip` | string | Yes |"));
    assert!(doc
        .lines()
        .any(|line| line.starts_with("| `buildHistory` |") && line.contains("| set |")));
}
