// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CRD Markdown Documentation Generator
//!
//! Generates markdown API reference documentation from Rust CRD types.
//! This ensures docs/api.md is always in sync with the code.
//!
//! Usage:
//!   cargo run --bin crddoc > docs/api.md

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceDefinition, JSONSchemaProps, JSONSchemaPropsOrArray,
};
use kube::{CustomResourceExt, Resource};
use openshift_crds::crd::{DNSNameResolver, MachineOSBuild};

/// One kind in the reference: its section heading and anchor, and its generator.
struct KindDoc {
    section: &'static str,
    anchor: &'static str,
    kind: &'static str,
    generate: fn(),
}

const KINDS: [KindDoc; 2] = [
    KindDoc {
        section: "Machine Configuration",
        anchor: "machine-configuration",
        kind: "MachineOSBuild",
        generate: generate_crd_doc::<MachineOSBuild>,
    },
    KindDoc {
        section: "Networking",
        anchor: "networking",
        kind: "DNSNameResolver",
        generate: generate_crd_doc::<DNSNameResolver>,
    },
];

fn main() {
    println!("# API Reference");
    println!();
    println!("This document describes the Custom Resource Definitions (CRDs) provided by openshift-crds.");
    println!();
    println!("> **Note**: This file is AUTO-GENERATED from `src/crd.rs`");
    println!("> DO NOT EDIT MANUALLY - Run `cargo run --bin crddoc` to regenerate");
    println!();

    println!("## Table of Contents");
    println!();
    for doc in &KINDS {
        println!("- [{}](#{})", doc.section, doc.anchor);
        println!("  - [{}](#{})", doc.kind, doc.kind.to_lowercase());
    }
    println!();

    for doc in &KINDS {
        println!("## {}", doc.section);
        println!();
        (doc.generate)();
    }
}

/// Root OpenAPI schema of the first served version.
fn root_schema(crd: &CustomResourceDefinition) -> Option<&JSONSchemaProps> {
    crd.spec.versions.first()?.schema.as_ref()?.open_api_v3_schema.as_ref()
}

fn generate_crd_doc<T>()
where
    T: CustomResourceExt + Resource<DynamicType = ()>,
{
    let crd = T::crd();
    let kind = T::kind(&());

    println!("### {kind}");
    println!();
    println!("**API Version**: `{}`", T::api_version(&()));
    println!();

    let Some(root) = root_schema(&crd) else {
        println!("{kind} Custom Resource");
        println!();
        println!("---");
        println!();
        return;
    };

    match root.description.as_deref() {
        Some(description) => println!("{description}"),
        None => println!("{kind} Custom Resource"),
    }
    println!();

    let Some(properties) = &root.properties else {
        println!("---");
        println!();
        return;
    };

    for (field, heading) in [("spec", "Spec Fields"), ("status", "Status Fields")] {
        let Some(section) = properties.get(field) else {
            continue;
        };
        println!("#### {heading}");
        println!();
        print_schema_table(section);
        println!();
    }

    println!("---");
    println!();
}

fn print_schema_table(schema: &JSONSchemaProps) {
    println!("| Field | Type | Required | Constraints | Description |");
    println!("| ----- | ---- | -------- | ----------- | ----------- |");
    print_schema_rows(schema, "");
}

/// Print one row per property, descending into nested objects and arrays of
/// objects with dotted field paths.
fn print_schema_rows(schema: &JSONSchemaProps, prefix: &str) {
    let Some(props) = &schema.properties else {
        return;
    };
    let required_fields = schema.required.clone().unwrap_or_default();

    // Sort properties for consistent output
    let mut sorted_props: Vec<_> = props.iter().collect();
    sorted_props.sort_by_key(|(name, _)| *name);

    for (name, prop_schema) in sorted_props {
        let path = format!("{prefix}{name}");
        let required_str = if required_fields.contains(name) { "Yes" } else { "No" };
        let type_str = get_type_string(prop_schema);
        let constraints = get_constraints(prop_schema);
        let description = get_description(prop_schema);

        println!("| `{path}` | {type_str} | {required_str} | {constraints} | {description} |");

        match &prop_schema.items {
            Some(JSONSchemaPropsOrArray::Schema(item)) => {
                print_schema_rows(item, &format!("{path}[]."));
            }
            _ => print_schema_rows(prop_schema, &format!("{path}.")),
        }
    }
}

fn get_type_string(schema: &JSONSchemaProps) -> String {
    // Check for $ref first (references to other types)
    if let Some(reference) = &schema.ref_path {
        // Extract type name from reference like "#/definitions/BuildInputs"
        return reference
            .split('/')
            .next_back()
            .unwrap_or("object")
            .to_string();
    }

    // Check for type field
    if let Some(type_str) = &schema.type_ {
        if type_str == "array" {
            return match &schema.items {
                Some(JSONSchemaPropsOrArray::Schema(item)) => {
                    format!("[]{}", get_type_string(item))
                }
                _ => "array".to_string(),
            };
        }
        if let Some(format) = &schema.format {
            return format!("{type_str} ({format})");
        }
        return type_str.clone();
    }

    // Check if it's an object with properties
    if schema.properties.is_some() {
        return "object".to_string();
    }

    "any".to_string()
}

/// Server-side rules worth knowing when writing the field: list semantics,
/// CEL validations and length limits.
fn get_constraints(schema: &JSONSchemaProps) -> String {
    let mut notes = Vec::new();

    match (
        schema.x_kubernetes_list_type.as_deref(),
        &schema.x_kubernetes_list_map_keys,
    ) {
        (Some("map"), Some(keys)) => notes.push(format!("map keyed by `{}`", keys.join("`, `"))),
        (Some(list_type), _) => notes.push(list_type.to_string()),
        (None, _) => {}
    }
    if let Some(max) = schema.max_length {
        notes.push(format!("max length {max}"));
    }
    for rule in schema.x_kubernetes_validations.iter().flatten() {
        notes.push(rule.message.clone().unwrap_or_else(|| format!("`{}`", rule.rule)));
    }

    notes.join("; ").replace('|', "\\|")
}

fn get_description(schema: &JSONSchemaProps) -> String {
    if let Some(desc) = &schema.description {
        // Escape pipe characters in descriptions for markdown tables
        return desc.replace('|', "\\|").replace('\n', " ");
    }
    String::new()
}
