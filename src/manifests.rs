// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CRD manifest rendering.
//!
//! Renders the `CustomResourceDefinition` of a kube resource type as YAML with a
//! generated-file header, so the manifests in `deploy/crds/` stay in sync with
//! the Rust types in [`crate::crd`].

use crate::constants::{DNS_NAME_RESOLVER_CRD_FILE, MACHINE_OS_BUILD_CRD_FILE};
use crate::crd::{DNSNameResolver, MachineOSBuild};
use anyhow::{Context, Result};
use kube::CustomResourceExt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header prepended to every generated manifest.
pub const GENERATED_HEADER: &str = "# Copyright (c) 2025 Erick Bourgeois, firestoned
# SPDX-License-Identifier: MIT
#
# This file is AUTO-GENERATED from src/crd.rs
# DO NOT EDIT MANUALLY - Run `cargo run --bin crdgen` to regenerate
#
";

/// Render the CRD of `T` as YAML, header included.
///
/// # Errors
///
/// Returns an error if the CRD cannot be serialized.
pub fn crd_yaml<T>() -> Result<String>
where
    T: CustomResourceExt,
{
    let crd = T::crd();
    let yaml = serde_yaml::to_string(&crd)
        .with_context(|| format!("failed to serialize CRD {}", T::crd_name()))?;

    Ok(format!("{GENERATED_HEADER}{yaml}"))
}

/// Write the CRD of `T` to `output_dir/filename`.
///
/// # Errors
///
/// Returns an error if the CRD cannot be serialized or the file cannot be written.
pub fn write_crd<T>(output_dir: &Path, filename: &str) -> Result<PathBuf>
where
    T: CustomResourceExt,
{
    let content = crd_yaml::<T>()?;
    let output_path = output_dir.join(filename);

    fs::write(&output_path, content)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    debug!("Wrote CRD {} to {}", T::crd_name(), output_path.display());
    Ok(output_path)
}

/// Write every CRD of this crate into `output_dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or any manifest fails.
pub fn write_all(output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let written = vec![
        write_crd::<MachineOSBuild>(output_dir, MACHINE_OS_BUILD_CRD_FILE)?,
        write_crd::<DNSNameResolver>(output_dir, DNS_NAME_RESOLVER_CRD_FILE)?,
    ];

    info!(
        "Generated {} CRD manifests in {}",
        written.len(),
        output_dir.display()
    );
    Ok(written)
}
