// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CRD YAML Generator
//!
//! Generates Kubernetes CRD YAML files from Rust types defined in src/crd.rs.
//! This ensures the YAML files in deploy/crds/ are always in sync with the Rust code.
//!
//! Usage:
//!   cargo run --bin crdgen
//!   cargo run --bin crdgen -- --output-dir /tmp/crds
//!
//! Generated files will be written to the output directory with proper headers.

use anyhow::Result;
use clap::Parser;
use openshift_crds::constants::DEFAULT_CRD_OUTPUT_DIR;
use openshift_crds::{logging, manifests};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "crdgen", version, about = "Generate CRD YAML manifests")]
struct Args {
    /// Directory the manifests are written to
    #[arg(long, default_value = DEFAULT_CRD_OUTPUT_DIR)]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    logging::init()?;
    let args = Args::parse();

    info!("Generating CRD YAML files from src/crd.rs");

    for path in manifests::write_all(&args.output_dir)? {
        println!("  ✓ Generated {}", path.display());
    }

    println!("\nNext steps:");
    println!("  1. Review the generated files");
    println!(
        "  2. Deploy with: kubectl apply -f {}/",
        args.output_dir.display()
    );

    Ok(())
}
