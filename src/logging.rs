// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Logging initialisation for the developer binaries.
//!
//! Format: timestamp file:line LEVEL message, e.g.
//! `2025-11-29T23:45:00.123456Z crdgen.rs:49 INFO Writing CRD manifests`
//!
//! Respects `RUST_LOG` if set, otherwise defaults to INFO level.
//! Respects `RUST_LOG_FORMAT` (`json` or `text`) for the output format.
//! Output goes to stderr so stdout stays free for generated content.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log output format.
pub const ENV_LOG_FORMAT: &str = "RUST_LOG_FORMAT";

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parse a `RUST_LOG_FORMAT` value. Anything other than `json` is text.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    /// Read the format from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(ENV_LOG_FORMAT)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

/// Install the global `tracing` subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .json()
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .compact()
            .try_init(),
    };

    installed.map_err(|e| anyhow!("failed to initialise logging: {e}"))
}
