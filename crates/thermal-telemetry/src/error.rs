// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for thermal telemetry.

/// Errors that can occur while discovering or sampling thermal sensors.
///
/// Only [`TelemetryError::Discovery`] is ever surfaced to callers as a hard
/// failure; read and parse errors on individual sensors are logged and
/// degrade to "fewer data points" instead of aborting the host workload.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The sensor enumeration root exists but could not be listed.
    ///
    /// A *missing* root is not an error — a host may simply expose no
    /// thermal sensors, and discovery returns an empty registry.
    #[error("failed to enumerate sensors under {path}: {source}")]
    Discovery {
        path: String,
        source: std::io::Error,
    },

    /// Failed to read a sensor's sysfs file.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse a numeric value from a sensor file.
    #[error("failed to parse value from {path}: {detail}")]
    ParseError { path: String, detail: String },
}
