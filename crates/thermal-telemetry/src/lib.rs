// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # thermal-telemetry
//!
//! Periodic thermal sampling from `/sys/class/thermal/` with a bounded
//! rolling history per sensor, so a long-running workload generator can
//! correlate observed temperatures with load without unbounded memory
//! growth.
//!
//! # Key Components
//!
//! - [`SensorRegistry`] — discovers all thermal zones once, assigns each a
//!   dense stable index, and re-reads every zone's current value on each
//!   refresh tick.
//! - [`HistoryBuffer`] — a fixed-capacity circular buffer of the most
//!   recent readings for one sensor; once full, new samples overwrite the
//!   oldest.
//! - [`ThermalStats`] — one history buffer per sensor index, with derived
//!   rolling average and maximum.
//!
//! # Graceful Degradation
//!
//! Thermal data is best-effort by design. A host with no thermal zones
//! (container, non-Linux CI) yields an empty registry, not an error. A
//! sensor whose metadata cannot be read at discovery is skipped; a sensor
//! whose value cannot be read or parsed during a tick is skipped for that
//! tick and counted in the [`RefreshReport`]. The embedding workload never
//! blocks on sensor availability.
//!
//! # Concurrency
//!
//! Single-threaded and synchronous: discovery and refresh are blocking
//! filesystem reads run to completion on the calling thread. No internal
//! locking — callers polling from multiple threads must serialise access to
//! each registry/stats pair.
//!
//! # Example
//! ```no_run
//! use thermal_telemetry::{SensorRegistry, ThermalStats};
//!
//! let registry = SensorRegistry::discover().expect("sensor enumeration failed");
//! let mut stats = ThermalStats::new();
//!
//! // One tick; the caller owns the cadence.
//! let report = registry.refresh(&mut stats);
//! println!("sampled {} of {} sensors", report.sampled, report.total());
//!
//! for summary in registry.summarize(&stats) {
//!     println!("{}", summary.summary());
//! }
//! ```

mod error;
mod history;
mod registry;
mod stats;

pub use error::TelemetryError;
pub use history::{HistoryBuffer, Reading, HISTORY_CAPACITY};
pub use registry::{RefreshReport, SensorDescriptor, SensorRegistry, MAX_SENSORS};
pub use stats::{SensorSummary, ThermalStats};

/// Discovers the host's thermal sensors under the default sysfs root.
///
/// This is a convenience wrapper around [`SensorRegistry::discover()`].
pub fn discover() -> Result<SensorRegistry, TelemetryError> {
    SensorRegistry::discover()
}
