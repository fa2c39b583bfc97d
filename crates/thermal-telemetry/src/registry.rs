// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Thermal sensor discovery and polling via `/sys/class/thermal/`.
//!
//! The kernel exposes one `thermal_zoneN` directory per sensor, each with a
//! one-line `type` file (human-readable label, e.g. `x86_pkg_temp`) and a
//! one-line `temp` file (decimal integer, millidegrees Celsius). Discovery
//! walks that listing once; each refresh tick re-reads every known zone's
//! `temp` file and pushes the value into the sensor's history buffer.

use crate::stats::ThermalStats;
use crate::{Reading, TelemetryError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Upper bound on discovered sensors. Zones beyond this are ignored.
pub const MAX_SENSORS: usize = 31;

/// Default sysfs root for thermal zone enumeration.
const THERMAL_ROOT: &str = "/sys/class/thermal";

/// Directory-name prefix that identifies a thermal zone entry.
const ZONE_PREFIX: &str = "thermal_zone";

/// One discovered thermal sensor.
///
/// Descriptors are owned exclusively by the [`SensorRegistry`]; the `index`
/// is assigned densely at discovery time and never changes for the lifetime
/// of the registry. It is the key into [`ThermalStats`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct SensorDescriptor {
    /// Zone directory name under the sysfs root, e.g. `thermal_zone0`.
    pub name: String,
    /// Sensor type label from the zone's `type` file, e.g. `cpu-thermal`.
    pub kind: String,
    /// Dense zero-based index, assigned in discovery order.
    pub index: usize,
}

/// Outcome counts for one refresh tick.
///
/// Per-sensor read or parse failures are soft: the sensor is skipped for
/// this tick and counted here, so callers can track degradation without a
/// hard error in the way of the primary workload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RefreshReport {
    /// Sensors whose reading was parsed and recorded this tick.
    pub sampled: usize,
    /// Sensors skipped this tick (unreadable or unparsable).
    pub skipped: usize,
}

impl RefreshReport {
    /// Total number of sensors visited.
    pub fn total(&self) -> usize {
        self.sampled + self.skipped
    }
}

/// The set of thermal sensors discovered on this host.
///
/// Built once by [`SensorRegistry::discover`]; the registry owns its
/// descriptors, and dropping it releases everything. Re-discovery simply
/// constructs a fresh registry.
#[derive(Debug)]
pub struct SensorRegistry {
    root: PathBuf,
    sensors: Vec<SensorDescriptor>,
}

impl SensorRegistry {
    /// Discovers all thermal sensors under the default sysfs root.
    ///
    /// A host without thermal sensors (no `/sys/class/thermal`, e.g. a
    /// container or non-Linux CI box) yields an *empty* registry, not an
    /// error. Only a root that exists but cannot be enumerated is a hard
    /// failure.
    pub fn discover() -> Result<Self, TelemetryError> {
        Self::discover_at(THERMAL_ROOT)
    }

    /// Discovers thermal sensors under a specific root.
    ///
    /// Exists for tests and for containers that bind-mount sysfs somewhere
    /// other than `/sys`.
    pub fn discover_at(root: impl Into<PathBuf>) -> Result<Self, TelemetryError> {
        let root = root.into();
        let entries = match fs::read_dir(&root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no thermal root at {}; registry is empty", root.display());
                return Ok(Self {
                    root,
                    sensors: Vec::new(),
                });
            }
            Err(e) => {
                return Err(TelemetryError::Discovery {
                    path: root.display().to_string(),
                    source: e,
                })
            }
        };

        let mut sensors = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with(ZONE_PREFIX) {
                continue;
            }
            if sensors.len() >= MAX_SENSORS {
                tracing::debug!("sensor limit ({MAX_SENSORS}) reached; ignoring further zones");
                break;
            }

            // A zone without a readable type label is skipped, not fatal:
            // the host still reports every other sensor.
            let type_path = root.join(name.as_ref()).join("type");
            let kind = match fs::read_to_string(&type_path) {
                Ok(s) => s.trim().to_string(),
                Err(e) => {
                    tracing::warn!("skipping {name}: cannot read {}: {e}", type_path.display());
                    continue;
                }
            };

            let index = sensors.len();
            sensors.push(SensorDescriptor {
                name: name.into_owned(),
                kind,
                index,
            });
        }

        tracing::debug!(
            "discovered {} thermal sensor(s) under {}",
            sensors.len(),
            root.display()
        );
        Ok(Self { root, sensors })
    }

    /// Reads the current value of every known sensor and pushes it into the
    /// corresponding history buffer.
    ///
    /// One synchronous pass, no retries: a sensor whose `temp` file is
    /// unreadable or unparsable this tick is skipped and counted in the
    /// report. Refresh itself never fails.
    pub fn refresh(&self, stats: &mut ThermalStats) -> RefreshReport {
        let mut report = RefreshReport::default();
        for sensor in &self.sensors {
            match self.read_reading(sensor) {
                Ok(reading) => {
                    if stats.record(sensor.index, reading) {
                        report.sampled += 1;
                    } else {
                        tracing::debug!("{}: index {} out of range", sensor.name, sensor.index);
                        report.skipped += 1;
                    }
                }
                Err(e) => {
                    tracing::debug!("{}: skipped this tick: {e}", sensor.name);
                    report.skipped += 1;
                }
            }
        }
        report
    }

    /// All discovered sensors, in discovery order.
    pub fn sensors(&self) -> &[SensorDescriptor] {
        &self.sensors
    }

    /// Looks up a sensor by its dense index.
    pub fn get(&self, index: usize) -> Option<&SensorDescriptor> {
        self.sensors.get(index)
    }

    /// Number of discovered sensors.
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// Returns `true` if no sensors were discovered.
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// The sysfs root this registry was discovered under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads and parses one sensor's current temperature.
    fn read_reading(&self, sensor: &SensorDescriptor) -> Result<Reading, TelemetryError> {
        let path = self.root.join(&sensor.name).join("temp");
        let content = fs::read_to_string(&path).map_err(|e| TelemetryError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let content = content.trim();
        let millidegrees: i64 = content.parse().map_err(|_| TelemetryError::ParseError {
            path: path.display().to_string(),
            detail: format!("expected integer millidegrees, got '{content}'"),
        })?;
        Ok(Reading::from_millidegrees(millidegrees))
    }
}
