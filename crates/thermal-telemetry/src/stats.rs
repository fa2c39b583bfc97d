// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-sensor statistics derived from the rolling history.
//!
//! [`ThermalStats`] holds one [`HistoryBuffer`] per possible sensor index.
//! It shares the lifetime of the embedding telemetry state: buffers are
//! constructed up front, mutated only by refresh ticks, and never
//! individually destroyed.

use crate::history::{HistoryBuffer, Reading};
use crate::registry::{SensorRegistry, MAX_SENSORS};

/// Rolling per-sensor statistics, keyed by sensor index.
///
/// All [`MAX_SENSORS`] slots exist from construction; lookups are
/// bounds-checked rather than relying on the caller to stay in range.
#[derive(Debug, Clone)]
pub struct ThermalStats {
    buffers: Vec<HistoryBuffer>,
}

impl ThermalStats {
    /// Creates empty statistics sized for the maximum sensor count.
    pub fn new() -> Self {
        Self {
            buffers: (0..MAX_SENSORS).map(|_| HistoryBuffer::new()).collect(),
        }
    }

    /// Records a reading for the sensor at `index`.
    ///
    /// Returns `false` if `index` is out of range; the reading is dropped.
    pub fn record(&mut self, index: usize, reading: Reading) -> bool {
        match self.buffers.get_mut(index) {
            Some(buffer) => {
                buffer.push(reading);
                true
            }
            None => false,
        }
    }

    /// The history buffer for the sensor at `index`.
    pub fn buffer(&self, index: usize) -> Option<&HistoryBuffer> {
        self.buffers.get(index)
    }

    /// Rolling average for the sensor at `index`.
    ///
    /// `None` if the index is out of range *or* no readings have been
    /// recorded yet; use [`Self::buffer`] to distinguish the two.
    pub fn average(&self, index: usize) -> Option<Reading> {
        self.buffers.get(index).and_then(|b| b.average())
    }

    /// Rolling maximum for the sensor at `index`.
    ///
    /// `None` under the same conditions as [`Self::average`].
    pub fn max(&self, index: usize) -> Option<Reading> {
        self.buffers.get(index).and_then(|b| b.max())
    }

    /// Empties every buffer.
    pub fn clear(&mut self) {
        for buffer in &mut self.buffers {
            buffer.clear();
        }
    }
}

impl Default for ThermalStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time summary of one sensor's rolling statistics.
///
/// Serialisable so the embedding workload can log or export it alongside
/// its own load metrics.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SensorSummary {
    /// Dense sensor index.
    pub index: usize,
    /// Zone directory name, e.g. `thermal_zone0`.
    pub name: String,
    /// Sensor type label, e.g. `cpu-thermal`.
    pub kind: String,
    /// Number of readings currently retained.
    pub samples: usize,
    /// Rolling average, `None` until the first successful sample.
    pub average: Option<Reading>,
    /// Rolling maximum, `None` until the first successful sample.
    pub max: Option<Reading>,
}

impl SensorSummary {
    /// Returns a one-line human-readable summary.
    ///
    /// # Example output
    /// ```text
    /// thermal_zone0 (cpu-thermal): avg 41.0°C, max 42.0°C over 3 samples
    /// ```
    pub fn summary(&self) -> String {
        match (self.average, self.max) {
            (Some(avg), Some(max)) => format!(
                "{} ({}): avg {avg}, max {max} over {} samples",
                self.name, self.kind, self.samples,
            ),
            _ => format!("{} ({}): no samples", self.name, self.kind),
        }
    }
}

impl SensorRegistry {
    /// Builds a per-sensor summary of the current rolling statistics.
    ///
    /// One entry per discovered sensor, in discovery order.
    pub fn summarize(&self, stats: &ThermalStats) -> Vec<SensorSummary> {
        self.sensors()
            .iter()
            .map(|sensor| SensorSummary {
                index: sensor.index,
                name: sensor.name.clone(),
                kind: sensor.kind.clone(),
                samples: stats.buffer(sensor.index).map_or(0, |b| b.len()),
                average: stats.average(sensor.index),
                max: stats.max(sensor.index),
            })
            .collect()
    }
}
