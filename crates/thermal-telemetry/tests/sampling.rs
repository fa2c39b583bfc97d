// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: discovery → refresh → aggregates over a fake sysfs
//! tree, proving the registry, history buffers, and statistics compose
//! end-to-end without touching real hardware.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thermal_telemetry::{
    Reading, SensorRegistry, ThermalStats, HISTORY_CAPACITY, MAX_SENSORS,
};

// ── Helpers ────────────────────────────────────────────────────

/// Creates a fresh fixture root under the system temp directory, clearing
/// leftovers from any previous run.
fn fixture_root(name: &str) -> PathBuf {
    let root = std::env::temp_dir()
        .join("thermal_telemetry_it")
        .join(name);
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(&root).unwrap();
    root
}

/// Writes one fake thermal zone directory with `type` and `temp` files.
fn write_zone(root: &Path, name: &str, kind: &str, temp_millidegrees: i64) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    let mut f = fs::File::create(dir.join("type")).unwrap();
    writeln!(f, "{kind}").unwrap();
    set_temp(root, name, temp_millidegrees);
}

/// Overwrites a zone's current `temp` value, as the kernel would between
/// ticks.
fn set_temp(root: &Path, name: &str, temp_millidegrees: i64) {
    let mut f = fs::File::create(root.join(name).join("temp")).unwrap();
    writeln!(f, "{temp_millidegrees}").unwrap();
}

fn find_index(registry: &SensorRegistry, kind: &str) -> usize {
    registry
        .sensors()
        .iter()
        .find(|s| s.kind == kind)
        .unwrap()
        .index
}

// ── Scenarios ──────────────────────────────────────────────────

#[test]
fn single_sensor_rolling_aggregates() {
    let root = fixture_root("single_sensor");
    write_zone(&root, "thermal_zone0", "cpu-thermal", 40000);

    let registry = SensorRegistry::discover_at(&root).unwrap();
    let mut stats = ThermalStats::new();

    for temp in [40000, 42000, 41000] {
        set_temp(&root, "thermal_zone0", temp);
        let report = registry.refresh(&mut stats);
        assert_eq!(report.sampled, 1);
        assert_eq!(report.skipped, 0);
    }

    let index = find_index(&registry, "cpu-thermal");
    assert_eq!(stats.buffer(index).unwrap().len(), 3);
    assert_eq!(stats.average(index), Some(Reading::from_millidegrees(41000)));
    assert_eq!(stats.max(index), Some(Reading::from_millidegrees(42000)));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn window_overwrites_oldest_after_capacity_ticks() {
    let root = fixture_root("window_overwrite");
    write_zone(&root, "thermal_zone0", "soc-thermal", 0);

    let registry = SensorRegistry::discover_at(&root).unwrap();
    let mut stats = ThermalStats::new();

    // Push capacity + 1 distinct values; the first must fall out.
    let n = HISTORY_CAPACITY as i64 + 1;
    for v in 1..=n {
        set_temp(&root, "thermal_zone0", v * 1000);
        registry.refresh(&mut stats);
    }

    let index = find_index(&registry, "soc-thermal");
    let buffer = stats.buffer(index).unwrap();
    assert_eq!(buffer.len(), HISTORY_CAPACITY);

    // Window is [2000, 3000, ..., n*1000]: the first push fell out.
    let expected_avg = (2..=n).map(|v| v * 1000).sum::<i64>() / HISTORY_CAPACITY as i64;
    assert_eq!(stats.average(index).unwrap().millidegrees, expected_avg);
    assert_eq!(stats.max(index).unwrap().millidegrees, n * 1000);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn skipped_candidates_leave_no_index_gaps() {
    let root = fixture_root("index_gaps");
    write_zone(&root, "thermal_zone0", "a", 10000);
    write_zone(&root, "thermal_zone2", "c", 30000);
    // zone1 has no type file and must be skipped without consuming an index.
    fs::create_dir_all(root.join("thermal_zone1")).unwrap();
    // Unrelated entries are ignored entirely.
    write_zone(&root, "cooling_device0", "fan", 0);

    let registry = SensorRegistry::discover_at(&root).unwrap();
    assert_eq!(registry.len(), 2);

    let mut indices: Vec<usize> = registry.sensors().iter().map(|s| s.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1]);
    for sensor in registry.sensors() {
        assert_eq!(registry.get(sensor.index).unwrap().name, sensor.name);
    }

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn discovery_caps_at_max_sensors() {
    let root = fixture_root("max_sensors");
    for i in 0..MAX_SENSORS + 3 {
        write_zone(&root, &format!("thermal_zone{i}"), &format!("zone{i}"), 1000);
    }

    let registry = SensorRegistry::discover_at(&root).unwrap();
    assert_eq!(registry.len(), MAX_SENSORS);

    // Every descriptor still samples into a valid slot.
    let mut stats = ThermalStats::new();
    let report = registry.refresh(&mut stats);
    assert_eq!(report.sampled, MAX_SENSORS);
    assert_eq!(report.skipped, 0);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn empty_root_is_not_an_error() {
    let registry = SensorRegistry::discover_at("/nonexistent/telemetry/it/root").unwrap();
    assert!(registry.is_empty());

    let mut stats = ThermalStats::new();
    let report = registry.refresh(&mut stats);
    assert_eq!(report.total(), 0);
    assert!(registry.summarize(&stats).is_empty());
}

#[test]
fn vanished_sensor_degrades_to_skips() {
    let root = fixture_root("vanished_sensor");
    write_zone(&root, "thermal_zone0", "steady", 40000);
    write_zone(&root, "thermal_zone1", "flaky", 50000);

    let registry = SensorRegistry::discover_at(&root).unwrap();
    let mut stats = ThermalStats::new();

    let report = registry.refresh(&mut stats);
    assert_eq!(report.sampled, 2);

    // The flaky zone's reading vanishes mid-run (driver unbind).
    fs::remove_file(root.join("thermal_zone1").join("temp")).unwrap();
    let report = registry.refresh(&mut stats);
    assert_eq!(report.sampled, 1);
    assert_eq!(report.skipped, 1);

    // The steady sensor kept accumulating; the flaky one retains its
    // pre-failure history.
    assert_eq!(stats.buffer(find_index(&registry, "steady")).unwrap().len(), 2);
    assert_eq!(stats.buffer(find_index(&registry, "flaky")).unwrap().len(), 1);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn drop_and_rediscover_yields_fresh_registry() {
    let root = fixture_root("rediscover");
    write_zone(&root, "thermal_zone0", "first", 40000);

    let registry = SensorRegistry::discover_at(&root).unwrap();
    assert_eq!(registry.len(), 1);
    drop(registry);

    // A zone appears between discoveries; the fresh registry sees it, the
    // old one is gone.
    write_zone(&root, "thermal_zone1", "second", 41000);
    let registry = SensorRegistry::discover_at(&root).unwrap();
    assert_eq!(registry.len(), 2);

    let mut indices: Vec<usize> = registry.sensors().iter().map(|s| s.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1]);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn summaries_serialise_to_json() {
    let root = fixture_root("summaries_json");
    write_zone(&root, "thermal_zone0", "cpu-thermal", 41000);

    let registry = SensorRegistry::discover_at(&root).unwrap();
    let mut stats = ThermalStats::new();
    registry.refresh(&mut stats);

    let summaries = registry.summarize(&stats);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].samples, 1);

    let json = serde_json::to_string(&summaries).unwrap();
    assert!(json.contains("cpu-thermal"));
    assert!(json.contains("41000"));

    let _ = fs::remove_dir_all(&root);
}
