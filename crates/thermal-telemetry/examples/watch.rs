// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: poll the host's thermal sensors for a few ticks.
//!
//! Stands in for the embedding workload's sampling loop: discover once,
//! refresh on a fixed cadence, then print per-sensor rolling statistics
//! both human-readable and as JSON.
//!
//! ```bash
//! cargo run -p thermal-telemetry --example watch
//! ```

use std::time::Duration;
use thermal_telemetry::{SensorRegistry, ThermalStats};

const TICKS: usize = 5;
const TICK_INTERVAL: Duration = Duration::from_millis(500);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing.
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let registry = SensorRegistry::discover()?;
    if registry.is_empty() {
        println!("No thermal sensors exposed on this host — nothing to watch.");
        return Ok(());
    }

    println!("Discovered {} thermal sensor(s):", registry.len());
    for sensor in registry.sensors() {
        println!("  [{}] {} ({})", sensor.index, sensor.name, sensor.kind);
    }
    println!();

    let mut stats = ThermalStats::new();
    for tick in 1..=TICKS {
        let report = registry.refresh(&mut stats);
        println!(
            "tick {tick}/{TICKS}: sampled {} of {} sensors ({} skipped)",
            report.sampled,
            report.total(),
            report.skipped,
        );
        std::thread::sleep(TICK_INTERVAL);
    }
    println!();

    let summaries = registry.summarize(&stats);
    for summary in &summaries {
        println!("{}", summary.summary());
    }

    println!("\nJSON:\n{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}
