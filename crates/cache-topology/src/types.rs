// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Cache topology data shapes and lookup queries.

/// Kind of a CPU cache, as reported by the sysfs `type` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub enum CacheType {
    /// The type field was missing or unrecognised.
    #[default]
    Unknown,
    /// Data cache.
    Data,
    /// Instruction cache.
    Instruction,
    /// Unified data + instruction cache.
    Unified,
}

impl CacheType {
    /// Parses a sysfs `type` label (`"Data"`, `"Instruction"`, `"Unified"`).
    ///
    /// Unrecognised labels map to [`CacheType::Unknown`] — the field is
    /// informational and must not fail enumeration.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "data" => Self::Data,
            "instruction" => Self::Instruction,
            "unified" => Self::Unified,
            _ => Self::Unknown,
        }
    }
}

/// One cache level of one CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CpuCache {
    /// Cache level (1, 2, 3, ...).
    pub level: u16,
    /// Data, instruction, or unified.
    pub cache_type: CacheType,
    /// Total size in bytes.
    pub size_bytes: u64,
    /// Cache line size in bytes.
    pub line_size_bytes: u32,
    /// Ways of associativity.
    pub ways: u32,
}

/// One CPU and the caches it exposes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Cpu {
    /// CPU number, matching the `cpuN` sysfs directory.
    pub num: u32,
    /// Whether the CPU was online at enumeration time.
    pub online: bool,
    /// Caches in sysfs index order; empty if the CPU exposes none.
    pub caches: Vec<CpuCache>,
}

/// The full discovered topology: every enumerated CPU and its caches.
///
/// Owned by the caller; dropping it releases everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct CpuTopology {
    /// Enumerated CPUs in CPU-number order.
    pub cpus: Vec<Cpu>,
}

impl CpuTopology {
    /// Looks up the first cache entry matching the requested level.
    ///
    /// Scans CPUs in order, then each CPU's caches in order. Returns `None`
    /// when no CPU exposes that level — including the empty topology — so a
    /// host with partial cache information degrades to "not found" rather
    /// than an error.
    pub fn cache_by_level(&self, level: u16) -> Option<&CpuCache> {
        self.cpus
            .iter()
            .flat_map(|cpu| cpu.caches.iter())
            .find(|cache| cache.level == level)
    }

    /// Number of enumerated CPUs.
    pub fn cpu_count(&self) -> usize {
        self.cpus.len()
    }

    /// Returns `true` if no CPUs were enumerated.
    pub fn is_empty(&self) -> bool {
        self.cpus.is_empty()
    }
}
