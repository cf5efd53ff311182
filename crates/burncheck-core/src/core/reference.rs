// burncheck-core/src/core/reference.rs
// ============================================================================
// Module: Burncheck Reference Baselines
// Description: Per-machine throughput baselines with tolerance bands.
// Purpose: Define the reference table consulted when classifying a metric.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Reference entries record the expected worst-GPU throughput for a target
//! together with a tolerance band. Tolerances are fractions of the baseline:
//! the lower fraction is conventionally negative (`-0.10` allows 10% below
//! baseline) and the upper fraction may be absent, leaving the band open
//! above. The table is immutable after process start.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::SystemIdentity;

// ============================================================================
// SECTION: Reference Entry
// ============================================================================

/// Throughput baseline and tolerance band for one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Expected worst-GPU throughput.
    pub baseline: f64,
    /// Fractional lower tolerance, conventionally negative.
    pub lower_tolerance: f64,
    /// Fractional upper tolerance; absent means no upper limit.
    pub upper_tolerance: Option<f64>,
    /// Display unit; never used in comparison arithmetic.
    pub unit: String,
}

impl ReferenceEntry {
    /// Computes the acceptance range implied by the baseline and tolerances.
    #[must_use]
    pub fn acceptance_range(&self) -> AcceptanceRange {
        AcceptanceRange {
            lower: self.baseline * (1.0 + self.lower_tolerance),
            upper: self.upper_tolerance.map(|upper| self.baseline * (1.0 + upper)),
        }
    }
}

// ============================================================================
// SECTION: Acceptance Range
// ============================================================================

/// Inclusive acceptance range for a throughput metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceRange {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Inclusive upper bound; absent means open-ended above.
    pub upper: Option<f64>,
}

impl AcceptanceRange {
    /// Returns whether a metric lies inside the range.
    #[must_use]
    pub fn contains(&self, metric: f64) -> bool {
        metric >= self.lower && self.upper.is_none_or(|upper| metric <= upper)
    }
}

// ============================================================================
// SECTION: Reference Table
// ============================================================================

/// Immutable mapping from partition full name to reference entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceTable {
    /// Entries keyed by `system:partition` target name.
    entries: BTreeMap<String, ReferenceEntry>,
}

impl ReferenceTable {
    /// Creates an empty reference table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the fleet baselines shipped with the check.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (target, baseline) in BUILTIN_BASELINES {
            table.insert(
                (*target).to_string(),
                ReferenceEntry {
                    baseline: *baseline,
                    lower_tolerance: BUILTIN_LOWER_TOLERANCE,
                    upper_tolerance: None,
                    unit: BUILTIN_UNIT.to_string(),
                },
            );
        }
        table
    }

    /// Inserts or replaces the entry for a target.
    pub fn insert(&mut self, target: String, entry: ReferenceEntry) {
        self.entries.insert(target, entry);
    }

    /// Looks up the entry for a target name.
    #[must_use]
    pub fn get(&self, target: &str) -> Option<&ReferenceEntry> {
        self.entries.get(target)
    }

    /// Looks up the entry for a run identity by partition full name.
    #[must_use]
    pub fn lookup(&self, identity: &SystemIdentity) -> Option<&ReferenceEntry> {
        self.get(identity.partition.as_str())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in target order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReferenceEntry)> {
        self.entries.iter().map(|(target, entry)| (target.as_str(), entry))
    }
}

// ============================================================================
// SECTION: Built-In Baselines
// ============================================================================

/// Fractional lower tolerance applied to every built-in baseline.
const BUILTIN_LOWER_TOLERANCE: f64 = -0.10;
/// Display unit for every built-in baseline.
const BUILTIN_UNIT: &str = "Gflop/s";

/// Measured worst-GPU throughput baselines per target.
const BUILTIN_BASELINES: &[(&str, f64)] = &[
    ("daint:gpu", 4115.0),
    ("dom:gpu", 4115.0),
    ("arolla:cn", 5861.0),
    ("tsa:cn", 5861.0),
    ("ault:amda100", 17552.0),
    ("ault:amdv100", 6203.0),
    ("ault:intelv100", 6203.0),
];
