// burncheck-core/src/core/identifiers.rs
// ============================================================================
// Module: Burncheck Identifiers
// Description: Canonical opaque identifiers for fleet systems and partitions.
// Purpose: Provide strongly typed, serializable names with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the string-based identity used to select a benchmark
//! target. Names are opaque and serialize as strings; the scheduler that
//! supplies them is the authority on their spelling. A partition name is
//! always the fully qualified `system:partition` form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Cluster system name as reported by the test-execution framework.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemName(String);

impl SystemName {
    /// Creates a new system name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SystemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SystemName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SystemName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Fully qualified partition name in `system:partition` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionName(String);

impl PartitionName {
    /// Creates a new partition name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartitionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PartitionName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PartitionName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: System Identity
// ============================================================================

/// Identity of the machine a benchmark run targets.
///
/// Supplied by the external framework once per run and never mutated. The
/// system name selects fleet-wide behavior; the partition name disambiguates
/// within heterogeneous systems that host multiple GPU generations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemIdentity {
    /// Cluster system name.
    pub system: SystemName,
    /// Fully qualified partition name.
    pub partition: PartitionName,
}

impl SystemIdentity {
    /// Creates a new system identity.
    #[must_use]
    pub fn new(system: impl Into<SystemName>, partition: impl Into<PartitionName>) -> Self {
        Self {
            system: system.into(),
            partition: partition.into(),
        }
    }
}

impl fmt::Display for SystemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.partition, self.system)
    }
}
