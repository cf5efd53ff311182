// burncheck-core/src/core/verdict.rs
// ============================================================================
// Module: Burncheck Verdicts
// Description: Extraction results, classifications, and run verdicts.
// Purpose: Provide structured, serializable outcome records for one run.
// Dependencies: crate::core::reference, serde
// ============================================================================

//! ## Overview
//! A verdict is the complete outcome of validating one benchmark run. The
//! correctness check (success-marker count) and the performance check
//! (worst-GPU throughput against a baseline) are orthogonal: both are always
//! evaluated and both are reported, so a reporting pipeline can distinguish
//! "a device failed to report success" from "devices were slow".

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::reference::AcceptanceRange;

// ============================================================================
// SECTION: Extraction Result
// ============================================================================

/// Values extracted from the captured output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Success markers found in the output.
    pub ok_count: u64,
    /// Success markers the run was expected to report.
    pub expected_count: u64,
    /// Per-GPU throughput samples in encounter order.
    pub perf_values: Vec<f64>,
}

impl ExtractionResult {
    /// Returns whether every expected success marker was found, exactly.
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        self.ok_count == self.expected_count
    }

    /// Returns the run metric: the minimum throughput sample.
    ///
    /// The slowest device bounds the usefulness of the node, so the metric
    /// is always the worst sample, never the mean or the best.
    #[must_use]
    pub fn metric(&self) -> Option<f64> {
        self.perf_values.iter().copied().reduce(f64::min)
    }
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Performance classification of a run metric against its reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Metric lies inside the acceptance range.
    Pass,
    /// Metric lies outside the acceptance range, or no metric could be
    /// extracted while a reference exists.
    Fail,
    /// No reference entry exists for the target; informational only.
    NoReference,
}

// ============================================================================
// SECTION: Failure Reasons
// ============================================================================

/// Structured reason a run did not pass cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// The output did not contain exactly the expected success markers.
    SuccessCountMismatch {
        /// Markers the run was expected to report.
        expected: u64,
        /// Markers actually found.
        observed: u64,
    },
    /// A reference exists but no throughput samples were extracted.
    MissingSamples,
    /// The metric lies outside the acceptance range.
    MetricOutOfRange {
        /// Extracted worst-GPU metric.
        metric: f64,
        /// Acceptance range the metric was held against.
        range: AcceptanceRange,
    },
}

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Final outcome of validating one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the success-marker count matched exactly.
    pub correct: bool,
    /// Success markers found in the output.
    pub ok_count: u64,
    /// Success markers the run was expected to report.
    pub expected_ok_count: u64,
    /// Worst-GPU throughput metric, absent when no samples matched.
    pub metric: Option<f64>,
    /// Performance classification against the reference table.
    pub classification: Classification,
    /// Acceptance range applied, absent without a reference entry.
    pub applied_range: Option<AcceptanceRange>,
    /// Failure reasons in evaluation order; empty for a clean pass.
    pub failures: Vec<FailureReason>,
}

impl Verdict {
    /// Returns whether the run passed overall.
    ///
    /// A run passes when the success-marker count matched and the
    /// classification is not a failure. `NoReference` does not fail a run
    /// by itself.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.correct && self.classification != Classification::Fail
    }
}
