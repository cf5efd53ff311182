// burncheck-core/src/runtime/validator.rs
// ============================================================================
// Module: Burncheck Output Validator
// Description: Verdict computation from captured output and references.
// Purpose: Evaluate correctness and performance checks for one run.
// Dependencies: crate::{core, runtime::scanner}
// ============================================================================

//! ## Overview
//! Validation is the single canonical evaluation path for one benchmark run.
//! The correctness check and the performance check never short-circuit each
//! other: a run with a wrong success count still gets its metric extracted
//! and classified, and both outcomes are reported on the verdict.
//!
//! Absence of data is never ignored. When a reference baseline exists and no
//! throughput sample matched, the run fails rather than being waved through
//! as unreferenced.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Classification;
use crate::core::ExtractionResult;
use crate::core::FailureReason;
use crate::core::ReferenceEntry;
use crate::core::Verdict;
use crate::runtime::scanner::count_success_tokens;
use crate::runtime::scanner::extract_samples;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when a verdict cannot be computed at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The captured output is entirely absent.
    ///
    /// A missing capture means the execution layer failed before validation;
    /// guessing a verdict from nothing would mask that failure.
    #[error("captured output is empty")]
    EmptyOutput,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates the captured output of one benchmark run.
///
/// `expected_ok_count` is the task count times the GPUs per node resolved
/// for the target. `reference` is the baseline entry for the target, when
/// one exists.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyOutput`] when `raw_output` is empty.
pub fn validate(
    raw_output: &str,
    expected_ok_count: u64,
    reference: Option<&ReferenceEntry>,
) -> Result<Verdict, ValidationError> {
    if raw_output.is_empty() {
        return Err(ValidationError::EmptyOutput);
    }

    let extraction = ExtractionResult {
        ok_count: count_success_tokens(raw_output),
        expected_count: expected_ok_count,
        perf_values: extract_samples(raw_output).iter().map(|sample| sample.gflops).collect(),
    };

    Ok(verdict_from_extraction(&extraction, reference))
}

/// Computes the verdict for an extraction result against a reference.
fn verdict_from_extraction(
    extraction: &ExtractionResult,
    reference: Option<&ReferenceEntry>,
) -> Verdict {
    let correct = extraction.is_correct();
    let metric = extraction.metric();

    let mut failures = Vec::new();
    if !correct {
        failures.push(FailureReason::SuccessCountMismatch {
            expected: extraction.expected_count,
            observed: extraction.ok_count,
        });
    }

    let applied_range = reference.map(ReferenceEntry::acceptance_range);
    let classification = match (&applied_range, metric) {
        (None, _) => Classification::NoReference,
        (Some(_), None) => {
            failures.push(FailureReason::MissingSamples);
            Classification::Fail
        }
        (Some(range), Some(metric)) => {
            if range.contains(metric) {
                Classification::Pass
            } else {
                failures.push(FailureReason::MetricOutOfRange {
                    metric,
                    range: *range,
                });
                Classification::Fail
            }
        }
    };

    Verdict {
        correct,
        ok_count: extraction.ok_count,
        expected_ok_count: extraction.expected_count,
        metric,
        classification,
        applied_range,
        failures,
    }
}
