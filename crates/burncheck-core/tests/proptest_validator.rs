// burncheck-core/tests/proptest_validator.rs
// ============================================================================
// Module: Validator Property-Based Tests
// Description: Property tests for validator determinism and stability.
// Purpose: Detect panics and invariant violations across wide input ranges.
// ============================================================================

//! Property-based tests for validator and scanner invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use burncheck_core::Classification;
use burncheck_core::ReferenceEntry;
use burncheck_core::SystemIdentity;
use burncheck_core::count_success_tokens;
use burncheck_core::extract_samples;
use burncheck_core::resolve;
use burncheck_core::validate;
use proptest::prelude::*;

fn reference_strategy() -> impl Strategy<Value = ReferenceEntry> {
    (1.0f64 .. 1.0e5, -0.9f64 .. 0.0, proptest::option::of(0.0f64 .. 0.9)).prop_map(
        |(baseline, lower, upper)| ReferenceEntry {
            baseline,
            lower_tolerance: lower,
            upper_tolerance: upper,
            unit: "Gflop/s".to_string(),
        },
    )
}

proptest! {
    #[test]
    fn validate_never_panics_on_random_text(
        text in ".{1,400}",
        expected in 0u64 .. 64,
        reference in proptest::option::of(reference_strategy()),
    ) {
        let _ = validate(&text, expected, reference.as_ref());
    }

    #[test]
    fn validate_is_deterministic_and_idempotent(
        text in ".{1,400}",
        expected in 0u64 .. 64,
        reference in proptest::option::of(reference_strategy()),
    ) {
        let first = validate(&text, expected, reference.as_ref());
        let second = validate(&text, expected, reference.as_ref());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn scanner_never_panics_on_random_text(text in ".{0,400}") {
        let _ = count_success_tokens(&text);
        let _ = extract_samples(&text);
    }

    #[test]
    fn marker_count_matches_constructed_output(count in 0u64 .. 32) {
        let output = "OK\n".repeat(usize::try_from(count).unwrap_or(0));
        prop_assert_eq!(count_success_tokens(&output), count);
    }

    #[test]
    fn metric_is_the_worst_constructed_sample(values in proptest::collection::vec(1.0f64 .. 1.0e5, 1 .. 8)) {
        let mut output = String::new();
        for (index, value) in values.iter().enumerate() {
            output.push_str(&format!("GPU {index}(V100): {value} GF/s  50.0 Celsius\n"));
        }
        output.push_str("OK\n");
        let worst = values.iter().copied().fold(f64::INFINITY, f64::min);
        let verdict = validate(&output, 1, None).unwrap();
        prop_assert_eq!(verdict.metric, Some(worst));
        prop_assert_eq!(verdict.classification, Classification::NoReference);
    }

    #[test]
    fn resolve_is_total_over_random_identities(system in "[a-z]{1,12}", partition in "[a-z:]{1,16}") {
        let identity = SystemIdentity::new(system.as_str(), partition.as_str());
        let bundle = resolve(&identity);
        prop_assert!(bundle.gpus_per_node >= 1);
        prop_assert_eq!(resolve(&identity), bundle);
    }
}
