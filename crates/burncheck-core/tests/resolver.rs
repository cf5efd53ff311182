// burncheck-core/tests/resolver.rs
// ============================================================================
// Module: Target Resolver Tests
// Description: Resolution tests for every fleet target and for defaults.
// Purpose: Ensure the target table resolves deterministically and totally.
// Dependencies: burncheck-core
// ============================================================================
//! ## Overview
//! Validates per-target resolution, conservative defaults for unknown
//! identities, and agreement between the build-time and run-time views.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

use burncheck_core::GpuGeneration;
use burncheck_core::SystemIdentity;
use burncheck_core::gpu_generation;
use burncheck_core::gpus_per_node;
use burncheck_core::resolve;

/// Every identity the fleet table knows.
fn known_identities() -> Vec<SystemIdentity> {
    vec![
        SystemIdentity::new("arolla", "arolla:cn"),
        SystemIdentity::new("tsa", "tsa:cn"),
        SystemIdentity::new("daint", "daint:gpu"),
        SystemIdentity::new("dom", "dom:gpu"),
        SystemIdentity::new("ault", "ault:amdv100"),
        SystemIdentity::new("ault", "ault:intelv100"),
        SystemIdentity::new("ault", "ault:amda100"),
    ]
}

// ============================================================================
// SECTION: Exclusive Eight-GPU Systems
// ============================================================================

/// Verifies the exclusive eight-GPU clusters resolve their full profile.
#[test]
fn resolve_exclusive_volta_clusters() {
    for identity in [
        SystemIdentity::new("arolla", "arolla:cn"),
        SystemIdentity::new("tsa", "tsa:cn"),
    ] {
        let bundle = resolve(&identity);
        assert!(bundle.exclusive);
        assert_eq!(bundle.modules, vec!["cuda/10.1.243".to_string()]);
        assert_eq!(bundle.executable_args, vec!["-d".to_string(), "40".to_string()]);
        assert_eq!(bundle.gpus_per_node, 8);
        let arch = bundle.arch_flags.unwrap();
        assert_eq!(arch.compute, "compute_70");
        assert_eq!(arch.sm, "sm_70");
    }
}

// ============================================================================
// SECTION: Single-GPU Production Systems
// ============================================================================

/// Verifies the Cray production clusters resolve one Pascal device per node.
#[test]
fn resolve_cray_production_clusters() {
    for identity in [
        SystemIdentity::new("daint", "daint:gpu"),
        SystemIdentity::new("dom", "dom:gpu"),
    ] {
        let bundle = resolve(&identity);
        assert!(!bundle.exclusive);
        assert_eq!(bundle.modules, vec!["craype-accel-nvidia60".to_string()]);
        assert_eq!(bundle.executable_args, vec!["-d".to_string(), "20".to_string()]);
        assert_eq!(bundle.gpus_per_node, 1);
        assert_eq!(bundle.arch_flags.unwrap().sm, "sm_60");
    }
}

// ============================================================================
// SECTION: Heterogeneous Partitions
// ============================================================================

/// Verifies per-partition resolution on the heterogeneous cluster.
#[test]
fn resolve_heterogeneous_partitions() {
    let amdv100 = resolve(&SystemIdentity::new("ault", "ault:amdv100"));
    assert_eq!(amdv100.gpus_per_node, 2);
    assert_eq!(amdv100.arch_flags.unwrap().compute, "compute_70");

    let intelv100 = resolve(&SystemIdentity::new("ault", "ault:intelv100"));
    assert_eq!(intelv100.gpus_per_node, 4);
    assert_eq!(intelv100.arch_flags.unwrap().compute, "compute_70");

    let amda100 = resolve(&SystemIdentity::new("ault", "ault:amda100"));
    assert_eq!(amda100.gpus_per_node, 4);
    assert_eq!(amda100.arch_flags.unwrap().compute, "compute_80");
}

/// Verifies all heterogeneous partitions share the generic driver module.
#[test]
fn heterogeneous_partitions_share_module_and_args() {
    for partition in ["ault:amdv100", "ault:intelv100", "ault:amda100"] {
        let bundle = resolve(&SystemIdentity::new("ault", partition));
        assert_eq!(bundle.modules, vec!["cuda".to_string()]);
        assert_eq!(bundle.executable_args, vec!["-d".to_string(), "10".to_string()]);
        assert!(!bundle.exclusive);
    }
}

// ============================================================================
// SECTION: Unknown Identities
// ============================================================================

/// Verifies unknown identities resolve to the conservative default bundle.
#[test]
fn resolve_unknown_identity_uses_defaults() {
    let identity = SystemIdentity::new("eiger", "eiger:mc");
    let bundle = resolve(&identity);
    assert_eq!(bundle.gpus_per_node, 1);
    assert!(bundle.modules.is_empty());
    assert!(bundle.executable_args.is_empty());
    assert!(bundle.arch_flags.is_none());
    assert!(!bundle.exclusive);
    assert_eq!(gpu_generation(&identity), None);
    assert_eq!(gpus_per_node(&identity), 1);
}

/// Verifies resolution of unknown identities is deterministic.
#[test]
fn resolve_unknown_identity_is_deterministic() {
    let identity = SystemIdentity::new("unknown", "unknown:gpu");
    assert_eq!(resolve(&identity), resolve(&identity));
}

// ============================================================================
// SECTION: Cross-View Consistency
// ============================================================================

/// Verifies the build-time and run-time views agree with full resolution.
#[test]
fn lifecycle_views_agree_with_resolve() {
    for identity in known_identities() {
        let bundle = resolve(&identity);
        assert_eq!(
            bundle.arch_flags,
            gpu_generation(&identity).map(GpuGeneration::arch_flags),
            "arch flags diverged for {identity}"
        );
        assert_eq!(
            bundle.gpus_per_node,
            gpus_per_node(&identity),
            "GPU count diverged for {identity}"
        );
    }
}

/// Verifies every known identity yields a usable bundle.
#[test]
fn known_identities_yield_usable_bundles() {
    for identity in known_identities() {
        let bundle = resolve(&identity);
        assert!(bundle.gpus_per_node >= 1, "GPU count must be positive for {identity}");
        assert!(!bundle.modules.is_empty(), "known targets carry a module for {identity}");
        assert!(!bundle.link_flags.is_empty());
    }
}

// ============================================================================
// SECTION: Expected Count Invariant
// ============================================================================

/// Verifies the expected success count scales with tasks and GPU count.
#[test]
fn expected_ok_count_scales_with_tasks() {
    let bundle = resolve(&SystemIdentity::new("arolla", "arolla:cn"));
    assert_eq!(bundle.expected_ok_count(0), 0);
    assert_eq!(bundle.expected_ok_count(1), 8);
    assert_eq!(bundle.expected_ok_count(3), 24);

    let default = resolve(&SystemIdentity::new("unknown", "unknown:gpu"));
    assert_eq!(default.expected_ok_count(5), 5);
}
