// burncheck-core/src/runtime/resolver.rs
// ============================================================================
// Module: Burncheck Target Resolver
// Description: Declarative target table and parameter resolution.
// Purpose: Map a system/partition identity to its parameter bundle.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Resolution is a deterministic lookup over one declarative table. System
//! rows take precedence; partition rows are the tiebreaker within systems
//! that host multiple GPU generations. Unrecognized identities resolve to a
//! conservative default bundle instead of failing, so the check still
//! attempts a run on hardware the table does not know yet.
//!
//! The build-time view ([`gpu_generation`]) and the run-time view
//! ([`gpus_per_node`]) consult the same table rows as [`resolve`]; a row
//! supplies its codegen architecture and its GPU count together, so the two
//! lifecycle phases always agree on which target maps to which hardware.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::GpuGeneration;
use crate::core::ParameterBundle;
use crate::core::SystemIdentity;

// ============================================================================
// SECTION: Target Table
// ============================================================================

/// GPU count used when no table row matches the identity.
pub const DEFAULT_GPUS_PER_NODE: u32 = 1;

/// Libraries every build of the benchmark links against.
const LINK_FLAGS: &[&str] = &["-lcuda", "-lcublas", "-lnvidia-ml"];

/// Match criterion for a target table row.
enum TargetMatcher {
    /// Matches every partition of a system.
    System(&'static str),
    /// Matches one fully qualified partition.
    Partition(&'static str),
}

/// One row of the target table.
struct TargetProfile {
    /// Identity criterion for this row.
    matcher: TargetMatcher,
    /// Environment modules loaded before build and run.
    modules: &'static [&'static str],
    /// Arguments passed to the benchmark executable.
    executable_args: &'static [&'static str],
    /// GPUs the benchmark drives on each node.
    gpus_per_node: u32,
    /// GPU generation installed on this target.
    generation: Option<GpuGeneration>,
    /// Whether jobs must hold their nodes exclusively.
    exclusive: bool,
}

/// Declarative target table, system rows before partition rows.
///
/// `arolla` and `tsa` expose GPU-exclusive compute nodes with eight devices
/// each; `daint` and `dom` run a single device per node behind the Cray
/// accelerator module; `ault` is heterogeneous and resolves per partition.
const TARGET_TABLE: &[TargetProfile] = &[
    TargetProfile {
        matcher: TargetMatcher::System("arolla"),
        modules: &["cuda/10.1.243"],
        executable_args: &["-d", "40"],
        gpus_per_node: 8,
        generation: Some(GpuGeneration::Volta),
        exclusive: true,
    },
    TargetProfile {
        matcher: TargetMatcher::System("tsa"),
        modules: &["cuda/10.1.243"],
        executable_args: &["-d", "40"],
        gpus_per_node: 8,
        generation: Some(GpuGeneration::Volta),
        exclusive: true,
    },
    TargetProfile {
        matcher: TargetMatcher::System("daint"),
        modules: &["craype-accel-nvidia60"],
        executable_args: &["-d", "20"],
        gpus_per_node: 1,
        generation: Some(GpuGeneration::Pascal),
        exclusive: false,
    },
    TargetProfile {
        matcher: TargetMatcher::System("dom"),
        modules: &["craype-accel-nvidia60"],
        executable_args: &["-d", "20"],
        gpus_per_node: 1,
        generation: Some(GpuGeneration::Pascal),
        exclusive: false,
    },
    TargetProfile {
        matcher: TargetMatcher::Partition("ault:amdv100"),
        modules: &["cuda"],
        executable_args: &["-d", "10"],
        gpus_per_node: 2,
        generation: Some(GpuGeneration::Volta),
        exclusive: false,
    },
    TargetProfile {
        matcher: TargetMatcher::Partition("ault:intelv100"),
        modules: &["cuda"],
        executable_args: &["-d", "10"],
        gpus_per_node: 4,
        generation: Some(GpuGeneration::Volta),
        exclusive: false,
    },
    TargetProfile {
        matcher: TargetMatcher::Partition("ault:amda100"),
        modules: &["cuda"],
        executable_args: &["-d", "10"],
        gpus_per_node: 4,
        generation: Some(GpuGeneration::Ampere),
        exclusive: false,
    },
];

impl TargetMatcher {
    /// Returns whether this criterion matches the identity.
    fn matches(&self, identity: &SystemIdentity) -> bool {
        match self {
            Self::System(system) => identity.system.as_str() == *system,
            Self::Partition(partition) => identity.partition.as_str() == *partition,
        }
    }
}

/// Finds the first table row matching the identity.
fn find_profile(identity: &SystemIdentity) -> Option<&'static TargetProfile> {
    TARGET_TABLE.iter().find(|profile| profile.matcher.matches(identity))
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves the parameter bundle for a run identity.
///
/// Total over all identities: unknown targets receive the conservative
/// default bundle (one GPU, no modules, no arguments, no codegen flags).
#[must_use]
pub fn resolve(identity: &SystemIdentity) -> ParameterBundle {
    find_profile(identity).map_or_else(default_bundle, |profile| ParameterBundle {
        modules: to_owned_list(profile.modules),
        executable_args: to_owned_list(profile.executable_args),
        gpus_per_node: profile.gpus_per_node,
        arch_flags: profile.generation.map(GpuGeneration::arch_flags),
        link_flags: to_owned_list(LINK_FLAGS),
        exclusive: profile.exclusive,
    })
}

/// Returns the GPU generation for the identity, if one is known.
///
/// Consulted at build time to derive codegen flags.
#[must_use]
pub fn gpu_generation(identity: &SystemIdentity) -> Option<GpuGeneration> {
    find_profile(identity).and_then(|profile| profile.generation)
}

/// Returns the GPU count per node for the identity.
///
/// Consulted at run time to size the job and the expected success count.
#[must_use]
pub fn gpus_per_node(identity: &SystemIdentity) -> u32 {
    find_profile(identity).map_or(DEFAULT_GPUS_PER_NODE, |profile| profile.gpus_per_node)
}

/// Builds the conservative default bundle for unrecognized identities.
fn default_bundle() -> ParameterBundle {
    ParameterBundle {
        modules: Vec::new(),
        executable_args: Vec::new(),
        gpus_per_node: DEFAULT_GPUS_PER_NODE,
        arch_flags: None,
        link_flags: to_owned_list(LINK_FLAGS),
        exclusive: false,
    }
}

/// Copies a static string list into owned strings.
fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}
