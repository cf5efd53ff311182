// burncheck-core/src/core/bundle.rs
// ============================================================================
// Module: Burncheck Parameter Bundle
// Description: Resolved build/run parameters for one benchmark execution.
// Purpose: Carry module lists, device arguments, and codegen flags as data.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A parameter bundle is the complete target-specific configuration for one
//! benchmark execution. The resolver produces it once per run; the external
//! framework reads it before the build (codegen flags) and before the run
//! (GPU count, executable arguments). Bundles are plain data: this crate
//! never invokes a compiler or a scheduler.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: GPU Generations
// ============================================================================

/// GPU generations deployed across the fleet, by compute capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpuGeneration {
    /// Compute capability 60 (P100 class).
    Pascal,
    /// Compute capability 70 (V100 class).
    Volta,
    /// Compute capability 80 (A100 class).
    Ampere,
}

impl GpuGeneration {
    /// Returns the two-digit compute capability code.
    #[must_use]
    pub const fn capability_code(self) -> &'static str {
        match self {
            Self::Pascal => "60",
            Self::Volta => "70",
            Self::Ampere => "80",
        }
    }

    /// Returns the codegen flag pair for this generation.
    #[must_use]
    pub fn arch_flags(self) -> ArchFlags {
        let code = self.capability_code();
        ArchFlags {
            compute: format!("compute_{code}"),
            sm: format!("sm_{code}"),
        }
    }
}

// ============================================================================
// SECTION: Architecture Flags
// ============================================================================

/// Compiler architecture flag pair derived from a GPU generation.
///
/// Both values come from the same capability code, so the virtual and real
/// architecture targets cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchFlags {
    /// Virtual architecture target, e.g. `compute_70`.
    pub compute: String,
    /// Real architecture target, e.g. `sm_70`.
    pub sm: String,
}

impl ArchFlags {
    /// Renders the pair as compiler command-line flags.
    #[must_use]
    pub fn as_compiler_flags(&self) -> [String; 2] {
        [format!("-arch={}", self.compute), format!("-code={}", self.sm)]
    }
}

// ============================================================================
// SECTION: Parameter Bundle
// ============================================================================

/// Resolved configuration for one benchmark execution.
///
/// Created once per run by the resolver and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterBundle {
    /// Environment modules loaded before build and run.
    pub modules: Vec<String>,
    /// Arguments passed to the benchmark executable.
    pub executable_args: Vec<String>,
    /// GPUs the benchmark drives on each node.
    pub gpus_per_node: u32,
    /// Codegen flags, omitted when no architecture is determined.
    pub arch_flags: Option<ArchFlags>,
    /// Libraries the benchmark is linked against.
    pub link_flags: Vec<String>,
    /// Whether the job must hold its nodes exclusively.
    pub exclusive: bool,
}

impl ParameterBundle {
    /// Computes the success-marker count a run with `tasks` job tasks must
    /// report: one marker per GPU per task.
    #[must_use]
    pub fn expected_ok_count(&self, tasks: u64) -> u64 {
        tasks.saturating_mul(u64::from(self.gpus_per_node))
    }
}
