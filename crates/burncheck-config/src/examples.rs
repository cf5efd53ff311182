// burncheck-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical examples for burncheck configuration. Outputs are deterministic
//! and kept in sync with the config model.

/// Returns a canonical example `burncheck.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"# Throughput reference table. Entries override the built-in fleet
# baselines target by target.

[[reference]]
target = "daint:gpu"
baseline = 4115.0
lower_tolerance = -0.10
unit = "Gflop/s"

[[reference]]
target = "ault:amda100"
baseline = 17552.0
lower_tolerance = -0.10
# upper_tolerance = 0.10
unit = "Gflop/s"
"#,
    )
}
