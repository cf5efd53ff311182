// crates/burncheck-cli/src/main.rs
// ============================================================================
// Module: Burncheck CLI Entry Point
// Description: Command dispatcher for target resolution and output validation.
// Purpose: Drive the burncheck core from a shell or a test-framework pipeline.
// Dependencies: burncheck-config, burncheck-core, clap, serde, thiserror.
// ============================================================================

//! ## Overview
//! The burncheck CLI exposes the two halves of the check to the external
//! test-execution framework: `resolve` prints the parameter bundle consumed
//! before build and run, and `validate` turns captured benchmark output into
//! a verdict. Structured output is canonical JSON so downstream tooling can
//! hash or diff it byte-for-byte. The process exit code mirrors the verdict:
//! `0` passed, `1` failed, `2` operational error.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use burncheck_config::BurncheckConfig;
use burncheck_config::config_toml_example;
use burncheck_core::Classification;
use burncheck_core::FailureReason;
use burncheck_core::ParameterBundle;
use burncheck_core::SystemIdentity;
use burncheck_core::Verdict;
use burncheck_core::resolve;
use burncheck_core::validate;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a captured output file in bytes.
const MAX_OUTPUT_BYTES: usize = 16 * 1024 * 1024;
/// Exit code for a run whose verdict did not pass.
const VERDICT_FAILURE_EXIT: u8 = 1;
/// Exit code for operational errors.
const ERROR_EXIT: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "burncheck", version, about = "GPU burn fleet regression check")]
struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve build/run parameters for a target.
    Resolve(ResolveCommand),
    /// Validate captured benchmark output for a target.
    Validate(ValidateCommand),
    /// Reference-table configuration helpers.
    Config(ConfigCommand),
}

/// Target identity arguments shared by subcommands.
#[derive(Args, Debug)]
struct TargetArgs {
    /// Cluster system name, e.g. `daint`.
    #[arg(long)]
    system: String,
    /// Fully qualified partition name, e.g. `daint:gpu`.
    #[arg(long)]
    partition: String,
}

impl TargetArgs {
    /// Builds the run identity from the arguments.
    fn identity(&self) -> SystemIdentity {
        SystemIdentity::new(self.system.as_str(), self.partition.as_str())
    }
}

/// Arguments for the `resolve` subcommand.
#[derive(Args, Debug)]
struct ResolveCommand {
    /// Target identity.
    #[command(flatten)]
    target: TargetArgs,
    /// Output rendering format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Target identity.
    #[command(flatten)]
    target: TargetArgs,
    /// Job tasks actually scheduled for the run.
    #[arg(long)]
    tasks: u64,
    /// Captured output file; stdin when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Reference-table config file; built-in baselines when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output rendering format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

/// Arguments for the `config` subcommand.
#[derive(Args, Debug)]
struct ConfigCommand {
    /// Selected configuration action.
    #[command(subcommand)]
    action: ConfigAction,
}

/// Configuration helper actions.
#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print a canonical example configuration.
    Example,
    /// Load and validate a configuration file.
    Validate {
        /// Config file path; default resolution rules when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Output rendering formats.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// Canonical JSON on a single line.
    Json,
    /// Human-readable text.
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Text => f.write_str("text"),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// User-facing error message.
    message: String,
}

impl CliError {
    /// Creates a new CLI error.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result alias for CLI operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Command::Resolve(command) => command_resolve(&command),
        Command::Validate(command) => command_validate(&command),
        Command::Config(command) => command_config(&command),
    }
}

// ============================================================================
// SECTION: Resolve Command
// ============================================================================

/// Resolves and prints the parameter bundle for a target.
fn command_resolve(command: &ResolveCommand) -> CliResult<ExitCode> {
    let identity = command.target.identity();
    let bundle = resolve(&identity);
    emit_structured_output(&bundle, command.format, render_bundle_text(&identity, &bundle))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Validate Command
// ============================================================================

/// Validates captured output and prints the verdict.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let config = BurncheckConfig::load_optional(command.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    let table = config.reference_table();

    let identity = command.target.identity();
    let bundle = resolve(&identity);
    let expected = bundle.expected_ok_count(command.tasks);
    let raw_output = read_captured_output(command.output.as_deref())?;

    let verdict = validate(&raw_output, expected, table.lookup(&identity))
        .map_err(|err| CliError::new(err.to_string()))?;
    emit_structured_output(&verdict, command.format, render_verdict_text(&verdict))?;
    Ok(ExitCode::from(verdict_exit_code(&verdict)))
}

/// Maps a verdict to the process exit code.
fn verdict_exit_code(verdict: &Verdict) -> u8 {
    if verdict.passed() { 0 } else { VERDICT_FAILURE_EXIT }
}

/// Reads the captured benchmark output from a file or stdin.
fn read_captured_output(path: Option<&Path>) -> CliResult<String> {
    let text = match path {
        Some(path) => {
            let bytes =
                fs::read(path).map_err(|err| CliError::new(output_error("read", &err)))?;
            if bytes.len() > MAX_OUTPUT_BYTES {
                return Err(CliError::new("captured output exceeds size limit"));
            }
            String::from_utf8(bytes)
                .map_err(|_| CliError::new("captured output must be utf-8"))?
        }
        None => std::io::read_to_string(std::io::stdin())
            .map_err(|err| CliError::new(output_error("stdin", &err)))?,
    };
    if text.len() > MAX_OUTPUT_BYTES {
        return Err(CliError::new("captured output exceeds size limit"));
    }
    Ok(text)
}

// ============================================================================
// SECTION: Config Command
// ============================================================================

/// Dispatches configuration helper actions.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match &command.action {
        ConfigAction::Example => {
            write_stdout_bytes(config_toml_example().as_bytes())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
        ConfigAction::Validate {
            config,
        } => {
            let loaded = BurncheckConfig::load(config.as_deref())
                .map_err(|err| CliError::new(err.to_string()))?;
            let summary = format!(
                "configuration OK: {} entries, {} effective targets",
                loaded.reference.len(),
                loaded.reference_table().len()
            );
            write_stdout_line(&summary)
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a parameter bundle as human-readable text.
fn render_bundle_text(identity: &SystemIdentity, bundle: &ParameterBundle) -> String {
    let arch = bundle.arch_flags.as_ref().map_or_else(
        || "default codegen".to_string(),
        |flags| flags.as_compiler_flags().join(" "),
    );
    format!(
        "target: {identity}\n\
         modules: {}\n\
         executable args: {}\n\
         gpus per node: {}\n\
         arch flags: {arch}\n\
         link flags: {}\n\
         exclusive: {}",
        join_or_dash(&bundle.modules),
        join_or_dash(&bundle.executable_args),
        bundle.gpus_per_node,
        join_or_dash(&bundle.link_flags),
        yes_no(bundle.exclusive),
    )
}

/// Renders a verdict as human-readable text.
fn render_verdict_text(verdict: &Verdict) -> String {
    let metric = verdict
        .metric
        .map_or_else(|| "none".to_string(), |metric| format!("{metric}"));
    let mut lines = format!(
        "correct: {} (ok markers {} of {})\n\
         metric: {metric}\n\
         classification: {}\n\
         passed: {}",
        yes_no(verdict.correct),
        verdict.ok_count,
        verdict.expected_ok_count,
        classification_label(verdict.classification),
        yes_no(verdict.passed()),
    );
    for failure in &verdict.failures {
        lines.push_str("\nfailure: ");
        lines.push_str(&failure_label(failure));
    }
    lines
}

/// Returns the text label for a classification.
const fn classification_label(classification: Classification) -> &'static str {
    match classification {
        Classification::Pass => "pass",
        Classification::Fail => "fail",
        Classification::NoReference => "no reference",
    }
}

/// Returns the text label for a failure reason.
fn failure_label(failure: &FailureReason) -> String {
    match failure {
        FailureReason::SuccessCountMismatch {
            expected,
            observed,
        } => format!("expected {expected} ok markers, found {observed}"),
        FailureReason::MissingSamples => {
            "no throughput samples matched while a reference exists".to_string()
        }
        FailureReason::MetricOutOfRange {
            metric,
            range,
        } => {
            let upper = range
                .upper
                .map_or_else(|| "unbounded".to_string(), |upper| format!("{upper}"));
            format!("metric {metric} outside [{}, {upper}]", range.lower)
        }
    }
}

/// Renders a boolean as `yes`/`no`.
const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Joins a list with spaces, or a dash when empty.
fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() { "-".to_string() } else { items.join(" ") }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Emits structured output as canonical JSON or rendered text.
fn emit_structured_output<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: String,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let mut bytes = serde_jcs::to_vec(value)
                .map_err(|err| CliError::new(format!("serialization failed: {err}")))?;
            bytes.push(b'\n');
            write_stdout_bytes(&bytes)
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        OutputFormat::Text => {
            let mut output = text;
            if !output.ends_with('\n') {
                output.push('\n');
            }
            write_stdout_bytes(output.as_bytes())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(())
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to access {stream}: {error}")
}

/// Reports an error on stderr and returns the error exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(ERROR_EXIT)
}
