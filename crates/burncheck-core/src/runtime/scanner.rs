// burncheck-core/src/runtime/scanner.rs
// ============================================================================
// Module: Burncheck Output Scanner
// Description: Success-marker counting and throughput record extraction.
// Purpose: Turn captured benchmark output into counts and samples.
// Dependencies: crate — none beyond std
// ============================================================================

//! ## Overview
//! The benchmark prints one `OK` marker per healthy device and one record
//! per device of the form:
//!
//! ```text
//! GPU 3(Tesla-V100-SXM2): 5890.5 GF/s  61.0 Celsius
//! ```
//!
//! Counting and extraction are strict on the record shape and silent about
//! everything else: lines that do not match are skipped without error, and
//! an empty sample set is itself a meaningful result the validator acts on.

// ============================================================================
// SECTION: Pattern Literals
// ============================================================================

/// Success marker printed once per healthy device. Matched case-sensitively.
pub const SUCCESS_TOKEN: &str = "OK";

/// Leading literal of a throughput record.
const RECORD_PREFIX: &str = "GPU";
/// Literal closing the device label and introducing the throughput value.
const LABEL_CLOSE: &str = "): ";
/// Literal that must follow the throughput value: the unit plus the
/// two-space gap before the temperature value.
const THROUGHPUT_SUFFIX: &str = " GF/s  ";
/// Literal that must follow the temperature value.
const TEMPERATURE_SUFFIX: &str = " Celsius";

// ============================================================================
// SECTION: Burn Sample
// ============================================================================

/// One per-device throughput/temperature record.
#[derive(Debug, Clone, PartialEq)]
pub struct BurnSample {
    /// Device index reported by the benchmark.
    pub device_index: u32,
    /// Free-form device label, possibly empty.
    pub device_label: String,
    /// Sustained throughput in GF/s.
    pub gflops: f64,
    /// Device temperature in degrees Celsius.
    pub temperature: f64,
}

// ============================================================================
// SECTION: Success Markers
// ============================================================================

/// Counts non-overlapping occurrences of the success marker.
#[must_use]
pub fn count_success_tokens(text: &str) -> u64 {
    text.matches(SUCCESS_TOKEN).fold(0, |count, _| count + 1)
}

// ============================================================================
// SECTION: Record Extraction
// ============================================================================

/// Extracts every throughput record from the captured output.
///
/// Records are matched per line in encounter order. Malformed lines are
/// skipped silently; no partial records are produced.
#[must_use]
pub fn extract_samples(text: &str) -> Vec<BurnSample> {
    let mut samples = Vec::new();
    for line in text.lines() {
        scan_line(line, &mut samples);
    }
    samples
}

/// Scans one line for throughput records, appending matches.
fn scan_line(line: &str, out: &mut Vec<BurnSample>) {
    let mut offset = 0;
    while let Some(found) = line[offset ..].find(RECORD_PREFIX) {
        let start = offset + found;
        if let Some((sample, consumed)) = match_record(&line[start ..]) {
            out.push(sample);
            offset = start + consumed;
        } else {
            offset = start + RECORD_PREFIX.len();
        }
    }
}

/// Matches one record at the start of `text`.
///
/// Returns the sample and the number of bytes consumed, or `None` when the
/// text does not form a complete record.
fn match_record(text: &str) -> Option<(BurnSample, usize)> {
    let rest = &text[RECORD_PREFIX.len() ..];

    // At least one whitespace character between the prefix and the index.
    let stripped = rest.trim_start();
    if stripped.len() == rest.len() {
        return None;
    }

    let (index_digits, rest) = split_digits(stripped)?;
    let device_index: u32 = index_digits.parse().ok()?;

    let rest = rest.strip_prefix('(')?;
    let (device_label, rest) = split_label(rest)?;

    let (gflops_token, rest) = split_value(rest);
    let gflops: f64 = gflops_token.parse().ok()?;
    let rest = rest.strip_prefix(THROUGHPUT_SUFFIX)?;

    let (temperature_token, rest) = split_value(rest);
    let temperature: f64 = temperature_token.parse().ok()?;
    let rest = rest.strip_prefix(TEMPERATURE_SUFFIX)?;

    let sample = BurnSample {
        device_index,
        device_label: device_label.to_string(),
        gflops,
        temperature,
    };
    Some((sample, text.len() - rest.len()))
}

/// Splits a leading run of ASCII digits; fails when the run is empty.
fn split_digits(text: &str) -> Option<(&str, &str)> {
    let end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    Some((&text[.. end], &text[end ..]))
}

/// Splits the device label ahead of the closing `): ` literal.
///
/// The label may be empty but must not contain whitespace.
fn split_label(text: &str) -> Option<(&str, &str)> {
    let end = text.find(LABEL_CLOSE)?;
    let label = &text[.. end];
    if label.chars().any(char::is_whitespace) {
        return None;
    }
    Some((label, &text[end + LABEL_CLOSE.len() ..]))
}

/// Splits a leading run of non-whitespace characters; the run may be empty.
fn split_value(text: &str) -> (&str, &str) {
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    (&text[.. end], &text[end ..])
}
